//! CART Decision Tree
//!
//! Gini-impurity classification tree over dense feature vectors, stored
//! as a flat node arena so the fitted tree serializes without recursion.
//! Split search considers a random feature subset per node (the forest
//! passes sqrt(d)), with thresholds at midpoints between distinct sorted
//! values.

use rand::seq::index::sample as sample_indices;
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Per-node class histogram. Three freshness classes in practice, so the
/// counts stay on the stack.
type ClassCounts = SmallVec<[f64; 4]>;

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    Leaf {
        /// Normalized class distribution at the leaf.
        distribution: Vec<f64>,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Stopping and split-sampling parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_samples_leaf: usize,
    /// Features examined per split (sqrt(d) in the forest).
    pub n_split_features: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    n_classes: usize,
}

impl DecisionTree {
    /// Fit a tree on the rows selected by `indices` (bootstrap sample from
    /// the forest). Split impurity decreases are accumulated into
    /// `importances`, weighted by the fraction of rows reaching the node.
    pub fn fit<R: Rng + ?Sized>(
        x: &[Vec<f64>],
        y: &[usize],
        n_classes: usize,
        indices: Vec<usize>,
        params: &TreeParams,
        importances: &mut [f64],
        rng: &mut R,
    ) -> Self {
        debug_assert_eq!(x.len(), y.len());

        let n_total = indices.len() as f64;
        let mut builder = TreeBuilder {
            x,
            y,
            n_classes,
            params,
            nodes: Vec::new(),
            importances,
            n_total,
        };
        builder.build(indices, 0, rng);

        DecisionTree {
            nodes: builder.nodes,
            n_classes,
        }
    }

    /// Walk the tree to the leaf distribution for one row.
    pub fn predict_proba(&self, row: &[f64]) -> &[f64] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { distribution } => return distribution,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    /// Majority class at the reached leaf; ties resolve to the lowest
    /// class index.
    pub fn predict(&self, row: &[f64]) -> usize {
        let distribution = self.predict_proba(row);
        let mut best = 0;
        for (class, &p) in distribution.iter().enumerate() {
            if p > distribution[best] {
                best = class;
            }
        }
        best
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }
}

struct TreeBuilder<'a> {
    x: &'a [Vec<f64>],
    y: &'a [usize],
    n_classes: usize,
    params: &'a TreeParams,
    nodes: Vec<Node>,
    importances: &'a mut [f64],
    n_total: f64,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    gain: f64,
}

impl<'a> TreeBuilder<'a> {
    fn class_counts(&self, indices: &[usize]) -> ClassCounts {
        let mut counts: ClassCounts = smallvec::smallvec![0.0; self.n_classes];
        for &i in indices {
            counts[self.y[i]] += 1.0;
        }
        counts
    }

    fn gini(counts: &[f64], total: f64) -> f64 {
        if total <= 0.0 {
            return 0.0;
        }
        let mut sum_sq = 0.0;
        for &c in counts {
            let p = c / total;
            sum_sq += p * p;
        }
        1.0 - sum_sq
    }

    fn leaf(&mut self, counts: &ClassCounts) -> usize {
        let total: f64 = counts.iter().sum();
        let distribution: Vec<f64> = if total > 0.0 {
            counts.iter().map(|&c| c / total).collect()
        } else {
            vec![1.0 / self.n_classes as f64; self.n_classes]
        };
        self.nodes.push(Node::Leaf { distribution });
        self.nodes.len() - 1
    }

    /// Recursively grow the node for `indices`, returning its arena index.
    fn build<R: Rng + ?Sized>(&mut self, indices: Vec<usize>, depth: usize, rng: &mut R) -> usize {
        let counts = self.class_counts(&indices);
        let total = indices.len() as f64;
        let node_impurity = Self::gini(&counts, total);

        let can_split = depth < self.params.max_depth
            && indices.len() >= 2 * self.params.min_samples_leaf
            && node_impurity > 0.0;

        let best = if can_split {
            self.find_best_split(&indices, &counts, node_impurity, rng)
        } else {
            None
        };

        let Some(best) = best else {
            return self.leaf(&counts);
        };

        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| self.x[i][best.feature] <= best.threshold);

        // Weighted impurity decrease for the summary report.
        self.importances[best.feature] += (total / self.n_total) * best.gain;

        // Reserve the split slot before the children claim theirs.
        let slot = self.nodes.len();
        self.nodes.push(Node::Leaf {
            distribution: Vec::new(),
        });

        let left = self.build(left_indices, depth + 1, rng);
        let right = self.build(right_indices, depth + 1, rng);

        self.nodes[slot] = Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left,
            right,
        };
        slot
    }

    /// Scan a random feature subset for the highest gini gain. A sweep
    /// over rows sorted by feature value keeps this O(n log n) per
    /// feature.
    fn find_best_split<R: Rng + ?Sized>(
        &self,
        indices: &[usize],
        parent_counts: &ClassCounts,
        parent_impurity: f64,
        rng: &mut R,
    ) -> Option<BestSplit> {
        let n_features = self.x[0].len();
        let k = self.params.n_split_features.clamp(1, n_features);
        let candidates = sample_indices(rng, n_features, k);

        let total = indices.len() as f64;
        let min_leaf = self.params.min_samples_leaf;
        let mut best: Option<BestSplit> = None;

        let mut ordered: Vec<(f64, usize)> = Vec::with_capacity(indices.len());
        for feature in candidates.iter() {
            ordered.clear();
            ordered.extend(indices.iter().map(|&i| (self.x[i][feature], self.y[i])));
            ordered.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));

            let mut left_counts: ClassCounts = smallvec::smallvec![0.0; self.n_classes];
            let mut right_counts = parent_counts.clone();

            for split_at in 1..ordered.len() {
                let (value, class) = ordered[split_at - 1];
                left_counts[class] += 1.0;
                right_counts[class] -= 1.0;

                let next_value = ordered[split_at].0;
                if next_value <= value {
                    continue; // no threshold separates equal values
                }
                if split_at < min_leaf || ordered.len() - split_at < min_leaf {
                    continue;
                }

                let n_left = split_at as f64;
                let n_right = total - n_left;
                let weighted = (n_left / total) * Self::gini(&left_counts, n_left)
                    + (n_right / total) * Self::gini(&right_counts, n_right);
                let gain = parent_impurity - weighted;

                if gain > 1e-12 && best.as_ref().map_or(true, |b| gain > b.gain) {
                    best = Some(BestSplit {
                        feature,
                        threshold: (value + next_value) / 2.0,
                        gain,
                    });
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fit_simple(x: &[Vec<f64>], y: &[usize], n_classes: usize, seed: u64) -> DecisionTree {
        let params = TreeParams {
            max_depth: 16,
            min_samples_leaf: 1,
            n_split_features: x[0].len(),
        };
        let mut importances = vec![0.0; x[0].len()];
        let mut rng = StdRng::seed_from_u64(seed);
        DecisionTree::fit(
            x,
            y,
            n_classes,
            (0..x.len()).collect(),
            &params,
            &mut importances,
            &mut rng,
        )
    }

    #[test]
    fn test_perfect_fit_on_separable_data() {
        let x = vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![2.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 1.0],
            vec![2.0, 1.0],
        ];
        let y = vec![0, 0, 1, 1, 2, 2];
        let tree = fit_simple(&x, &y, 3, 42);

        for (row, &label) in x.iter().zip(&y) {
            assert_eq!(tree.predict(row), label);
        }
    }

    #[test]
    fn test_predictions_in_label_range() {
        let x: Vec<Vec<f64>> = (0..40).map(|i| vec![(i % 7) as f64, (i % 3) as f64]).collect();
        let y: Vec<usize> = (0..40).map(|i| (i % 3) as usize).collect();
        let tree = fit_simple(&x, &y, 3, 1);

        for row in &x {
            assert!(tree.predict(row) < 3);
            let proba = tree.predict_proba(row);
            assert_eq!(proba.len(), 3);
            let sum: f64 = proba.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_deterministic_with_seed() {
        let x: Vec<Vec<f64>> = (0..60)
            .map(|i| vec![(i as f64 * 0.37).sin(), (i as f64 * 0.11).cos()])
            .collect();
        let y: Vec<usize> = x.iter().map(|r| usize::from(r[0] > 0.0)).collect();

        let a = fit_simple(&x, &y, 2, 42);
        let b = fit_simple(&x, &y, 2, 42);
        for row in &x {
            assert_eq!(a.predict(row), b.predict(row));
        }
    }

    #[test]
    fn test_pure_node_becomes_leaf() {
        let x = vec![vec![0.0], vec![1.0], vec![2.0]];
        let y = vec![1, 1, 1];
        let tree = fit_simple(&x, &y, 3, 0);
        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(tree.predict(&[5.0]), 1);
    }
}
