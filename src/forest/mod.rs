//! Random Forest Classifier
//!
//! Bagged CART trees with sqrt(d) feature subsampling per split, majority
//! vote prediction, and vote-fraction probabilities. Trees are fitted in
//! parallel with Rayon; every tree derives its own RNG from the forest
//! seed and its tree index, so the fitted model is identical no matter
//! how many worker threads run.

pub mod tree;

pub use tree::{DecisionTree, TreeParams};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Forest hyperparameters. Defaults mirror a stock 100-tree ensemble.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_leaf: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 16,
            min_samples_leaf: 1,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    trees: Vec<DecisionTree>,
    n_classes: usize,
    n_features: usize,
    /// Mean per-tree normalized impurity decrease, per encoded feature.
    feature_importances: Vec<f64>,
    params: ForestParams,
}

impl RandomForestClassifier {
    /// Fit the ensemble on dense rows `x` with class labels `y`.
    ///
    /// Each tree draws its own bootstrap sample and split features from a
    /// seed derived as `seed + tree_index`.
    pub fn fit(x: &[Vec<f64>], y: &[usize], n_classes: usize, params: ForestParams) -> Self {
        assert!(!x.is_empty(), "cannot fit a forest on zero rows");
        assert_eq!(x.len(), y.len());

        let n_rows = x.len();
        let n_features = x[0].len();
        let tree_params = TreeParams {
            max_depth: params.max_depth,
            min_samples_leaf: params.min_samples_leaf,
            n_split_features: ((n_features as f64).sqrt().floor() as usize).max(1),
        };

        let fitted: Vec<(DecisionTree, Vec<f64>)> = (0..params.n_trees)
            .into_par_iter()
            .map(|tree_idx| {
                let mut rng = StdRng::seed_from_u64(params.seed.wrapping_add(tree_idx as u64));

                let bootstrap: Vec<usize> =
                    (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect();

                let mut importances = vec![0.0; n_features];
                let tree = DecisionTree::fit(
                    x,
                    y,
                    n_classes,
                    bootstrap,
                    &tree_params,
                    &mut importances,
                    &mut rng,
                );

                let total: f64 = importances.iter().sum();
                if total > 0.0 {
                    for v in &mut importances {
                        *v /= total;
                    }
                }
                (tree, importances)
            })
            .collect();

        let mut feature_importances = vec![0.0; n_features];
        for (_, tree_importances) in &fitted {
            for (acc, v) in feature_importances.iter_mut().zip(tree_importances) {
                *acc += v;
            }
        }
        for v in &mut feature_importances {
            *v /= params.n_trees as f64;
        }

        let trees = fitted.into_iter().map(|(tree, _)| tree).collect();

        RandomForestClassifier {
            trees,
            n_classes,
            n_features,
            feature_importances,
            params,
        }
    }

    fn votes(&self, row: &[f64]) -> Vec<f64> {
        let mut votes = vec![0.0; self.n_classes];
        for tree in &self.trees {
            votes[tree.predict(row)] += 1.0;
        }
        votes
    }

    /// Majority-vote class; ties resolve to the lowest class index.
    pub fn predict(&self, row: &[f64]) -> usize {
        let votes = self.votes(row);
        let mut best = 0;
        for (class, &v) in votes.iter().enumerate() {
            if v > votes[best] {
                best = class;
            }
        }
        best
    }

    /// Vote fractions per class, summing to 1.
    pub fn predict_proba(&self, row: &[f64]) -> Vec<f64> {
        let mut votes = self.votes(row);
        let n = self.trees.len() as f64;
        for v in &mut votes {
            *v /= n;
        }
        votes
    }

    /// Predict a batch of rows in parallel.
    pub fn predict_batch(&self, rows: &[Vec<f64>]) -> Vec<usize> {
        rows.par_iter().map(|row| self.predict(row)).collect()
    }

    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }
}
