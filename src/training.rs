//! Training Pipeline
//!
//! Reads the dataset CSV, performs a seeded stratified train/test split,
//! fits the encoder + forest, evaluates on the held-out split, and writes
//! the three artifacts: the bincode model, the text metrics report, and a
//! JSON metrics sidecar.

use crate::dataset;
use crate::features::FeatureEncoder;
use crate::forest::{ForestParams, RandomForestClassifier};
use crate::record::FoodSample;
use crate::report::ClassificationReport;
use crate::vocab::FreshnessLevel;
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Default artifact locations relative to the project root.
pub const DEFAULT_MODEL_PATH: &str = "models/freshness_model.bin";
pub const DEFAULT_METRICS_PATH: &str = "reports/metrics.txt";
pub const DEFAULT_METRICS_JSON_PATH: &str = "reports/metrics.json";

/// Everything the training run needs.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    pub data_csv: PathBuf,
    pub model_path: PathBuf,
    pub report_path: PathBuf,
    pub report_json_path: PathBuf,
    pub forest: ForestParams,
    /// Fraction of rows kept for training (per class).
    pub train_ratio: f64,
    pub split_seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            data_csv: PathBuf::from(dataset::DEFAULT_DATA_CSV),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            report_path: PathBuf::from(DEFAULT_METRICS_PATH),
            report_json_path: PathBuf::from(DEFAULT_METRICS_JSON_PATH),
            forest: ForestParams::default(),
            train_ratio: 0.8,
            split_seed: 42,
        }
    }
}

/// Fitted artifact: encoder layout + forest + class display names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreshnessModel {
    pub encoder: FeatureEncoder,
    pub forest: RandomForestClassifier,
    pub class_names: Vec<String>,
}

impl FreshnessModel {
    /// Serialize to bincode, creating parent directories on demand.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }
        let file = fs::File::create(path)
            .with_context(|| format!("Failed to create model file: {:?}", path))?;
        bincode::serialize_into(BufWriter::new(file), self)
            .with_context(|| format!("Failed to serialize model: {:?}", path))
    }

    /// Deserialize from bincode. Bins needing a user-displayable error use
    /// `prediction::load_model` instead.
    pub fn load(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)
            .with_context(|| format!("Failed to open model file: {:?}", path))?;
        bincode::deserialize_from(BufReader::new(file))
            .with_context(|| format!("Failed to deserialize model: {:?}", path))
    }
}

/// Result of one training run.
#[derive(Debug)]
pub struct TrainingSummary {
    pub report: ClassificationReport,
    pub n_train: usize,
    pub n_test: usize,
}

/// Seeded stratified split: shuffle each class's indices, then hold out
/// `1 - train_ratio` of every class. Returns (train, test) row indices.
pub fn stratified_split(
    samples: &[FoodSample],
    train_ratio: f64,
    seed: u64,
) -> (Vec<usize>, Vec<usize>) {
    let mut by_class: Vec<Vec<usize>> = vec![Vec::new(); FreshnessLevel::ALL.len()];
    for (idx, sample) in samples.iter().enumerate() {
        by_class[sample.freshness_level.class_index()].push(idx);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();

    for class_indices in &mut by_class {
        class_indices.shuffle(&mut rng);
        let n_test = ((class_indices.len() as f64) * (1.0 - train_ratio)).round() as usize;
        let (held_out, kept) = class_indices.split_at(n_test);
        test.extend_from_slice(held_out);
        train.extend_from_slice(kept);
    }

    (train, test)
}

fn encode_rows(
    encoder: &FeatureEncoder,
    samples: &[FoodSample],
    indices: &[usize],
) -> (Vec<Vec<f64>>, Vec<usize>) {
    let x = indices.iter().map(|&i| encoder.encode(&samples[i])).collect();
    let y = indices
        .iter()
        .map(|&i| samples[i].freshness_level.class_index())
        .collect();
    (x, y)
}

fn write_text(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
    }
    fs::write(path, contents).with_context(|| format!("Failed to write report: {:?}", path))
}

/// Fit the encoder + forest on already-loaded samples, without touching
/// the filesystem. Shared by `train_and_save` and the integration tests.
pub fn fit_model(
    samples: &[FoodSample],
    train_indices: &[usize],
    forest_params: ForestParams,
) -> FreshnessModel {
    let train_samples: Vec<FoodSample> =
        train_indices.iter().map(|&i| samples[i].clone()).collect();
    let encoder = FeatureEncoder::fit(&train_samples);

    let (x_train, y_train) = encode_rows(&encoder, samples, train_indices);
    let forest = RandomForestClassifier::fit(
        &x_train,
        &y_train,
        FreshnessLevel::ALL.len(),
        forest_params,
    );

    FreshnessModel {
        encoder,
        forest,
        class_names: FreshnessLevel::ALL.iter().map(|l| l.to_string()).collect(),
    }
}

/// Full pipeline: CSV → split → fit → evaluate → write artifacts.
pub fn train_and_save(config: &TrainingConfig) -> Result<TrainingSummary> {
    let samples = dataset::read_csv(&config.data_csv)?;
    anyhow::ensure!(
        samples.len() >= 10,
        "Dataset too small to split: {} rows in {:?}",
        samples.len(),
        config.data_csv
    );

    let (train_indices, test_indices) =
        stratified_split(&samples, config.train_ratio, config.split_seed);
    log::info!(
        "split {} rows into {} train / {} test",
        samples.len(),
        train_indices.len(),
        test_indices.len()
    );

    let model = fit_model(&samples, &train_indices, config.forest);

    let (x_test, y_test) = encode_rows(&model.encoder, &samples, &test_indices);
    let y_pred = model.forest.predict_batch(&x_test);
    let report = ClassificationReport::from_predictions(&y_test, &y_pred, &model.class_names);

    write_text(&config.report_path, &report.to_text())?;
    let json = serde_json::to_string_pretty(&report)
        .with_context(|| "Failed to serialize metrics JSON")?;
    write_text(&config.report_json_path, &json)?;

    model.save(&config.model_path)?;
    log::info!(
        "model saved to {:?} (accuracy {:.3})",
        config.model_path,
        report.accuracy
    );

    Ok(TrainingSummary {
        report,
        n_train: train_indices.len(),
        n_test: test_indices.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::generate_dataset;

    #[test]
    fn test_stratified_split_preserves_proportions() {
        let samples = generate_dataset(1000, 42);
        let (train, test) = stratified_split(&samples, 0.8, 42);

        assert_eq!(train.len() + test.len(), samples.len());

        for level in FreshnessLevel::ALL {
            let total = samples
                .iter()
                .filter(|s| s.freshness_level == level)
                .count();
            let in_test = test
                .iter()
                .filter(|&&i| samples[i].freshness_level == level)
                .count();
            let expected = ((total as f64) * 0.2).round() as usize;
            assert_eq!(in_test, expected, "class {} test share", level);
        }
    }

    #[test]
    fn test_split_is_seeded() {
        let samples = generate_dataset(300, 42);
        let a = stratified_split(&samples, 0.8, 7);
        let b = stratified_split(&samples, 0.8, 7);
        assert_eq!(a, b);

        let c = stratified_split(&samples, 0.8, 8);
        assert_ne!(a, c);
    }

    #[test]
    fn test_split_has_no_overlap() {
        let samples = generate_dataset(200, 42);
        let (train, test) = stratified_split(&samples, 0.8, 42);
        let train_set: std::collections::HashSet<_> = train.iter().collect();
        assert!(test.iter().all(|i| !train_set.contains(i)));
    }

    #[test]
    fn test_fit_model_learns_the_heuristic() {
        let samples = generate_dataset(600, 42);
        let (train, test) = stratified_split(&samples, 0.8, 42);
        let model = fit_model(
            &samples,
            &train,
            ForestParams {
                n_trees: 20,
                ..Default::default()
            },
        );

        let (x_test, y_test) = encode_rows(&model.encoder, &samples, &test);
        let y_pred = model.forest.predict_batch(&x_test);
        let correct = y_test
            .iter()
            .zip(&y_pred)
            .filter(|(t, p)| t == p)
            .count();
        let accuracy = correct as f64 / y_test.len() as f64;

        // The labels are a step function of the features; even a small
        // forest should comfortably beat chance.
        assert!(accuracy > 0.7, "accuracy {:.3} too low", accuracy);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = std::env::temp_dir().join("freshness_training_test");
        let path = dir.join("model.bin");

        let samples = generate_dataset(200, 42);
        let (train, _) = stratified_split(&samples, 0.8, 42);
        let model = fit_model(
            &samples,
            &train,
            ForestParams {
                n_trees: 5,
                ..Default::default()
            },
        );

        model.save(&path).unwrap();
        let loaded = FreshnessModel::load(&path).unwrap();

        for sample in samples.iter().take(20) {
            let row = model.encoder.encode(sample);
            let row_loaded = loaded.encoder.encode(sample);
            assert_eq!(row, row_loaded);
            assert_eq!(model.forest.predict(&row), loaded.forest.predict(&row));
        }

        std::fs::remove_dir_all(&dir).ok();
    }
}
