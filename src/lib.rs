//! Cooked Food Freshness Predictor
//!
//! Synthesizes a labeled spoilage-risk dataset, trains a random-forest
//! classifier on it, and serves single-sample predictions to a desktop
//! form. Components communicate only through flat files:
//!
//! - `vocab` / `climate`: shared vocabularies and region presets
//! - `record` / `dataset`: the tabular record, seeded synthesis, CSV I/O
//! - `labeling`: the heuristic ground-truth scoring function
//! - `features` / `forest`: one-hot encoding and the CART ensemble
//! - `training` / `prediction` / `report`: pipeline, artifact, summaries
//! - `gui` (feature `gui`): the eframe desktop form

pub mod climate;
pub mod dataset;
pub mod features;
pub mod forest;
pub mod labeling;
pub mod prediction;
pub mod record;
pub mod report;
pub mod training;
pub mod vocab;

#[cfg(feature = "gui")]
pub mod gui;

// Re-export commonly used types
pub use features::FeatureEncoder;
pub use forest::{ForestParams, RandomForestClassifier};
pub use labeling::{freshness_label, risk_score};
pub use prediction::{load_model, predict_sample, PredictError, Prediction};
pub use record::FoodSample;
pub use training::{train_and_save, FreshnessModel, TrainingConfig};
pub use vocab::FreshnessLevel;
