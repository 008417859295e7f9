//! Prediction Helper
//!
//! Loads the saved model artifact and predicts single samples. Load
//! failures are typed so the desktop form can show them verbatim in a
//! dialog instead of unwinding.

use crate::record::FoodSample;
use crate::training::FreshnessModel;
use crate::vocab::FreshnessLevel;
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Model not found at {path:?}. Run the train_model binary first.")]
    ModelMissing { path: PathBuf },

    #[error("Failed to read model artifact {path:?}: {source}")]
    ArtifactUnreadable {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },
}

/// One prediction with its per-class vote fractions (ordered like
/// `FreshnessModel::class_names`).
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub level: FreshnessLevel,
    pub probabilities: Vec<f64>,
}

/// Load the artifact, distinguishing "never trained" from "unreadable".
pub fn load_model(path: &Path) -> Result<FreshnessModel, PredictError> {
    if !path.exists() {
        return Err(PredictError::ModelMissing {
            path: path.to_path_buf(),
        });
    }

    let file = fs::File::open(path).map_err(|e| PredictError::ArtifactUnreadable {
        path: path.to_path_buf(),
        source: bincode::Error::from(e),
    })?;

    bincode::deserialize_from(BufReader::new(file)).map_err(|source| {
        PredictError::ArtifactUnreadable {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Predict one sample. The encoder ignores the sample's city, region, and
/// texture; unknown categories in the remaining fields encode to zeros.
pub fn predict_sample(model: &FreshnessModel, sample: &FoodSample) -> Prediction {
    let row = model.encoder.encode(sample);
    let class = model.forest.predict(&row);
    let probabilities = model.forest.predict_proba(&row);

    Prediction {
        level: FreshnessLevel::from_class_index(class).unwrap_or(FreshnessLevel::Spoiled),
        probabilities,
    }
}

/// `label: fraction` pairs for display, in class order.
pub fn probability_map(model: &FreshnessModel, prediction: &Prediction) -> Vec<(String, f64)> {
    model
        .class_names
        .iter()
        .cloned()
        .zip(prediction.probabilities.iter().copied())
        .collect()
}
