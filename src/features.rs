//! Feature Encoding
//!
//! Maps a `FoodSample` onto the fixed-width numeric vector the classifier
//! consumes: two numeric passthrough columns followed by one-hot blocks
//! for the six categorical training columns.
//!
//! The encoder is fitted on training rows only. Categories are laid out in
//! sorted order per column, and a category unseen at fit time encodes to
//! an all-zero block instead of an error, so a hand-edited CSV or an
//! out-of-vocabulary form value degrades gracefully.
//!
//! `city`, `region`, and `texture` are intentionally absent: they are
//! dataset columns, not model features.

use crate::record::FoodSample;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Numeric passthrough columns, in encoded order.
pub const NUMERIC_FEATURES: &[&str] = &["storage_time", "time_since_cooking"];

/// One-hot encoded columns, in encoded order.
pub const CATEGORICAL_FEATURES: &[&str] = &[
    "storage_condition",
    "container_type",
    "food_type",
    "moisture_type",
    "cooking_method",
    "smell",
];

fn numeric_value(sample: &FoodSample, column: &str) -> f64 {
    match column {
        "storage_time" => sample.storage_time,
        "time_since_cooking" => sample.time_since_cooking,
        _ => unreachable!("unknown numeric feature column"),
    }
}

fn categorical_value<'a>(sample: &'a FoodSample, column: &str) -> &'a str {
    match column {
        "storage_condition" => &sample.storage_condition,
        "container_type" => &sample.container_type,
        "food_type" => &sample.food_type,
        "moisture_type" => &sample.moisture_type,
        "cooking_method" => &sample.cooking_method,
        "smell" => &sample.smell,
        _ => unreachable!("unknown categorical feature column"),
    }
}

/// Fitted one-hot layout: per-column category lists plus slot lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureEncoder {
    /// Sorted categories observed at fit time, one list per categorical
    /// column (in `CATEGORICAL_FEATURES` order).
    categories: Vec<Vec<String>>,
    /// category → absolute slot index, one map per categorical column.
    slots: Vec<FxHashMap<String, usize>>,
    width: usize,
}

impl FeatureEncoder {
    /// Learn the category layout from training rows.
    pub fn fit(samples: &[FoodSample]) -> Self {
        let mut categories: Vec<Vec<String>> = Vec::with_capacity(CATEGORICAL_FEATURES.len());

        for &column in CATEGORICAL_FEATURES {
            let mut seen: Vec<String> = samples
                .iter()
                .map(|s| categorical_value(s, column).to_string())
                .collect();
            seen.sort_unstable();
            seen.dedup();
            categories.push(seen);
        }

        let mut slots: Vec<FxHashMap<String, usize>> = Vec::with_capacity(categories.len());
        let mut offset = NUMERIC_FEATURES.len();
        for column_categories in &categories {
            let mut map = FxHashMap::default();
            for (local, category) in column_categories.iter().enumerate() {
                map.insert(category.clone(), offset + local);
            }
            offset += column_categories.len();
            slots.push(map);
        }

        FeatureEncoder {
            categories,
            slots,
            width: offset,
        }
    }

    /// Encoded vector width (numeric columns + all one-hot slots).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Encode one sample into a dense feature vector.
    pub fn encode(&self, sample: &FoodSample) -> Vec<f64> {
        let mut row = vec![0.0; self.width];

        for (i, &column) in NUMERIC_FEATURES.iter().enumerate() {
            row[i] = numeric_value(sample, column);
        }

        for (map, &column) in self.slots.iter().zip(CATEGORICAL_FEATURES) {
            // Unknown category: leave the whole block at zero.
            if let Some(&slot) = map.get(categorical_value(sample, column)) {
                row[slot] = 1.0;
            }
        }

        row
    }

    /// Human-readable name per encoded slot: numeric column names, then
    /// `column=category` for each one-hot slot.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names: Vec<String> = NUMERIC_FEATURES.iter().map(|s| s.to_string()).collect();
        for (column_categories, &column) in self.categories.iter().zip(CATEGORICAL_FEATURES) {
            for category in column_categories {
                names.push(format!("{}={}", column, category));
            }
        }
        names
    }
}
