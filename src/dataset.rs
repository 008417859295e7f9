//! Synthetic Dataset Generation
//!
//! Draws labeled cooked-food records with a seeded RNG and round-trips
//! them through `data/food_data.csv`. The same `(n, seed)` pair must
//! reproduce the identical dataset, so all draws go through a single
//! `StdRng` in record order.

use crate::climate::sample_city;
use crate::labeling::freshness_label;
use crate::record::{samples_from_dataframe, samples_to_dataframe, FoodSample};
use crate::vocab::{
    FreshnessLevel, CONTAINER_TYPES, COOKING_METHODS, FOOD_TYPES, MOISTURE_TYPES,
    SMELL_DESCRIPTORS, STORAGE_CONDITIONS, TEXTURE_DESCRIPTORS,
};
use anyhow::{Context, Result};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use std::fs;
use std::path::Path;

/// Production dataset size.
pub const DEFAULT_ROWS: usize = 6500;

/// Production seed.
pub const DEFAULT_SEED: u64 = 42;

/// Default dataset location relative to the project root.
pub const DEFAULT_DATA_CSV: &str = "data/food_data.csv";

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Draw one record. The label is recomputed from the drawn fields, never
/// sampled.
fn generate_row<R: Rng + ?Sized>(rng: &mut R) -> FoodSample {
    let (city, region) = sample_city(rng);

    let storage_dist = Normal::new(12.0, 10.0).expect("valid distribution parameters");
    let cooking_dist = Normal::new(2.0, 3.0).expect("valid distribution parameters");

    // Hours in storage: Gaussian clipped at zero, 1 decimal.
    let storage_time = round_to(rng.sample::<f64, _>(storage_dist).max(0.0), 1);
    // Hours before storing: folded Gaussian, 2 decimals.
    let time_since_cooking = round_to(rng.sample::<f64, _>(cooking_dist).abs(), 2);

    let food_type = FOOD_TYPES.choose(rng).expect("non-empty vocabulary");
    let texture = TEXTURE_DESCRIPTORS.choose(rng).expect("non-empty vocabulary");
    let smell = SMELL_DESCRIPTORS.choose(rng).expect("non-empty vocabulary");
    let storage_condition = STORAGE_CONDITIONS.choose(rng).expect("non-empty vocabulary");
    let moisture_type = MOISTURE_TYPES.choose(rng).expect("non-empty vocabulary");
    let cooking_method = COOKING_METHODS.choose(rng).expect("non-empty vocabulary");
    let container_type = CONTAINER_TYPES.choose(rng).expect("non-empty vocabulary");

    let mut sample = FoodSample {
        city: city.to_string(),
        region: region.name.to_string(),
        storage_time,
        time_since_cooking,
        storage_condition: storage_condition.to_string(),
        container_type: container_type.to_string(),
        food_type: food_type.to_string(),
        moisture_type: moisture_type.to_string(),
        cooking_method: cooking_method.to_string(),
        texture: texture.to_string(),
        smell: smell.to_string(),
        freshness_level: FreshnessLevel::Fresh,
    };
    sample.freshness_level = freshness_label(&sample);
    sample
}

/// Generate `n` labeled records with a fixed seed.
pub fn generate_dataset(n: usize, seed: u64) -> Vec<FoodSample> {
    let mut rng = StdRng::seed_from_u64(seed);
    let samples: Vec<FoodSample> = (0..n).map(|_| generate_row(&mut rng)).collect();

    log::info!("generated {} records (seed {})", samples.len(), seed);
    samples
}

/// Write records to CSV in the fixed column order, creating parent
/// directories on demand.
pub fn write_csv(path: &Path, samples: &[FoodSample]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
    }

    let mut df = samples_to_dataframe(samples)?;
    let mut file =
        fs::File::create(path).with_context(|| format!("Failed to create CSV: {:?}", path))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("Failed to write CSV: {:?}", path))?;

    Ok(())
}

/// Read records back from CSV.
pub fn read_csv(path: &Path) -> Result<Vec<FoodSample>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.into()))
        .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to load dataset CSV: {:?}", path))?;

    samples_from_dataframe(&df)
}
