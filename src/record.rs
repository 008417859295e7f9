//! Food Sample Records
//!
//! The single tabular record type shared by the synthesizer, the training
//! pipeline, and the prediction helper, plus its fixed CSV column order
//! and DataFrame conversions (Polars both ways).

use crate::vocab::FreshnessLevel;
use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Fixed CSV column order for `food_data.csv`.
///
/// `city`, `region`, and `texture` are dataset columns but are NOT model
/// features; the trainer projects the feature subset out of this order.
pub const CSV_COLUMNS: &[&str] = &[
    "city",
    "region",
    "storage_time",
    "time_since_cooking",
    "storage_condition",
    "container_type",
    "food_type",
    "moisture_type",
    "cooking_method",
    "texture",
    "smell",
    "freshness_level",
];

/// One cooked-food observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodSample {
    pub city: String,
    pub region: String,
    /// Hours kept in storage.
    pub storage_time: f64,
    /// Hours between cooking and storing.
    pub time_since_cooking: f64,
    pub storage_condition: String,
    pub container_type: String,
    pub food_type: String,
    pub moisture_type: String,
    pub cooking_method: String,
    pub texture: String,
    pub smell: String,
    pub freshness_level: FreshnessLevel,
}

/// Build a DataFrame in the fixed column order.
pub fn samples_to_dataframe(samples: &[FoodSample]) -> Result<DataFrame> {
    let cities: Vec<&str> = samples.iter().map(|s| s.city.as_str()).collect();
    let regions: Vec<&str> = samples.iter().map(|s| s.region.as_str()).collect();
    let storage_times: Vec<f64> = samples.iter().map(|s| s.storage_time).collect();
    let times_since: Vec<f64> = samples.iter().map(|s| s.time_since_cooking).collect();
    let storage_conditions: Vec<&str> =
        samples.iter().map(|s| s.storage_condition.as_str()).collect();
    let container_types: Vec<&str> = samples.iter().map(|s| s.container_type.as_str()).collect();
    let food_types: Vec<&str> = samples.iter().map(|s| s.food_type.as_str()).collect();
    let moisture_types: Vec<&str> = samples.iter().map(|s| s.moisture_type.as_str()).collect();
    let cooking_methods: Vec<&str> = samples.iter().map(|s| s.cooking_method.as_str()).collect();
    let textures: Vec<&str> = samples.iter().map(|s| s.texture.as_str()).collect();
    let smells: Vec<&str> = samples.iter().map(|s| s.smell.as_str()).collect();
    let labels: Vec<&str> = samples
        .iter()
        .map(|s| s.freshness_level.as_str())
        .collect();

    DataFrame::new(vec![
        Series::new("city".into(), cities).into(),
        Series::new("region".into(), regions).into(),
        Series::new("storage_time".into(), storage_times).into(),
        Series::new("time_since_cooking".into(), times_since).into(),
        Series::new("storage_condition".into(), storage_conditions).into(),
        Series::new("container_type".into(), container_types).into(),
        Series::new("food_type".into(), food_types).into(),
        Series::new("moisture_type".into(), moisture_types).into(),
        Series::new("cooking_method".into(), cooking_methods).into(),
        Series::new("texture".into(), textures).into(),
        Series::new("smell".into(), smells).into(),
        Series::new("freshness_level".into(), labels).into(),
    ])
    .with_context(|| "Failed to assemble samples DataFrame")
}

/// Extract records column-by-column from a DataFrame.
///
/// Every row must carry a value in every column; a hole means the CSV was
/// edited by hand, and the row index in the error points straight at it.
pub fn samples_from_dataframe(df: &DataFrame) -> Result<Vec<FoodSample>> {
    fn str_col<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked> {
        df.column(name)
            .with_context(|| format!("Column '{}' not found", name))?
            .str()
            .with_context(|| format!("Column '{}' is not string type", name))
    }
    fn f64_col<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Float64Chunked> {
        df.column(name)
            .with_context(|| format!("Column '{}' not found", name))?
            .f64()
            .with_context(|| format!("Column '{}' is not float type", name))
    }

    let cities = str_col(df, "city")?;
    let regions = str_col(df, "region")?;
    let storage_times = f64_col(df, "storage_time")?;
    let times_since = f64_col(df, "time_since_cooking")?;
    let storage_conditions = str_col(df, "storage_condition")?;
    let container_types = str_col(df, "container_type")?;
    let food_types = str_col(df, "food_type")?;
    let moisture_types = str_col(df, "moisture_type")?;
    let cooking_methods = str_col(df, "cooking_method")?;
    let textures = str_col(df, "texture")?;
    let smells = str_col(df, "smell")?;
    let labels = str_col(df, "freshness_level")?;

    let mut samples = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let get_str = |col: &StringChunked, name: &str| -> Result<String> {
            col.get(idx)
                .map(|s| s.to_string())
                .ok_or_else(|| anyhow::anyhow!("Row {} has missing '{}'", idx, name))
        };
        let get_f64 = |col: &Float64Chunked, name: &str| -> Result<f64> {
            col.get(idx)
                .ok_or_else(|| anyhow::anyhow!("Row {} has missing '{}'", idx, name))
        };

        let label_str = get_str(labels, "freshness_level")?;
        let freshness_level = label_str
            .parse::<FreshnessLevel>()
            .map_err(|e| anyhow::anyhow!("Row {}: {}", idx, e))?;

        samples.push(FoodSample {
            city: get_str(cities, "city")?,
            region: get_str(regions, "region")?,
            storage_time: get_f64(storage_times, "storage_time")?,
            time_since_cooking: get_f64(times_since, "time_since_cooking")?,
            storage_condition: get_str(storage_conditions, "storage_condition")?,
            container_type: get_str(container_types, "container_type")?,
            food_type: get_str(food_types, "food_type")?,
            moisture_type: get_str(moisture_types, "moisture_type")?,
            cooking_method: get_str(cooking_methods, "cooking_method")?,
            texture: get_str(textures, "texture")?,
            smell: get_str(smells, "smell")?,
            freshness_level,
        });
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fixture() -> FoodSample {
        FoodSample {
            city: "Delhi".to_string(),
            region: "North".to_string(),
            storage_time: 2.0,
            time_since_cooking: 1.0,
            storage_condition: "refrigerated".to_string(),
            container_type: "closed".to_string(),
            food_type: "Vegetarian".to_string(),
            moisture_type: "dry".to_string(),
            cooking_method: "fried".to_string(),
            texture: "soft".to_string(),
            smell: "neutral".to_string(),
            freshness_level: FreshnessLevel::Fresh,
        }
    }

    #[test]
    fn test_dataframe_round_trip() {
        let mut spoiled = sample_fixture();
        spoiled.storage_condition = "outside".to_string();
        spoiled.smell = "sour".to_string();
        spoiled.freshness_level = FreshnessLevel::Spoiled;

        let samples = vec![sample_fixture(), spoiled];
        let df = samples_to_dataframe(&samples).unwrap();

        assert_eq!(df.height(), 2);
        let names: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, CSV_COLUMNS);

        let back = samples_from_dataframe(&df).unwrap();
        assert_eq!(back, samples);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let df = samples_to_dataframe(&[sample_fixture()])
            .unwrap()
            .drop("smell")
            .unwrap();
        let err = samples_from_dataframe(&df).unwrap_err();
        assert!(err.to_string().contains("smell"));
    }
}
