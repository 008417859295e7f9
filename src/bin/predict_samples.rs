//! Smoke-check the saved model against two canned samples: one benign
//! (refrigerated, fresh-cooked) and one adverse (left outside, sour).
//!
//! Usage: predict_samples [--model PATH]

use freshness_predictor::prediction::{load_model, predict_sample, probability_map};
use freshness_predictor::record::FoodSample;
use freshness_predictor::training::DEFAULT_MODEL_PATH;
use freshness_predictor::vocab::FreshnessLevel;
use std::path::PathBuf;

fn canned_samples() -> [FoodSample; 2] {
    let benign = FoodSample {
        city: "Delhi".to_string(),
        region: "North".to_string(),
        storage_time: 1.0,
        time_since_cooking: 0.3,
        storage_condition: "refrigerated".to_string(),
        container_type: "closed".to_string(),
        food_type: "Vegetarian".to_string(),
        moisture_type: "dry".to_string(),
        cooking_method: "fried".to_string(),
        texture: "soft".to_string(),
        smell: "neutral".to_string(),
        freshness_level: FreshnessLevel::Fresh,
    };

    let adverse = FoodSample {
        city: "Chennai".to_string(),
        region: "South".to_string(),
        storage_time: 20.0,
        time_since_cooking: 6.0,
        storage_condition: "outside".to_string(),
        container_type: "open".to_string(),
        food_type: "Seafood".to_string(),
        moisture_type: "wet".to_string(),
        cooking_method: "steamed".to_string(),
        texture: "moist".to_string(),
        smell: "sour".to_string(),
        freshness_level: FreshnessLevel::Spoiled,
    };

    [benign, adverse]
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let model_path = std::env::args()
        .skip_while(|a| a != "--model" && a != "-m")
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));

    let model = load_model(&model_path)?;
    println!("Model loaded from {:?}", model_path);

    for (i, sample) in canned_samples().iter().enumerate() {
        let prediction = predict_sample(&model, sample);

        println!("\nSample {}:", i + 1);
        println!(
            "  {} | {} | storage {:.1}h | since cooking {:.2}h | {} | {}",
            sample.food_type,
            sample.storage_condition,
            sample.storage_time,
            sample.time_since_cooking,
            sample.container_type,
            sample.smell
        );
        println!("  Predicted freshness: {}", prediction.level);
        print!("  Probabilities:");
        for (label, p) in probability_map(&model, &prediction) {
            print!(" {}={:.3}", label, p);
        }
        println!();
        println!("  Suggestion: {}", prediction.level.suggestion());
    }

    Ok(())
}
