//! Spoilage Risk Labeling
//!
//! Assigns the ground-truth freshness level for a synthesized record. A
//! risk score starts at a per-region baseline, accumulates a fixed
//! contribution per field, and maps through a three-way threshold:
//!
//!   score <= -0.8          → Fresh
//!   -0.8 < score <= 1.8    → Medium
//!   score > 1.8            → Spoiled
//!
//! The function is pure and total over the vocabularies: unknown strings
//! contribute the neutral branch of their rule, so a hand-edited CSV can
//! still be labeled.

use crate::record::FoodSample;
use crate::vocab::FreshnessLevel;

/// Score at or below which a sample is Fresh.
pub const FRESH_MAX: f64 = -0.8;

/// Score at or below which a sample is Medium (above `FRESH_MAX`).
pub const MEDIUM_MAX: f64 = 1.8;

/// Humid regions carry a small baseline spoilage risk.
pub fn region_baseline(region: &str) -> f64 {
    match region {
        "North" => 0.0,
        "South" => 0.25,
        "West" => 0.15,
        "East" => 0.35,
        "Central" => 0.15,
        "NorthEast" => 0.4,
        _ => 0.0,
    }
}

/// Hours the food sat out between cooking and storing.
fn time_since_cooking_risk(hours: f64) -> f64 {
    if hours <= 0.5 {
        -1.5
    } else if hours <= 2.0 {
        -0.4
    } else if hours <= 6.0 {
        0.6
    } else if hours <= 24.0 {
        1.2
    } else {
        2.0
    }
}

/// Hours kept in storage.
fn storage_time_risk(hours: f64) -> f64 {
    if hours <= 2.0 {
        -1.2
    } else if hours <= 8.0 {
        -0.4
    } else if hours <= 24.0 {
        0.6
    } else {
        1.5
    }
}

/// Accumulate the full risk score for a sample.
///
/// Contribution order matches the field order of the record; each rule is
/// independent except the texture/moisture combination term.
pub fn risk_score(sample: &FoodSample) -> f64 {
    let mut score = region_baseline(&sample.region);

    score += time_since_cooking_risk(sample.time_since_cooking);
    score += storage_time_risk(sample.storage_time);

    // Storage condition dominates every other single factor.
    if sample.storage_condition == "refrigerated" {
        score -= 2.3;
    } else {
        score += 1.0;
    }

    if sample.container_type == "closed" || sample.container_type == "metal" {
        score -= 0.6;
    } else {
        score += 0.6;
    }

    // Smell descriptors are the strongest single indicators.
    match sample.smell.as_str() {
        "sour" | "fermented" => score += 2.5,
        "strong" => score += 1.2,
        _ => {}
    }

    // Texture and moisture combined
    if (sample.texture == "soggy" || sample.texture == "moist") && sample.moisture_type == "wet" {
        score += 1.0;
    }
    match sample.moisture_type.as_str() {
        "wet" => score += 0.9,
        "semi-wet" => score += 0.4,
        _ => {}
    }

    match sample.cooking_method.as_str() {
        "fried" => score -= 0.5,
        "boiled" | "steamed" => score += 0.3,
        _ => {}
    }

    score
}

/// Map a sample to its freshness level through the score thresholds.
pub fn freshness_label(sample: &FoodSample) -> FreshnessLevel {
    let score = risk_score(sample);
    if score <= FRESH_MAX {
        FreshnessLevel::Fresh
    } else if score <= MEDIUM_MAX {
        FreshnessLevel::Medium
    } else {
        FreshnessLevel::Spoiled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn base_sample() -> FoodSample {
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
    fn test_benign_sample_scores_low() {
        // -0.4 (tsc<=2) - 1.2 (st<=2) - 2.3 (fridge) - 0.6 (closed) - 0.5 (fried)
        let sample = base_sample();
        assert_relative_eq!(risk_score(&sample), -5.0, epsilon = 1e-9);
        assert_eq!(freshness_label(&sample), FreshnessLevel::Fresh);
    }

    #[test]
    fn test_adverse_sample_scores_high() {
        let mut sample = base_sample();
        sample.region = "NorthEast".to_string();
        sample.time_since_cooking = 30.0;
        sample.storage_time = 30.0;
        sample.storage_condition = "outside".to_string();
        sample.container_type = "open".to_string();
        sample.smell = "sour".to_string();
        sample.texture = "soggy".to_string();
        sample.moisture_type = "wet".to_string();
        sample.cooking_method = "steamed".to_string();

        // 0.4 + 2.0 + 1.5 + 1.0 + 0.6 + 2.5 + 1.0 + 0.9 + 0.3
        assert_relative_eq!(risk_score(&sample), 10.2, epsilon = 1e-9);
        assert_eq!(freshness_label(&sample), FreshnessLevel::Spoiled);
    }

    #[test]
    fn test_time_since_cooking_brackets() {
        let mut sample = base_sample();
        let cases = [
            (0.5, -1.5),
            (2.0, -0.4),
            (6.0, 0.6),
            (24.0, 1.2),
            (24.01, 2.0),
        ];
        for (hours, expected) in cases {
            sample.time_since_cooking = hours;
            // Everything except the bracket term sums to -4.6 in base_sample.
            assert_relative_eq!(risk_score(&sample), -4.6 + expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_storage_time_brackets() {
        let mut sample = base_sample();
        for (hours, expected) in [(2.0, -1.2), (8.0, -0.4), (24.0, 0.6), (25.0, 1.5)] {
            sample.storage_time = hours;
            sample.storage_condition = "outside".to_string();
            // 1.0 (outside) - 0.4 (tsc) - 0.6 (closed) - 0.5 (fried) = -0.5 fixed
            assert_relative_eq!(risk_score(&sample), -0.5 + expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_smell_dominates() {
        let mut sample = base_sample();
        let neutral = risk_score(&sample);
        sample.smell = "strong".to_string();
        assert_relative_eq!(risk_score(&sample) - neutral, 1.2, epsilon = 1e-9);
        sample.smell = "fermented".to_string();
        assert_relative_eq!(risk_score(&sample) - neutral, 2.5, epsilon = 1e-9);
    }

    #[test]
    fn test_wet_texture_combination() {
        let mut sample = base_sample();
        sample.moisture_type = "wet".to_string();
        let wet_only = risk_score(&sample);
        sample.texture = "soggy".to_string();
        // Combination term stacks on top of the moisture term.
        assert_relative_eq!(risk_score(&sample) - wet_only, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fresh_boundary_is_inclusive() {
        // 0.6 (tsc<=6) - 0.4 (st<=8) - 2.3 (fridge) + 0.6 (open) + 0.4
        // (semi-wet) + 0.3 (boiled) = -0.8
        let mut sample = base_sample();
        sample.time_since_cooking = 3.0;
        sample.storage_time = 5.0;
        sample.container_type = "open".to_string();
        sample.moisture_type = "semi-wet".to_string();
        sample.cooking_method = "boiled".to_string();

        assert_relative_eq!(risk_score(&sample), FRESH_MAX, epsilon = 1e-9);
        assert_eq!(freshness_label(&sample), FreshnessLevel::Fresh);
    }

    #[test]
    fn test_medium_boundary_is_inclusive() {
        // -0.4 (tsc<=2) + 0.6 (st<=24) + 1.0 (outside) + 0.6 (open) = 1.8
        let mut sample = base_sample();
        sample.storage_time = 20.0;
        sample.storage_condition = "outside".to_string();
        sample.container_type = "open".to_string();
        sample.cooking_method = "baked".to_string();

        assert_relative_eq!(risk_score(&sample), MEDIUM_MAX, epsilon = 1e-9);
        assert_eq!(freshness_label(&sample), FreshnessLevel::Medium);

        sample.cooking_method = "boiled".to_string();
        assert_eq!(freshness_label(&sample), FreshnessLevel::Spoiled);
    }

    #[test]
    fn test_unknown_region_contributes_nothing() {
        let mut sample = base_sample();
        sample.region = "Unknown".to_string();
        assert_relative_eq!(risk_score(&sample), -5.0, epsilon = 1e-9);
    }
}
