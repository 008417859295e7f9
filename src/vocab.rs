//! Categorical Vocabularies
//!
//! Fixed option sets shared by the dataset synthesizer, the feature
//! encoder, and the desktop form. The form's dropdowns and the training
//! columns must agree exactly, so every vocabulary lives here and nowhere
//! else.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const FOOD_TYPES: &[&str] = &["Vegetarian", "Non-Vegetarian", "Seafood", "Dairy", "Bakery"];

pub const TEXTURE_DESCRIPTORS: &[&str] = &["soft", "firm", "crispy", "soggy", "dry", "moist"];

pub const SMELL_DESCRIPTORS: &[&str] = &["neutral", "slight", "strong", "sour", "fermented"];

pub const STORAGE_CONDITIONS: &[&str] = &["refrigerated", "outside"];

pub const MOISTURE_TYPES: &[&str] = &["dry", "semi-wet", "wet"];

pub const COOKING_METHODS: &[&str] = &["fried", "boiled", "steamed", "baked"];

pub const CONTAINER_TYPES: &[&str] = &["open", "closed", "metal", "plastic"];

/// Three-valued spoilage-risk label.
///
/// Ordering is by increasing risk, which is also the sorted string order
/// ("Fresh" < "Medium" < "Spoiled") the classifier relies on for its
/// class-index layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FreshnessLevel {
    Fresh,
    Medium,
    Spoiled,
}

impl FreshnessLevel {
    pub const ALL: [FreshnessLevel; 3] = [
        FreshnessLevel::Fresh,
        FreshnessLevel::Medium,
        FreshnessLevel::Spoiled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FreshnessLevel::Fresh => "Fresh",
            FreshnessLevel::Medium => "Medium",
            FreshnessLevel::Spoiled => "Spoiled",
        }
    }

    /// Serving suggestion shown underneath the predicted label.
    pub fn suggestion(&self) -> &'static str {
        match self {
            FreshnessLevel::Fresh => "Perfect to eat",
            FreshnessLevel::Medium => "Good to eat",
            FreshnessLevel::Spoiled => "Not recommended, don't eat",
        }
    }

    /// Stable class index (sorted label order).
    pub fn class_index(&self) -> usize {
        *self as usize
    }

    pub fn from_class_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }
}

impl fmt::Display for FreshnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FreshnessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Fresh" => Ok(FreshnessLevel::Fresh),
            "Medium" => Ok(FreshnessLevel::Medium),
            "Spoiled" => Ok(FreshnessLevel::Spoiled),
            other => Err(format!("unknown freshness level: '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for level in FreshnessLevel::ALL {
            assert_eq!(level.as_str().parse::<FreshnessLevel>().unwrap(), level);
            assert_eq!(
                FreshnessLevel::from_class_index(level.class_index()).unwrap(),
                level
            );
        }
    }

    #[test]
    fn test_class_index_is_sorted_string_order() {
        let mut names: Vec<&str> = FreshnessLevel::ALL.iter().map(|l| l.as_str()).collect();
        names.sort_unstable();
        for (idx, name) in names.iter().enumerate() {
            assert_eq!(FreshnessLevel::ALL[idx].as_str(), *name);
        }
    }

    #[test]
    fn test_vocabularies_have_no_duplicates() {
        for vocab in [
            FOOD_TYPES,
            TEXTURE_DESCRIPTORS,
            SMELL_DESCRIPTORS,
            STORAGE_CONDITIONS,
            MOISTURE_TYPES,
            COOKING_METHODS,
            CONTAINER_TYPES,
        ] {
            let mut seen = std::collections::HashSet::new();
            for option in vocab {
                assert!(seen.insert(option), "duplicate option '{}'", option);
            }
        }
    }
}
