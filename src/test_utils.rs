//! Test utilities for Recipe Scout
//!
//! Builders for sample domain values plus temporary directory and config
//! helpers shared by unit tests.

use crate::config::Config;
use crate::models::{
    Ingredient, InstructionStep, Nutrition, RecipeRecord, VideoResult, VideoSource,
};
use crate::storage::StorageBackend;
use tempfile::TempDir;

/// Create a temporary directory that is removed when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// A complete recipe with the given title
pub fn sample_recipe(title: &str) -> RecipeRecord {
    RecipeRecord {
        title: title.to_string(),
        description: format!("A weeknight take on {}.", title),
        prep_time: "10 mins".to_string(),
        cook_time: "20 mins".to_string(),
        servings: 4,
        ingredients: vec![
            Ingredient {
                item: "onion".to_string(),
                amount: "1".to_string(),
                note: Some("finely diced".to_string()),
            },
            Ingredient {
                item: "olive oil".to_string(),
                amount: "2 tbsp".to_string(),
                note: None,
            },
        ],
        instructions: vec![
            InstructionStep {
                step_number: 1,
                instruction: "Soften the onion in the oil.".to_string(),
                tip: Some("Add a pinch of salt to stop it catching.".to_string()),
            },
            InstructionStep {
                step_number: 2,
                instruction: "Add the remaining ingredients and simmer.".to_string(),
                tip: None,
            },
        ],
        nutrition: Nutrition {
            calories: 420,
            protein: "18g".to_string(),
            carbs: "52g".to_string(),
            fat: "14g".to_string(),
        },
        difficulty: "Easy".to_string(),
        cuisine: "Home".to_string(),
        rating: 4.4,
        review_count: 128,
    }
}

/// A YouTube-labelled video pointing at `uri`
pub fn sample_video(uri: &str) -> VideoResult {
    VideoResult {
        title: format!("How to cook ({})", uri),
        uri: uri.to_string(),
        source: VideoSource::YouTube,
    }
}

/// A configuration using the fake provider and in-memory storage
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.provider.provider_type = "fake".to_string();
    config.storage.backend = StorageBackend::Memory;
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_sample_recipe_is_valid_json_recipe() {
        let json = serde_json::to_string(&sample_recipe("Soup")).unwrap();
        let parsed: RecipeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.title, "Soup");
    }

    #[test]
    fn test_test_config() {
        let config = test_config();
        assert_eq!(config.provider.provider_type, "fake");
        assert!(config.validate().is_ok());
    }
}
