use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use recipe_scout::history::HistoryStore;
use recipe_scout::models::{
    Ingredient, InstructionStep, Nutrition, RecipeRecord, VideoResult, VideoSource,
};
use recipe_scout::storage::{KeyValueStore, SqliteStore};

#[allow(dead_code)]
pub fn create_temp_history() -> (HistoryStore, Arc<SqliteStore>, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let store = Arc::new(
        SqliteStore::open(tmp.path().join("history.db")).expect("failed to open sqlite store"),
    );
    let history = HistoryStore::new(store.clone() as Arc<dyn KeyValueStore>);
    (history, store, tmp)
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

#[allow(dead_code)]
pub fn recipe(title: &str) -> RecipeRecord {
    RecipeRecord {
        title: title.to_string(),
        description: format!("{} the way a home cook makes it.", title),
        prep_time: "15 mins".to_string(),
        cook_time: "30 mins".to_string(),
        servings: 2,
        ingredients: vec![Ingredient {
            item: "garlic".to_string(),
            amount: "2 cloves".to_string(),
            note: None,
        }],
        instructions: vec![InstructionStep {
            step_number: 1,
            instruction: "Cook everything together.".to_string(),
            tip: None,
        }],
        nutrition: Nutrition {
            calories: 500,
            protein: "20g".to_string(),
            carbs: "60g".to_string(),
            fat: "15g".to_string(),
        },
        difficulty: "Medium".to_string(),
        cuisine: "Fusion".to_string(),
        rating: 4.1,
        review_count: 57,
    }
}

#[allow(dead_code)]
pub fn recipe_json(title: &str) -> String {
    serde_json::to_string(&recipe(title)).expect("serialize recipe")
}

#[allow(dead_code)]
pub fn video(uri: &str) -> VideoResult {
    VideoResult {
        title: "Cooking video".to_string(),
        uri: uri.to_string(),
        source: VideoSource::YouTube,
    }
}
