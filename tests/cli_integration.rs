//! CLI tests for the recipe-scout binary using the fake provider

use std::path::Path;
use std::sync::Arc;

use assert_cmd::Command;
use predicates::prelude::*;
use recipe_scout::history::HistoryStore;
use recipe_scout::storage::SqliteStore;
use tempfile::TempDir;

mod common;

/// A command wired to the fake provider and a SQLite file in `dir`
fn recipe_scout(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("recipe-scout").unwrap();
    cmd.env("RECIPE_SCOUT_PROVIDER", "fake")
        .env("RECIPE_SCOUT_STORAGE_BACKEND", "sqlite")
        .env("RECIPE_SCOUT_STORAGE_PATH", dir.join("history.db"))
        .env("NO_COLOR", "1")
        .env_remove("RECIPE_SCOUT_OFFLINE")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(dir.join("missing-config.yaml"));
    cmd
}

fn saved_ids(dir: &Path) -> Vec<String> {
    let store = SqliteStore::open(dir.join("history.db")).unwrap();
    HistoryStore::new(Arc::new(store))
        .list()
        .into_iter()
        .map(|s| s.id)
        .collect()
}

#[test]
fn test_search_prints_recipe_and_saves() {
    let tmp = TempDir::new().unwrap();

    recipe_scout(tmp.path())
        .args(["search", "garlic", "pasta"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Garlic Butter Pasta"))
        .stdout(predicate::str::contains("Ingredients"))
        .stdout(predicate::str::contains("youtube.com"))
        .stdout(predicate::str::contains("Saved as"));

    assert_eq!(saved_ids(tmp.path()).len(), 1);
}

#[test]
fn test_missing_config_file_is_logged() {
    let tmp = TempDir::new().unwrap();

    recipe_scout(tmp.path())
        .args(["history", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_history_rate_show_and_clear() {
    let tmp = TempDir::new().unwrap();

    recipe_scout(tmp.path())
        .args(["search", "pasta"])
        .assert()
        .success();
    let id = saved_ids(tmp.path()).remove(0);

    recipe_scout(tmp.path())
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(id.as_str()))
        .stdout(predicate::str::contains("Garlic Butter Pasta"));

    recipe_scout(tmp.path())
        .args(["history", "rate", id.as_str(), "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5 out of 5"));

    recipe_scout(tmp.path())
        .args(["history", "show", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Your rating:"));

    recipe_scout(tmp.path())
        .args(["history", "clear"])
        .assert()
        .success();

    recipe_scout(tmp.path())
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved recipes yet."));
}

#[test]
fn test_image_command_writes_file() {
    let tmp = TempDir::new().unwrap();

    recipe_scout(tmp.path())
        .args(["search", "pasta"])
        .assert()
        .success();
    let id = saved_ids(tmp.path()).remove(0);

    recipe_scout(tmp.path())
        .args(["image", id.as_str(), "--output"])
        .arg(tmp.path().join("dish"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved photo"));

    assert!(tmp.path().join("dish.png").exists());
}

#[test]
fn test_offline_search_fails_without_saving() {
    let tmp = TempDir::new().unwrap();

    recipe_scout(tmp.path())
        .args(["--offline", "search", "pasta"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("offline"));

    assert!(saved_ids(tmp.path()).is_empty());
}

#[test]
fn test_rate_unknown_id_fails() {
    let tmp = TempDir::new().unwrap();

    recipe_scout(tmp.path())
        .args(["history", "rate", "01NOTAREALID0000000000000", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No saved recipe with id"));
}

#[test]
fn test_rate_out_of_range_rejected_by_parser() {
    let tmp = TempDir::new().unwrap();

    recipe_scout(tmp.path())
        .args(["history", "rate", "01ABC", "7"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_provider_in_config_fails_validation() {
    let (_config_dir, config_path) = common::temp_config_file("provider:\n  type: copilot\n");
    let data = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("recipe-scout").unwrap();
    cmd.env_remove("RECIPE_SCOUT_PROVIDER")
        .env("RECIPE_SCOUT_STORAGE_BACKEND", "memory")
        .env("RECIPE_SCOUT_STORAGE_PATH", data.path())
        .arg("--config")
        .arg(config_path)
        .args(["history", "list"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid provider type"));
}
