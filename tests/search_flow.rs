//! End-to-end search flow with a fake provider and durable history

use std::sync::Arc;

use recipe_scout::assistant::{RecipeAssistant, SearchRequest, ViewState};
use recipe_scout::connectivity::{AlwaysOffline, AlwaysOnline};
use recipe_scout::error::RecipeScoutError;
use recipe_scout::history::HistoryStore;
use recipe_scout::models::{SearchFilters, SearchMode, UserRating};
use recipe_scout::providers::{FakeProvider, GroundingLink};
use recipe_scout::storage::{KeyValueStore, SqliteStore};
use tempfile::TempDir;

mod common;

fn durable_history(tmp: &TempDir) -> Arc<HistoryStore> {
    let store: Arc<dyn KeyValueStore> =
        Arc::new(SqliteStore::open(tmp.path().join("history.db")).unwrap());
    Arc::new(HistoryStore::new(store))
}

fn grounding() -> Vec<GroundingLink> {
    vec![
        GroundingLink {
            uri: "https://www.youtube.com/watch?v=frittata".to_string(),
            title: Some("Frittata in 10 minutes".to_string()),
        },
        GroundingLink {
            uri: "https://example.com/frittata".to_string(),
            title: Some("Frittata recipe".to_string()),
        },
    ]
}

#[tokio::test]
async fn test_ingredient_search_is_saved_and_rated() {
    let tmp = TempDir::new().unwrap();
    let history = durable_history(&tmp);
    let provider = Arc::new(
        FakeProvider::new()
            .with_response("Return the recipe", &common::recipe_json("Spinach Frittata"))
            .with_grounding(grounding()),
    );
    let assistant = RecipeAssistant::new(provider.clone(), history.clone(), Arc::new(AlwaysOnline));

    let request = SearchRequest::new("eggs, spinach")
        .with_mode(SearchMode::Ingredients)
        .with_filters(SearchFilters {
            dietary: vec!["vegetarian".to_string()],
            ..Default::default()
        });
    let outcome = assistant.search(&request).await.expect("search");

    assert_eq!(outcome.recipe.title, "Spinach Frittata");
    assert_eq!(outcome.videos.len(), 1);
    assert_eq!(provider.call_count(), 2);

    let saved = outcome.saved.expect("saved");
    assert_eq!(saved.query, "eggs, spinach");
    assert_eq!(saved.videos, outcome.videos);

    history
        .set_rating(&saved.id, UserRating::new(5).unwrap())
        .unwrap();

    // A fresh store over the same file sees the rating
    let reopened = durable_history(&tmp);
    let log = reopened.list();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].user_rating, Some(UserRating::new(5).unwrap()));
}

#[tokio::test]
async fn test_failed_recipe_leaves_history_untouched() {
    let tmp = TempDir::new().unwrap();
    let history = durable_history(&tmp);
    history
        .append("earlier", common::recipe("Earlier"), vec![])
        .unwrap();

    let provider = Arc::new(FakeProvider::new().with_response("Return the recipe", "not json"));
    let assistant = RecipeAssistant::new(provider, history.clone(), Arc::new(AlwaysOnline));

    let state = assistant
        .search_with_view(&SearchRequest::new("soup"), |_| {})
        .await;
    match state {
        ViewState::Error { message } => assert!(message.contains("try again")),
        other => panic!("unexpected state: {:?}", other),
    }

    let log = history.list();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].query, "earlier");
}

#[tokio::test]
async fn test_offline_search_short_circuits() {
    let tmp = TempDir::new().unwrap();
    let history = durable_history(&tmp);
    let provider = Arc::new(FakeProvider::with_demo_responses());
    let assistant = RecipeAssistant::new(provider.clone(), history.clone(), Arc::new(AlwaysOffline));

    let err = assistant
        .search(&SearchRequest::new("pasta"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<RecipeScoutError>(),
        Some(RecipeScoutError::Offline)
    ));
    assert_eq!(provider.call_count(), 0);
    assert!(history.list().is_empty());
}

#[tokio::test]
async fn test_many_searches_stay_bounded() {
    let tmp = TempDir::new().unwrap();
    let history = durable_history(&tmp);
    let provider = Arc::new(FakeProvider::with_demo_responses());
    let assistant = RecipeAssistant::new(provider, history.clone(), Arc::new(AlwaysOnline));

    for n in 0..25 {
        assistant
            .search(&SearchRequest::new(format!("pasta {}", n)))
            .await
            .unwrap();
    }

    let log = history.list();
    assert_eq!(log.len(), 20);
    assert_eq!(log[0].query, "pasta 24");
    assert_eq!(log[19].query, "pasta 5");
}
