//! Search orchestration
//!
//! `RecipeAssistant` ties the clients, the history store and the
//! connectivity check together. A search runs the recipe and video
//! lookups concurrently, then records the result in history. Only a recipe
//! failure (or being offline) fails the search; video and persistence
//! problems are carried in the outcome instead.

use crate::clients::{ImageLookupClient, RecipeGenerationClient, VideoLookupClient};
use crate::config::Config;
use crate::connectivity::{connectivity_from_config, Connectivity};
use crate::error::{RecipeScoutError, Result};
use crate::history::HistoryStore;
use crate::models::{
    Degradable, RecipeRecord, SavedSession, SearchFilters, SearchMode, VideoResult,
};
use crate::providers::{create_provider, InlineImage, Provider};
use crate::storage::open_store;
use std::sync::Arc;

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchRequest {
    /// Query text exactly as typed
    pub query: String,
    pub mode: SearchMode,
    pub filters: SearchFilters,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }
}

/// Result of a successful search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub recipe: RecipeRecord,
    pub videos: Vec<VideoResult>,
    /// Set when the video lookup failed and `videos` is an empty fallback
    pub videos_degraded: Option<String>,
    /// The history entry, when it was saved
    pub saved: Option<SavedSession>,
    /// Why the history entry could not be saved
    pub persistence_error: Option<String>,
}

/// Presentation state for one search
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// Nothing requested yet
    Idle,
    /// A search is in flight
    Loading { query: String },
    /// A recipe is ready to show
    Success(Box<SearchOutcome>),
    /// The search failed; `message` is meant for the user
    Error { message: String },
}

impl ViewState {
    /// Map a search failure to a user-facing message
    pub fn from_error(err: &anyhow::Error) -> Self {
        let message = match err.downcast_ref::<RecipeScoutError>() {
            Some(RecipeScoutError::Offline) | Some(RecipeScoutError::EmptyQuery) => {
                err.to_string()
            }
            Some(RecipeScoutError::Generation(_)) => {
                "Sorry, we couldn't create a recipe for that. Please try again.".to_string()
            }
            _ => format!("Something went wrong: {}", err),
        };
        ViewState::Error { message }
    }

    /// Whether the state ends a search
    pub fn is_terminal(&self) -> bool {
        matches!(self, ViewState::Success(_) | ViewState::Error { .. })
    }
}

/// The recipe assistant
pub struct RecipeAssistant {
    provider: Arc<dyn Provider>,
    recipes: RecipeGenerationClient,
    videos: VideoLookupClient,
    images: ImageLookupClient,
    history: Arc<HistoryStore>,
    connectivity: Arc<dyn Connectivity>,
}

impl RecipeAssistant {
    /// Assemble an assistant from its parts
    pub fn new(
        provider: Arc<dyn Provider>,
        history: Arc<HistoryStore>,
        connectivity: Arc<dyn Connectivity>,
    ) -> Self {
        Self {
            recipes: RecipeGenerationClient::new(provider.clone()),
            videos: VideoLookupClient::new(provider.clone()),
            images: ImageLookupClient::new(provider.clone()),
            provider,
            history,
            connectivity,
        }
    }

    /// Build the provider, history store and connectivity check from config
    ///
    /// # Errors
    ///
    /// Returns error if the provider cannot be created (for example a
    /// missing API key) or the storage backend cannot be opened
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = create_provider(&config.provider)?;
        let store = open_store(&config.storage)?;
        let history = Arc::new(HistoryStore::new(Arc::from(store)));
        Ok(Self::new(provider, history, connectivity_from_config(config)))
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }

    /// Run a search and record it in history
    ///
    /// # Errors
    ///
    /// Returns `RecipeScoutError::EmptyQuery` for a blank query,
    /// `RecipeScoutError::Offline` when connectivity is missing (no
    /// provider call is made), and `RecipeScoutError::Generation` when no
    /// recipe could be produced (nothing is saved).
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome> {
        if request.query.trim().is_empty() {
            return Err(RecipeScoutError::EmptyQuery.into());
        }

        if !self.connectivity.is_online().await {
            tracing::warn!("Offline; search for {:?} not sent", request.query);
            return Err(RecipeScoutError::Offline.into());
        }

        tracing::info!(query = %request.query, mode = %request.mode, "Searching");

        let (recipe, videos) = tokio::join!(
            self.recipes
                .generate(&request.query, request.mode, &request.filters),
            self.videos.find_detailed(&request.query)
        );
        let recipe = recipe.map_err(RecipeScoutError::Generation)?;
        let Degradable {
            value: videos,
            degraded: videos_degraded,
        } = videos;

        let (saved, persistence_error) =
            match self
                .history
                .append(&request.query, recipe.clone(), videos.clone())
            {
                Ok(session) => (Some(session), None),
                Err(e) => {
                    tracing::warn!("Search not saved to history: {}", e);
                    (None, Some(e.to_string()))
                }
            };

        Ok(SearchOutcome {
            recipe,
            videos,
            videos_degraded,
            saved,
            persistence_error,
        })
    }

    /// Run a search, reporting each view state as it is entered
    ///
    /// Calls `on_state` with `Loading` and then exactly one terminal state,
    /// which is also returned.
    pub async fn search_with_view<F>(&self, request: &SearchRequest, mut on_state: F) -> ViewState
    where
        F: FnMut(&ViewState),
    {
        on_state(&ViewState::Loading {
            query: request.query.clone(),
        });

        let state = match self.search(request).await {
            Ok(outcome) => ViewState::Success(Box::new(outcome)),
            Err(e) => {
                tracing::error!("Search failed: {:#}", e);
                ViewState::from_error(&e)
            }
        };

        on_state(&state);
        state
    }

    /// Generate a photo for a recipe's detail view
    pub async fn dish_photo(&self, recipe: &RecipeRecord) -> Degradable<Option<InlineImage>> {
        let description = format!("{}, {}", recipe.title, recipe.description);
        self.images.generate_detailed(&description).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectivity::{AlwaysOffline, AlwaysOnline};
    use crate::providers::{FakeProvider, GroundingLink};
    use crate::storage::MemoryStore;
    use crate::test_utils::sample_recipe;

    fn recipe_json() -> String {
        serde_json::to_string(&sample_recipe("Tom Yum")).unwrap()
    }

    fn assistant(provider: Arc<FakeProvider>, online: bool) -> RecipeAssistant {
        let history = Arc::new(HistoryStore::new(Arc::new(MemoryStore::new())));
        let connectivity: Arc<dyn Connectivity> = if online {
            Arc::new(AlwaysOnline)
        } else {
            Arc::new(AlwaysOffline)
        };
        RecipeAssistant::new(provider, history, connectivity)
    }

    #[tokio::test]
    async fn test_search_saves_session() {
        let provider = Arc::new(
            FakeProvider::new()
                .with_response("Return the recipe", &recipe_json())
                .with_grounding(vec![GroundingLink {
                    uri: "https://youtu.be/tomyum".to_string(),
                    title: Some("Tom Yum".to_string()),
                }]),
        );
        let assistant = assistant(provider, true);

        let outcome = assistant.search(&SearchRequest::new("tom yum")).await.unwrap();
        assert_eq!(outcome.recipe.title, "Tom Yum");
        assert_eq!(outcome.videos.len(), 1);
        assert!(outcome.videos_degraded.is_none());

        let saved = outcome.saved.unwrap();
        let history = assistant.history().list();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, saved.id);
        assert_eq!(history[0].query, "tom yum");
    }

    #[tokio::test]
    async fn test_video_failure_still_saves() {
        let provider = Arc::new(
            FakeProvider::new()
                .with_response("Return the recipe", &recipe_json())
                .with_failure("video tutorials", "search tool down"),
        );
        let assistant = assistant(provider, true);

        let outcome = assistant.search(&SearchRequest::new("tom yum")).await.unwrap();
        assert!(outcome.videos.is_empty());
        assert!(outcome.videos_degraded.is_some());
        assert!(outcome.saved.unwrap().videos.is_empty());
    }

    #[tokio::test]
    async fn test_recipe_failure_saves_nothing() {
        let provider = Arc::new(FakeProvider::new().with_failure("Return the recipe", "500"));
        let assistant = assistant(provider, true);

        let err = assistant
            .search(&SearchRequest::new("tom yum"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RecipeScoutError>(),
            Some(RecipeScoutError::Generation(_))
        ));
        assert!(assistant.history().list().is_empty());
    }

    #[tokio::test]
    async fn test_offline_makes_no_provider_call() {
        let provider = Arc::new(FakeProvider::with_demo_responses());
        let assistant = assistant(provider.clone(), false);

        let err = assistant
            .search(&SearchRequest::new("tom yum"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RecipeScoutError>(),
            Some(RecipeScoutError::Offline)
        ));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_query_rejected() {
        let provider = Arc::new(FakeProvider::with_demo_responses());
        let assistant = assistant(provider.clone(), true);
        assert!(assistant.search(&SearchRequest::new("   ")).await.is_err());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_search_with_view_transitions() {
        let provider = Arc::new(FakeProvider::with_demo_responses());
        let assistant = assistant(provider, true);

        let mut seen = Vec::new();
        let state = assistant
            .search_with_view(&SearchRequest::new("pasta"), |s| seen.push(s.clone()))
            .await;

        assert_eq!(seen.len(), 2);
        assert!(matches!(seen[0], ViewState::Loading { .. }));
        assert!(state.is_terminal());
        assert!(matches!(state, ViewState::Success(_)));
    }

    #[tokio::test]
    async fn test_search_with_view_offline_message() {
        let assistant = assistant(Arc::new(FakeProvider::with_demo_responses()), false);
        let state = assistant
            .search_with_view(&SearchRequest::new("pasta"), |_| {})
            .await;
        match state {
            ViewState::Error { message } => assert!(message.contains("offline")),
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dish_photo() {
        let assistant = assistant(Arc::new(FakeProvider::with_demo_responses()), true);
        let photo = assistant.dish_photo(&sample_recipe("Pasta")).await;
        assert!(photo.value.is_some());
    }

    #[test]
    fn test_idle_is_not_terminal() {
        assert!(!ViewState::Idle.is_terminal());
        assert!(!ViewState::Loading {
            query: "x".to_string()
        }
        .is_terminal());
    }
}
