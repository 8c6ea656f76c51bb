//! Recipe Scout - AI recipe assistant library
//!
//! This library turns a dish name or a list of ingredients into a
//! structured recipe, finds supporting cooking videos, generates dish
//! photos, and keeps a bounded, rated history of past searches in local
//! durable storage.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `storage`: Key-value slot backends (sled, SQLite, in-memory)
//! - `history`: The bounded, newest-first history log with ratings
//! - `providers`: AI provider abstraction and implementations (Gemini, Ollama, fake)
//! - `prompts`: Prompt builders and the recipe response schema
//! - `clients`: Recipe, video and image clients over a provider
//! - `connectivity`: Offline detection before any provider call
//! - `assistant`: Search orchestration and view states
//! - `render` / `commands` / `cli`: Terminal presentation
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use recipe_scout::history::HistoryStore;
//! use recipe_scout::models::UserRating;
//! use recipe_scout::storage::MemoryStore;
//!
//! let history = HistoryStore::new(Arc::new(MemoryStore::new()));
//! let log = history.set_rating("unknown", UserRating::new(5).unwrap()).unwrap();
//! assert!(log.is_empty());
//! ```

pub mod assistant;
pub mod cli;
pub mod clients;
pub mod commands;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod history;
pub mod models;
pub mod prompts;
pub mod providers;
pub mod render;
pub mod storage;

// Re-export commonly used types
pub use assistant::{RecipeAssistant, SearchOutcome, SearchRequest, ViewState};
pub use config::Config;
pub use error::{GenerationError, PersistenceError, RecipeScoutError, Result, StorageError};
pub use history::{HistoryStore, HISTORY_CAPACITY, HISTORY_KEY};

#[cfg(test)]
pub mod test_utils;
