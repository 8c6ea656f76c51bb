//! Error types for Recipe Scout
//!
//! This module defines the crate-wide error type and the typed failures
//! each layer reports, using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Recipe Scout operations
///
/// Covers configuration loading, provider interactions, recipe generation,
/// history persistence and connectivity checks.
#[derive(Error, Debug)]
pub enum RecipeScoutError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (API calls, authentication, etc.)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Recipe generation failed; the user should retry
    #[error("Recipe generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// History persistence failed
    #[error("History error: {0}")]
    Persistence(#[from] PersistenceError),

    /// The machine has no network connectivity
    #[error("You appear to be offline. Check your connection and try again.")]
    Offline,

    /// The search query was blank
    #[error("Enter a dish name or some ingredients to search for")]
    EmptyQuery,

    /// Missing credentials for provider
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// A saved session could not be found
    #[error("No saved recipe with id {0}")]
    SessionNotFound(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failure to produce a usable recipe from the AI service
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The provider call itself failed
    #[error("service request failed: {0}")]
    Request(String),

    /// The service answered without any text content
    #[error("service returned no content")]
    EmptyResponse,

    /// The content did not match the recipe shape
    #[error("service returned an invalid recipe: {0}")]
    InvalidRecipe(String),
}

/// Failure to read or write the history log
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The underlying key-value store failed
    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),

    /// The log could not be serialized or deserialized
    #[error("serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A rating outside 1..=5 was supplied
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),
}

/// Failure reported by a key-value storage backend
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backend could not be opened
    #[error("failed to open storage: {0}")]
    Open(String),

    /// Reading a key failed
    #[error("read failed: {0}")]
    Read(String),

    /// Writing a key failed (quota, disk, permissions)
    #[error("write failed: {0}")]
    Write(String),
}

/// Result type alias for Recipe Scout operations
///
/// Uses `anyhow::Error` so application code can attach context while the
/// typed errors above remain available through `downcast_ref`.
pub type Result<T> = anyhow::Result<T>;
