//! Provider module for Recipe Scout
//!
//! This module contains the AI provider abstraction and implementations
//! for Gemini, Ollama and a deterministic fake.

pub mod base;
pub mod fake;
pub mod gemini;
pub mod ollama;

pub use base::{
    ContentRequest, ContentResponse, GroundingLink, InlineImage, Provider, ProviderCapabilities,
};
pub use fake::FakeProvider;
pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;

use crate::config::ProviderConfig;
use crate::error::{RecipeScoutError, Result};
use std::sync::Arc;
use std::time::Duration;

/// Create a provider instance based on configuration
///
/// # Arguments
///
/// * `config` - Provider configuration; `provider_type` selects the backend
///
/// # Errors
///
/// Returns error if the provider type is unknown or initialization fails
/// (for example a missing Gemini API key)
///
/// # Examples
///
/// ```
/// use recipe_scout::config::ProviderConfig;
/// use recipe_scout::providers::create_provider;
///
/// let config = ProviderConfig {
///     provider_type: "fake".to_string(),
///     ..Default::default()
/// };
/// let provider = create_provider(&config).unwrap();
/// assert_eq!(provider.provider_name(), "fake");
/// ```
pub fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn Provider>> {
    let timeout = Duration::from_secs(config.request_timeout_seconds);

    match config.provider_type.as_str() {
        "gemini" => Ok(Arc::new(GeminiProvider::new(config.gemini.clone(), timeout)?)),
        "ollama" => Ok(Arc::new(OllamaProvider::new(config.ollama.clone(), timeout)?)),
        "fake" => Ok(Arc::new(FakeProvider::with_demo_responses())),
        other => Err(RecipeScoutError::Provider(format!("Unknown provider type: {}", other)).into()),
    }
}
