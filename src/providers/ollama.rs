//! Ollama provider implementation for Recipe Scout
//!
//! Connects to a local or remote Ollama server. Structured output is
//! requested through the `format` field; Ollama has no search grounding or
//! image generation, so video lookups come back empty and image requests
//! are reported as unsupported.

use crate::config::OllamaConfig;
use crate::error::{RecipeScoutError, Result};
use crate::providers::{ContentRequest, ContentResponse, Provider, ProviderCapabilities};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ollama API provider
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use recipe_scout::config::OllamaConfig;
/// use recipe_scout::providers::OllamaProvider;
///
/// let config = OllamaConfig {
///     host: "http://localhost:11434".to_string(),
///     model: "llama3.2:latest".to_string(),
/// };
/// let provider = OllamaProvider::new(config, Duration::from_secs(120));
/// assert!(provider.is_ok());
/// ```
pub struct OllamaProvider {
    client: Client,
    config: OllamaConfig,
}

/// Request structure for Ollama API
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    messages: Vec<OllamaMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<serde_json::Value>,
    stream: bool,
}

/// Message structure for Ollama API
#[derive(Debug, Serialize, Deserialize)]
struct OllamaMessage {
    role: String,
    #[serde(default)]
    content: String,
}

/// Response structure from Ollama API
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaMessage,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    prompt_eval_count: usize,
    #[serde(default)]
    eval_count: usize,
}

impl OllamaProvider {
    /// Create a new Ollama provider instance
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: OllamaConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("recipe-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                RecipeScoutError::Provider(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            "Initialized Ollama provider: host={}, model={}",
            config.host,
            config.model
        );

        Ok(Self { client, config })
    }

    /// Get the configured Ollama host
    pub fn host(&self) -> &str {
        &self.config.host
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    async fn generate_content(&self, request: &ContentRequest) -> Result<ContentResponse> {
        if request.web_search {
            tracing::debug!("Ollama has no web search; answering without grounding");
        }

        let url = format!("{}/api/chat", self.config.host.trim_end_matches('/'));

        let ollama_request = OllamaRequest {
            model: self.config.model.clone(),
            messages: vec![OllamaMessage {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
            format: request.response_schema.clone(),
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&ollama_request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Ollama request failed: {}", e);
                RecipeScoutError::Provider(format!("Ollama request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Ollama returned error {}: {}", status, error_text);
            return Err(RecipeScoutError::Provider(format!(
                "Ollama returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let ollama_response: OllamaResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Ollama response: {}", e);
            RecipeScoutError::Provider(format!("Failed to parse Ollama response: {}", e))
        })?;

        tracing::debug!(
            "Ollama response: done={}, prompt_tokens={}, completion_tokens={}",
            ollama_response.done,
            ollama_response.prompt_eval_count,
            ollama_response.eval_count
        );

        let content = ollama_response.message.content;
        Ok(ContentResponse {
            text: if content.trim().is_empty() {
                None
            } else {
                Some(content)
            },
            grounding: Vec::new(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }

    fn model_name(&self) -> String {
        self.config.model.clone()
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            supports_structured_output: true,
            supports_web_search: false,
            supports_images: false,
        }
    }
}
