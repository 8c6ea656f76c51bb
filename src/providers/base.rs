//! Base provider trait and common types for Recipe Scout
//!
//! This module defines the Provider trait that all AI backends implement,
//! along with the request and response shapes the recipe, video and image
//! clients exchange with them.

use crate::error::{RecipeScoutError, Result};
use async_trait::async_trait;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A content generation request
///
/// # Examples
///
/// ```
/// use recipe_scout::providers::ContentRequest;
///
/// let request = ContentRequest::new("Suggest a soup").with_web_search();
/// assert!(request.web_search);
/// assert!(request.response_schema.is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContentRequest {
    /// Natural-language instruction
    pub prompt: String,
    /// JSON schema the response text must conform to
    pub response_schema: Option<serde_json::Value>,
    /// Ground the answer with a web search
    pub web_search: bool,
}

impl ContentRequest {
    /// Create a plain text request
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    /// Request JSON output matching `schema`
    pub fn with_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    /// Enable web-search grounding
    pub fn with_web_search(mut self) -> Self {
        self.web_search = true;
        self
    }
}

/// A web citation returned alongside a grounded answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingLink {
    pub uri: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// Response from a content generation call
#[derive(Debug, Clone, Default)]
pub struct ContentResponse {
    /// Concatenated text parts, `None` when the model produced no text
    pub text: Option<String>,
    /// Grounding citations (empty unless web search was requested)
    pub grounding: Vec<GroundingLink>,
}

impl ContentResponse {
    /// A response carrying only text
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            grounding: Vec::new(),
        }
    }
}

/// An inline, base64-encoded image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineImage {
    /// MIME type reported by the service (e.g. "image/png")
    pub mime_type: String,
    /// Base64 payload
    pub data: String,
}

impl InlineImage {
    /// Decode the payload to raw bytes
    ///
    /// # Errors
    ///
    /// Returns error if the payload is not valid base64
    pub fn decode(&self) -> Result<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| RecipeScoutError::Provider(format!("Invalid image payload: {}", e)).into())
    }

    /// A `data:` URI suitable for embedding
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// File extension matching the decoded image format
    ///
    /// Falls back to the MIME subtype when the bytes are not recognised.
    pub fn extension(&self) -> String {
        self.decode()
            .ok()
            .and_then(|bytes| image::guess_format(&bytes).ok())
            .and_then(|format| format.extensions_str().first().copied())
            .map(str::to_string)
            .unwrap_or_else(|| {
                self.mime_type
                    .rsplit('/')
                    .next()
                    .filter(|s| !s.is_empty())
                    .unwrap_or("img")
                    .to_string()
            })
    }

    /// Decode and write the image to `path`
    ///
    /// When `path` has no extension one is added from the detected format.
    /// Returns the path actually written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let mut path = path.as_ref().to_path_buf();
        if path.extension().is_none() {
            path.set_extension(self.extension());
        }

        let bytes = self.decode()?;
        std::fs::write(&path, bytes)?;
        Ok(path)
    }
}

/// Features a provider supports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProviderCapabilities {
    /// JSON output constrained by a schema
    pub supports_structured_output: bool,
    /// Web-search grounding with citations
    pub supports_web_search: bool,
    /// Image generation
    pub supports_images: bool,
}

/// Provider trait for AI backends
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use recipe_scout::providers::{ContentRequest, ContentResponse, Provider, ProviderCapabilities};
/// use recipe_scout::error::Result;
///
/// struct EchoProvider;
///
/// #[async_trait]
/// impl Provider for EchoProvider {
///     async fn generate_content(&self, request: &ContentRequest) -> Result<ContentResponse> {
///         Ok(ContentResponse::text(request.prompt.clone()))
///     }
///
///     fn provider_name(&self) -> &'static str {
///         "echo"
///     }
///
///     fn model_name(&self) -> String {
///         "echo-1".to_string()
///     }
///
///     fn capabilities(&self) -> ProviderCapabilities {
///         ProviderCapabilities::default()
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Generate text (optionally schema-constrained or search-grounded)
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed
    async fn generate_content(&self, request: &ContentRequest) -> Result<ContentResponse>;

    /// Generate a photographic image for `prompt`
    ///
    /// Returns `Ok(None)` when the service answers without an image.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the provider has no image
    /// support
    async fn generate_image(&self, _prompt: &str) -> Result<Option<InlineImage>> {
        Err(RecipeScoutError::Provider(format!(
            "Image generation is not supported by the {} provider",
            self.provider_name()
        ))
        .into())
    }

    /// Provider name (e.g., "gemini", "ollama", "fake")
    fn provider_name(&self) -> &'static str;

    /// Model used for content generation
    fn model_name(&self) -> String;

    /// Supported features
    fn capabilities(&self) -> ProviderCapabilities;
}
