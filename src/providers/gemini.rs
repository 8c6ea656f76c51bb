//! Gemini provider implementation for Recipe Scout
//!
//! Talks to the Generative Language REST API. Supports schema-constrained
//! JSON output, Google Search grounding and inline image generation.

use crate::config::GeminiConfig;
use crate::error::{RecipeScoutError, Result};
use crate::providers::{
    ContentRequest, ContentResponse, GroundingLink, InlineImage, Provider, ProviderCapabilities,
};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gemini API provider
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use recipe_scout::config::GeminiConfig;
/// use recipe_scout::providers::{ContentRequest, GeminiProvider, Provider};
///
/// # async fn example() -> recipe_scout::error::Result<()> {
/// let config = GeminiConfig {
///     api_key: Some("key".to_string()),
///     ..Default::default()
/// };
/// let provider = GeminiProvider::new(config, Duration::from_secs(60))?;
/// let response = provider.generate_content(&ContentRequest::new("Hello")).await?;
/// # Ok(())
/// # }
/// ```
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
    api_key: String,
}

/// Request body for `:generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineImage>,
}

#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
}

/// Response body from `:generateContent`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<GroundingLink>,
}

impl GeminiProvider {
    /// Create a new Gemini provider instance
    ///
    /// # Errors
    ///
    /// Returns `MissingCredentials` if no API key is configured, or an error
    /// if the HTTP client cannot be built
    pub fn new(config: GeminiConfig, timeout: Duration) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| RecipeScoutError::MissingCredentials("gemini".to_string()))?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("recipe-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                RecipeScoutError::Provider(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            "Initialized Gemini provider: model={}, image_model={}",
            config.model,
            config.image_model
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            model
        )
    }

    async fn post(&self, model: &str, body: &GeminiRequest) -> Result<GeminiResponse> {
        let url = self.endpoint(model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {}", e);
                RecipeScoutError::Provider(format!("Gemini request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini returned error {}: {}", status, error_text);
            return Err(RecipeScoutError::Provider(format!(
                "Gemini returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            RecipeScoutError::Provider(format!("Failed to parse Gemini response: {}", e)).into()
        })
    }

    fn user_content(prompt: &str) -> Vec<GeminiContent> {
        vec![GeminiContent {
            role: Some("user".to_string()),
            parts: vec![GeminiPart {
                text: Some(prompt.to_string()),
                inline_data: None,
            }],
        }]
    }
}

/// Join the text parts of the first candidate
fn candidate_text(response: &GeminiResponse) -> Option<String> {
    let parts = &response.candidates.first()?.content.as_ref()?.parts;
    let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Web citations of the first candidate, in response order
fn candidate_grounding(response: &GeminiResponse) -> Vec<GroundingLink> {
    response
        .candidates
        .first()
        .and_then(|c| c.grounding_metadata.as_ref())
        .map(|m| {
            m.grounding_chunks
                .iter()
                .filter_map(|chunk| chunk.web.clone())
                .collect()
        })
        .unwrap_or_default()
}

/// Convert a JSON Schema document to Gemini's OpenAPI dialect
///
/// Gemini spells type names in upper case ("OBJECT", "STRING").
fn openapi_schema(schema: &serde_json::Value) -> serde_json::Value {
    use serde_json::Value;

    match schema {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    let converted = match (key.as_str(), value) {
                        ("type", Value::String(t)) => Value::String(t.to_uppercase()),
                        _ => openapi_schema(value),
                    };
                    (key.clone(), converted)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(openapi_schema).collect()),
        other => other.clone(),
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate_content(&self, request: &ContentRequest) -> Result<ContentResponse> {
        let generation_config = request.response_schema.as_ref().map(|schema| {
            GeminiGenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(openapi_schema(schema)),
                ..Default::default()
            }
        });

        let tools = if request.web_search {
            vec![serde_json::json!({ "google_search": {} })]
        } else {
            Vec::new()
        };

        let body = GeminiRequest {
            contents: Self::user_content(&request.prompt),
            generation_config,
            tools,
        };

        tracing::debug!(
            "Sending Gemini request: schema={}, web_search={}",
            request.response_schema.is_some(),
            request.web_search
        );

        let response = self.post(&self.config.model, &body).await?;

        let result = ContentResponse {
            text: candidate_text(&response),
            grounding: candidate_grounding(&response),
        };

        tracing::debug!(
            "Gemini response: has_text={}, grounding_links={}",
            result.text.is_some(),
            result.grounding.len()
        );

        Ok(result)
    }

    async fn generate_image(&self, prompt: &str) -> Result<Option<InlineImage>> {
        let body = GeminiRequest {
            contents: Self::user_content(prompt),
            generation_config: Some(GeminiGenerationConfig {
                response_modalities: Some(vec!["IMAGE".to_string()]),
                ..Default::default()
            }),
            tools: Vec::new(),
        };

        let response = self.post(&self.config.image_model, &body).await?;

        let image = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|content| content.parts.into_iter().find_map(|p| p.inline_data));

        Ok(image)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> String {
        self.config.model.clone()
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            supports_structured_output: true,
            supports_web_search: true,
            supports_images: true,
        }
    }
}
