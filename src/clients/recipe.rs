//! Structured recipe generation

use crate::error::GenerationError;
use crate::models::{RecipeRecord, SearchFilters, SearchMode};
use crate::prompts::{generate_recipe_prompt, recipe_response_schema};
use crate::providers::{ContentRequest, Provider};
use std::sync::Arc;

/// Turns a query into a typed recipe using the configured provider
pub struct RecipeGenerationClient {
    provider: Arc<dyn Provider>,
}

impl RecipeGenerationClient {
    /// Create a client over a provider
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    /// Generate a recipe for `query`
    ///
    /// Sends the recipe prompt together with the response schema and parses
    /// the returned JSON.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Request` if the provider call fails,
    /// `EmptyResponse` if it returns no text, and `InvalidRecipe` if the
    /// text is not a recipe with every required field.
    pub async fn generate(
        &self,
        query: &str,
        mode: SearchMode,
        filters: &SearchFilters,
    ) -> Result<RecipeRecord, GenerationError> {
        let mut request = ContentRequest::new(generate_recipe_prompt(query, mode, filters));
        if self.provider.capabilities().supports_structured_output {
            request = request.with_schema(recipe_response_schema());
        } else {
            tracing::debug!("Provider lacks structured output; relying on the prompt for JSON");
        }

        tracing::debug!(
            provider = self.provider.provider_name(),
            model = %self.provider.model_name(),
            %mode,
            "Requesting recipe"
        );

        let response = self.provider.generate_content(&request).await.map_err(|e| {
            tracing::error!("Recipe request failed: {:#}", e);
            GenerationError::Request(e.to_string())
        })?;

        let text = response.text.ok_or(GenerationError::EmptyResponse)?;
        let recipe = parse_recipe(&text)?;

        tracing::info!(title = %recipe.title, "Generated recipe");
        Ok(recipe)
    }
}

/// Parse a recipe from model output
///
/// Tolerates a surrounding Markdown code fence, which some local models
/// add even when asked for bare JSON.
pub fn parse_recipe(text: &str) -> Result<RecipeRecord, GenerationError> {
    let body = strip_code_fence(text.trim());
    if body.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    serde_json::from_str(body).map_err(|e| {
        tracing::warn!("Recipe response did not match the schema: {}", e);
        GenerationError::InvalidRecipe(e.to_string())
    })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening fence line, which may
    // also hold the whole body when the reply is a single line.
    let body = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::FakeProvider;
    use crate::test_utils::sample_recipe;

    fn recipe_json() -> String {
        serde_json::to_string(&sample_recipe("Shakshuka")).unwrap()
    }

    #[tokio::test]
    async fn test_generate_parses_recipe() {
        let provider = Arc::new(FakeProvider::new().with_response("Return the recipe", &recipe_json()));
        let client = RecipeGenerationClient::new(provider.clone());

        let recipe = client
            .generate("shakshuka", SearchMode::Dish, &SearchFilters::default())
            .await
            .unwrap();

        assert_eq!(recipe.title, "Shakshuka");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_generate_empty_response() {
        let client = RecipeGenerationClient::new(Arc::new(FakeProvider::new()));
        let err = client
            .generate("shakshuka", SearchMode::Dish, &SearchFilters::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_generate_provider_failure() {
        let client = RecipeGenerationClient::new(Arc::new(
            FakeProvider::new().with_failure("Return the recipe", "quota exceeded"),
        ));
        let err = client
            .generate("shakshuka", SearchMode::Dish, &SearchFilters::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Request(ref m) if m.contains("quota exceeded")));
    }

    #[tokio::test]
    async fn test_generate_rejects_missing_fields() {
        let client = RecipeGenerationClient::new(Arc::new(
            FakeProvider::new().with_response("Return the recipe", r#"{"title":"Soup"}"#),
        ));
        let err = client
            .generate("soup", SearchMode::Dish, &SearchFilters::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::InvalidRecipe(_)));
    }

    #[test]
    fn test_parse_recipe_with_code_fence() {
        let fenced = format!("```json\n{}\n```", recipe_json());
        assert_eq!(parse_recipe(&fenced).unwrap().title, "Shakshuka");
    }

    #[test]
    fn test_parse_recipe_with_single_line_fence() {
        let fenced = format!("```json{}```", recipe_json());
        assert_eq!(parse_recipe(&fenced).unwrap().title, "Shakshuka");

        let bare = format!("```{}```", recipe_json());
        assert_eq!(parse_recipe(&bare).unwrap().title, "Shakshuka");
    }

    #[test]
    fn test_parse_recipe_rejects_non_json() {
        assert!(matches!(
            parse_recipe("Sorry, I can't help with that."),
            Err(GenerationError::InvalidRecipe(_))
        ));
        assert!(matches!(parse_recipe("   "), Err(GenerationError::EmptyResponse)));
    }
}
