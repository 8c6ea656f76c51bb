//! Fake provider for tests and offline demos
//!
//! Responses are chosen by checking whether the prompt contains a registered
//! substring, so tests run without network access or API costs.

use crate::error::{RecipeScoutError, Result};
use crate::providers::{
    ContentRequest, ContentResponse, GroundingLink, InlineImage, Provider, ProviderCapabilities,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// What a matching rule produces
#[derive(Debug, Clone)]
enum FakeOutcome {
    Text(String),
    Fail(String),
}

/// A deterministic provider
///
/// Rules are checked in registration order; the first whose substring
/// occurs in the prompt wins. Web-search requests also receive the
/// configured grounding links.
#[derive(Debug, Default)]
pub struct FakeProvider {
    rules: Vec<(String, FakeOutcome)>,
    default_text: Option<String>,
    grounding: Vec<GroundingLink>,
    image: Option<InlineImage>,
    capabilities: Option<ProviderCapabilities>,
    calls: AtomicUsize,
}

impl FakeProvider {
    /// A provider with no rules; every request yields an empty response
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond with `text` to prompts containing `prompt_contains`
    pub fn with_response(mut self, prompt_contains: &str, text: &str) -> Self {
        self.rules.push((
            prompt_contains.to_string(),
            FakeOutcome::Text(text.to_string()),
        ));
        self
    }

    /// Fail prompts containing `prompt_contains` with `message`
    pub fn with_failure(mut self, prompt_contains: &str, message: &str) -> Self {
        self.rules.push((
            prompt_contains.to_string(),
            FakeOutcome::Fail(message.to_string()),
        ));
        self
    }

    /// Text returned when no rule matches
    pub fn with_default_response(mut self, text: &str) -> Self {
        self.default_text = Some(text.to_string());
        self
    }

    /// Grounding links attached to web-search responses
    pub fn with_grounding(mut self, links: Vec<GroundingLink>) -> Self {
        self.grounding = links;
        self
    }

    /// Image returned by `generate_image`
    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.image = Some(image);
        self
    }

    /// Advertise a restricted feature set instead of every capability
    pub fn with_capabilities(mut self, capabilities: ProviderCapabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    /// Canned recipe, video and image answers for demos without an API key
    pub fn with_demo_responses() -> Self {
        Self::new()
            .with_response("Return the recipe", DEMO_RECIPE)
            .with_default_response("Here are some helpful cooking videos.")
            .with_grounding(vec![
                GroundingLink {
                    uri: "https://www.youtube.com/watch?v=demo-recipe".to_string(),
                    title: Some("Step-by-step recipe video".to_string()),
                },
                GroundingLink {
                    uri: "https://vimeo.com/000000".to_string(),
                    title: Some("Chef technique".to_string()),
                },
            ])
            .with_image(InlineImage {
                mime_type: "image/png".to_string(),
                data: DEMO_PNG.to_string(),
            })
    }

    /// Number of provider calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn outcome_for(&self, prompt: &str) -> Option<&FakeOutcome> {
        self.rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, outcome)| outcome)
    }
}

#[async_trait]
impl Provider for FakeProvider {
    async fn generate_content(&self, request: &ContentRequest) -> Result<ContentResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let text = match self.outcome_for(&request.prompt) {
            Some(FakeOutcome::Fail(message)) => {
                return Err(RecipeScoutError::Provider(message.clone()).into())
            }
            Some(FakeOutcome::Text(text)) => Some(text.clone()),
            None => self.default_text.clone(),
        };

        let grounding = if request.web_search {
            self.grounding.clone()
        } else {
            Vec::new()
        };

        Ok(ContentResponse { text, grounding })
    }

    async fn generate_image(&self, prompt: &str) -> Result<Option<InlineImage>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(FakeOutcome::Fail(message)) = self.outcome_for(prompt) {
            return Err(RecipeScoutError::Provider(message.clone()).into());
        }
        Ok(self.image.clone())
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> String {
        "fake-model".to_string()
    }

    fn capabilities(&self) -> ProviderCapabilities {
        self.capabilities.unwrap_or(ProviderCapabilities {
            supports_structured_output: true,
            supports_web_search: true,
            supports_images: true,
        })
    }
}

// 1x1 PNG
const DEMO_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

const DEMO_RECIPE: &str = r#"{
  "title": "Garlic Butter Pasta",
  "description": "Silky spaghetti tossed in browned garlic butter with parmesan and parsley.",
  "prepTime": "5 mins",
  "cookTime": "15 mins",
  "servings": 2,
  "ingredients": [
    {"item": "spaghetti", "amount": "200 g"},
    {"item": "unsalted butter", "amount": "3 tbsp"},
    {"item": "garlic", "amount": "4 cloves", "note": "thinly sliced"},
    {"item": "parmesan", "amount": "40 g", "note": "finely grated"},
    {"item": "flat-leaf parsley", "amount": "1 handful"}
  ],
  "instructions": [
    {"stepNumber": 1, "instruction": "Boil the spaghetti in well-salted water until al dente."},
    {"stepNumber": 2, "instruction": "Melt the butter and gently fry the garlic until golden.", "tip": "Keep the heat low so the garlic does not turn bitter."},
    {"stepNumber": 3, "instruction": "Toss the pasta with the garlic butter, a splash of pasta water and the parmesan."},
    {"stepNumber": 4, "instruction": "Finish with parsley and serve immediately."}
  ],
  "nutrition": {"calories": 610, "protein": "19g", "carbs": "78g", "fat": "24g"},
  "difficulty": "Easy",
  "cuisine": "Italian",
  "rating": 4.6,
  "reviewCount": 312
}"#;
