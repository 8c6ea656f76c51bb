//! Dish photo generation

use crate::models::Degradable;
use crate::prompts::generate_image_prompt;
use crate::providers::{InlineImage, Provider};
use std::sync::Arc;

/// Requests a generated photograph of a dish
pub struct ImageLookupClient {
    provider: Arc<dyn Provider>,
}

impl ImageLookupClient {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    /// Generate an image for `description`; any failure yields `None`
    pub async fn generate(&self, description: &str) -> Option<InlineImage> {
        self.generate_detailed(description).await.into_value()
    }

    /// Like [`generate`](Self::generate) but reports swallowed errors
    pub async fn generate_detailed(&self, description: &str) -> Degradable<Option<InlineImage>> {
        if !self.provider.capabilities().supports_images {
            tracing::debug!(
                provider = self.provider.provider_name(),
                "Provider cannot generate images"
            );
            return Degradable::degraded(
                None,
                format!(
                    "the {} provider does not generate images",
                    self.provider.provider_name()
                ),
            );
        }

        match self.provider.generate_image(&generate_image_prompt(description)).await {
            Ok(image) => {
                if image.is_none() {
                    tracing::debug!("Image response contained no inline image");
                }
                Degradable::ok(image)
            }
            Err(e) => {
                tracing::warn!("Image generation failed: {:#}", e);
                Degradable::degraded(None, e.to_string())
            }
        }
    }
}
