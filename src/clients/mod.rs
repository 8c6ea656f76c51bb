//! Clients for the three AI-backed lookups
//!
//! Recipe generation fails loudly; video and image lookups degrade to
//! empty results so they never block showing a recipe.

pub mod image;
pub mod recipe;
pub mod video;

pub use image::ImageLookupClient;
pub use recipe::{parse_recipe, RecipeGenerationClient};
pub use video::{extract_videos, video_source, VideoLookupClient, MAX_VIDEOS};
