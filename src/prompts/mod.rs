//! Prompts sent to the AI provider
//!
//! One builder per client: recipes (with a response schema), video
//! lookups (search-grounded) and dish photos.

pub mod image_prompt;
pub mod recipe_prompt;
pub mod video_prompt;

pub use image_prompt::generate_image_prompt;
pub use recipe_prompt::{generate_recipe_prompt, recipe_response_schema};
pub use video_prompt::generate_video_prompt;
