//! Dish photo prompt

/// Generates the prompt for a photographic image of a dish
///
/// # Examples
///
/// ```
/// use recipe_scout::prompts::image_prompt::generate_image_prompt;
///
/// let prompt = generate_image_prompt("Garlic Butter Pasta");
/// assert!(prompt.contains("Garlic Butter Pasta"));
/// ```
pub fn generate_image_prompt(description: &str) -> String {
    format!(
        "A professional, appetizing food photograph of {}. \
         Natural light, shallow depth of field, plated on a rustic table, \
         high detail. No text or watermarks.",
        description.trim()
    )
}
