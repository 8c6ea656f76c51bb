//! Recipe generation prompt and response schema

use crate::models::{SearchFilters, SearchMode};
use serde_json::{json, Value};

/// Generates the recipe prompt for a query
///
/// Dish queries ask for the best-known version of the dish; ingredient
/// queries ask for a dish that can be cooked mainly from what is listed.
/// Any filters are appended as hard requirements.
///
/// # Arguments
///
/// * `query` - Text exactly as the user typed it
/// * `mode` - How to interpret the query
/// * `filters` - Optional preferences
///
/// # Examples
///
/// ```
/// use recipe_scout::models::{SearchFilters, SearchMode};
/// use recipe_scout::prompts::recipe_prompt::generate_recipe_prompt;
///
/// let prompt = generate_recipe_prompt("pad thai", SearchMode::Dish, &SearchFilters::default());
/// assert!(prompt.contains("pad thai"));
/// ```
pub fn generate_recipe_prompt(query: &str, mode: SearchMode, filters: &SearchFilters) -> String {
    let request = match mode {
        SearchMode::Dish => format!(
            "Create a detailed, authentic recipe for \"{}\".",
            query.trim()
        ),
        SearchMode::Ingredients => format!(
            "Suggest one delicious dish that can be cooked mainly with these ingredients: {}. \
             Common pantry staples (salt, pepper, oil, water) may be added.",
            query.trim()
        ),
    };

    let mut prompt = format!(
        r#"You are an experienced chef writing for home cooks.

{request}

Return the recipe as JSON matching the provided schema:
- Give realistic prep and cook times such as "15 mins".
- List every ingredient with an amount; use "note" for preparation hints.
- Number the instructions from 1 and keep each step to one action. Add a "tip" only where it helps.
- Estimate nutrition per serving.
- Difficulty must be one of "Easy", "Medium" or "Hard".
- Estimate a rating between 1.0 and 5.0 and a plausible review count."#
    );

    let requirements = filter_requirements(filters);
    if !requirements.is_empty() {
        prompt.push_str("\n\nREQUIREMENTS:\n");
        for line in requirements {
            prompt.push_str("- ");
            prompt.push_str(&line);
            prompt.push('\n');
        }
    }

    prompt
}

fn filter_requirements(filters: &SearchFilters) -> Vec<String> {
    let mut lines = Vec::new();

    if !filters.dietary.is_empty() {
        lines.push(format!(
            "The recipe must be suitable for these diets: {}.",
            filters.dietary.join(", ")
        ));
    }
    if let Some(cuisine) = &filters.cuisine {
        lines.push(format!("The dish should be {} cuisine.", cuisine));
    }
    if let Some(minutes) = filters.max_total_minutes {
        lines.push(format!(
            "Prep plus cook time must not exceed {} minutes.",
            minutes
        ));
    }
    if let Some(difficulty) = &filters.difficulty {
        lines.push(format!("Difficulty should be {}.", difficulty));
    }

    lines
}

/// JSON schema the recipe response must conform to
///
/// Uses the OpenAPI subset accepted by Gemini's `responseSchema`; the same
/// document is passed to Ollama's `format` field.
pub fn recipe_response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": {"type": "string"},
            "description": {"type": "string"},
            "prepTime": {"type": "string"},
            "cookTime": {"type": "string"},
            "servings": {"type": "integer"},
            "ingredients": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "item": {"type": "string"},
                        "amount": {"type": "string"},
                        "note": {"type": "string"}
                    },
                    "required": ["item", "amount"]
                }
            },
            "instructions": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "stepNumber": {"type": "integer"},
                        "instruction": {"type": "string"},
                        "tip": {"type": "string"}
                    },
                    "required": ["stepNumber", "instruction"]
                }
            },
            "nutrition": {
                "type": "object",
                "properties": {
                    "calories": {"type": "integer"},
                    "protein": {"type": "string"},
                    "carbs": {"type": "string"},
                    "fat": {"type": "string"}
                },
                "required": ["calories", "protein", "carbs", "fat"]
            },
            "difficulty": {"type": "string"},
            "cuisine": {"type": "string"},
            "rating": {"type": "number"},
            "reviewCount": {"type": "integer"}
        },
        "required": [
            "title", "description", "prepTime", "cookTime", "servings",
            "ingredients", "instructions", "nutrition", "difficulty",
            "cuisine", "rating", "reviewCount"
        ]
    })
}
