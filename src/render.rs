//! Terminal views for recipes and history

use crate::models::{RecipeRecord, SavedSession, UserRating, VideoResult, VideoSource};
use colored::Colorize;
use prettytable::{format, Table};

const QUERY_WIDTH: usize = 30;
const TITLE_WIDTH: usize = 36;

/// Render the recipe detail view
///
/// Shows the header, ingredients, numbered steps with tips, nutrition and
/// any video links. `user_rating` is shown when the recipe was rated.
pub fn render_recipe(
    recipe: &RecipeRecord,
    videos: &[VideoResult],
    user_rating: Option<UserRating>,
) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", recipe.title.bold().green()));
    out.push_str(&format!("{}\n\n", recipe.description.italic()));

    out.push_str(&format!(
        "{} {}   {} {}   {} {}   {} {}\n",
        "Prep:".bold(),
        recipe.prep_time,
        "Cook:".bold(),
        recipe.cook_time,
        "Serves:".bold(),
        recipe.servings,
        "Difficulty:".bold(),
        recipe.difficulty
    ));
    out.push_str(&format!(
        "{} {}   {} {} ({} reviews)\n",
        "Cuisine:".bold(),
        recipe.cuisine,
        "Rating:".bold(),
        stars(recipe.rating),
        recipe.review_count
    ));
    if let Some(rating) = user_rating {
        out.push_str(&format!(
            "{} {}\n",
            "Your rating:".bold(),
            stars(f64::from(rating.value())).yellow()
        ));
    }

    out.push_str(&format!("\n{}\n", "Ingredients".bold().underline()));
    for ingredient in &recipe.ingredients {
        match &ingredient.note {
            Some(note) => out.push_str(&format!(
                "  • {} {} {}\n",
                ingredient.amount.cyan(),
                ingredient.item,
                format!("({})", note).dimmed()
            )),
            None => out.push_str(&format!(
                "  • {} {}\n",
                ingredient.amount.cyan(),
                ingredient.item
            )),
        }
    }

    out.push_str(&format!("\n{}\n", "Instructions".bold().underline()));
    for step in &recipe.instructions {
        out.push_str(&format!(
            "  {} {}\n",
            format!("{}.", step.step_number).bold(),
            step.instruction
        ));
        if let Some(tip) = &step.tip {
            out.push_str(&format!("     {} {}\n", "Tip:".yellow(), tip));
        }
    }

    let n = &recipe.nutrition;
    out.push_str(&format!("\n{}\n", "Nutrition (per serving)".bold().underline()));
    out.push_str(&format!(
        "  {} kcal | protein {} | carbs {} | fat {}\n",
        n.calories, n.protein, n.carbs, n.fat
    ));

    if !videos.is_empty() {
        out.push_str(&format!("\n{}\n", "Videos".bold().underline()));
        for video in videos {
            let label = match video.source {
                VideoSource::YouTube => video.source.to_string().red(),
                VideoSource::Web => video.source.to_string().blue(),
            };
            out.push_str(&format!("  [{}] {}\n      {}\n", label, video.title, video.uri));
        }
    }

    out
}

/// Star bar for a rating between 0 and 5, rounded to the nearest star
pub fn stars(rating: f64) -> String {
    let filled = rating.round().clamp(0.0, 5.0) as usize;
    format!("{}{} {:.1}", "★".repeat(filled), "☆".repeat(5 - filled), rating)
}

/// Build the history table, newest first
pub fn history_table(sessions: &[SavedSession]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "ID".bold(),
        "Query".bold(),
        "Recipe".bold(),
        "Rating".bold(),
        "Saved".bold()
    ]);

    for session in sessions {
        let rating = session
            .user_rating
            .map(|r| "★".repeat(usize::from(r.value())))
            .unwrap_or_else(|| "-".to_string());
        let saved = session
            .created_at()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(prettytable::row![
            session.id.cyan(),
            truncate(&session.query, QUERY_WIDTH),
            truncate(&session.recipe.title, TITLE_WIDTH),
            rating.yellow(),
            saved
        ]);
    }

    table
}

/// Shorten `text` to at most `width` characters, marking the cut with "..."
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}
