/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint:

- `search`  - generate a recipe, find videos and save the result
- `history` - list, show, rate and clear saved searches
- `image`   - generate a dish photo for a saved recipe
*/

use crate::assistant::RecipeAssistant;
use crate::error::Result;
use crate::models::RecipeRecord;
use colored::Colorize;
use std::path::{Path, PathBuf};

// History command handlers
pub mod history;

/// Generate a photo for `recipe` and write it to `path`
///
/// A missing photo is reported to the user and is not an error; only a
/// failure to write the file is.
pub async fn save_photo(
    assistant: &RecipeAssistant,
    recipe: &RecipeRecord,
    path: &Path,
) -> Result<Option<PathBuf>> {
    let photo = assistant.dish_photo(recipe).await;

    match photo.value {
        Some(image) => {
            let written = image.save(path)?;
            println!(
                "{}",
                format!("Saved photo to {}", written.display()).green()
            );
            Ok(Some(written))
        }
        None => {
            let reason = photo
                .degraded
                .unwrap_or_else(|| "the service returned no image".to_string());
            println!("{}", format!("No photo available: {}", reason).yellow());
            Ok(None)
        }
    }
}

// Search command handler
pub mod search {
    //! Search handler.
    //!
    //! Builds a `RecipeAssistant` from configuration, runs the search
    //! through the view-state machine and prints the recipe.

    use super::*;
    use crate::assistant::{SearchRequest, ViewState};
    use crate::config::Config;
    use crate::render::render_recipe;

    /// Run a search from the CLI
    ///
    /// # Errors
    ///
    /// Returns error if the assistant cannot be built, the search fails
    /// (offline, no recipe) or the photo cannot be written
    pub async fn run_search(
        config: Config,
        request: SearchRequest,
        image: Option<PathBuf>,
    ) -> Result<()> {
        let assistant = RecipeAssistant::from_config(&config)?;
        run_search_with(&assistant, &request, image.as_deref()).await
    }

    /// Run a search with an existing assistant
    pub async fn run_search_with(
        assistant: &RecipeAssistant,
        request: &SearchRequest,
        image: Option<&Path>,
    ) -> Result<()> {
        let state = assistant
            .search_with_view(request, |state| {
                if let ViewState::Loading { query } = state {
                    eprintln!("{} {}", "Searching for".dimmed(), query.cyan());
                }
            })
            .await;

        let outcome = match state {
            ViewState::Success(outcome) => outcome,
            ViewState::Error { message } => return Err(anyhow::anyhow!(message)),
            ViewState::Idle | ViewState::Loading { .. } => {
                return Err(anyhow::anyhow!("search did not finish"))
            }
        };

        print!("{}", render_recipe(&outcome.recipe, &outcome.videos, None));

        if outcome.videos_degraded.is_some() {
            println!("\n{}", "Videos are unavailable right now.".yellow());
        }

        match (&outcome.saved, &outcome.persistence_error) {
            (Some(saved), _) => println!(
                "\nSaved as {}. Rate it with {}",
                saved.id.cyan(),
                format!("recipe-scout history rate {} <1-5>", saved.id).cyan()
            ),
            (None, Some(reason)) => println!(
                "\n{}",
                format!("This recipe was not saved to history: {}", reason).yellow()
            ),
            (None, None) => {}
        }

        if let Some(path) = image {
            save_photo(assistant, &outcome.recipe, path).await?;
        }

        Ok(())
    }
}

// Image command handler
pub mod image {
    //! Dish photo handler for saved recipes.

    use super::*;
    use crate::config::Config;
    use crate::error::RecipeScoutError;

    /// Generate a photo for the saved recipe `id` and write it to `output`
    ///
    /// # Errors
    ///
    /// Returns error if the id is unknown or no photo could be produced
    pub async fn run_image(config: Config, id: String, output: PathBuf) -> Result<()> {
        let assistant = RecipeAssistant::from_config(&config)?;
        run_image_with(&assistant, &id, &output).await.map(|_| ())
    }

    /// Generate and save a photo with an existing assistant
    pub async fn run_image_with(
        assistant: &RecipeAssistant,
        id: &str,
        output: &Path,
    ) -> Result<PathBuf> {
        let session = assistant
            .history()
            .get(id)
            .ok_or_else(|| RecipeScoutError::SessionNotFound(id.to_string()))?;

        tracing::info!(id = %session.id, title = %session.recipe.title, "Generating dish photo");

        save_photo(assistant, &session.recipe, output)
            .await?
            .ok_or_else(|| {
                RecipeScoutError::Provider(format!(
                    "no photo could be generated for \"{}\"",
                    session.recipe.title
                ))
                .into()
            })
    }
}
