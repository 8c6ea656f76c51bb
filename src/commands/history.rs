//! `history` command handlers

use crate::assistant::RecipeAssistant;
use crate::cli::HistoryCommand;
use crate::commands::save_photo;
use crate::config::Config;
use crate::error::{RecipeScoutError, Result};
use crate::history::HistoryStore;
use crate::models::{SavedSession, UserRating};
use crate::render::{history_table, render_recipe};
use crate::storage::open_store;
use colored::Colorize;
use std::sync::Arc;

/// Handle history commands
///
/// Only `show --image` needs a provider; everything else opens the
/// storage backend directly so it works without credentials.
pub async fn handle_history(config: &Config, command: HistoryCommand) -> Result<()> {
    if let HistoryCommand::Show {
        id,
        image: Some(path),
    } = &command
    {
        let assistant = RecipeAssistant::from_config(config)?;
        let session = show_session(assistant.history(), id)?;
        save_photo(&assistant, &session.recipe, path).await?;
        return Ok(());
    }

    let store = open_store(&config.storage)?;
    let history = HistoryStore::new(Arc::from(store));
    run_history_command(&history, command)
}

/// Run a history command that needs no provider
pub fn run_history_command(history: &HistoryStore, command: HistoryCommand) -> Result<()> {
    match command {
        HistoryCommand::List => list_sessions(history),
        HistoryCommand::Show { id, .. } => show_session(history, &id).map(|_| ()),
        HistoryCommand::Rate { id, rating } => rate_session(history, &id, rating),
        HistoryCommand::Clear => {
            history.clear();
            println!("{}", "History cleared.".green());
            Ok(())
        }
    }
}

fn list_sessions(history: &HistoryStore) -> Result<()> {
    let sessions = history.list_detailed();

    if let Some(reason) = &sessions.degraded {
        println!(
            "{}",
            format!("Saved history could not be read ({}).", reason).yellow()
        );
    }

    if sessions.value.is_empty() {
        println!("{}", "No saved recipes yet.".yellow());
        return Ok(());
    }

    println!("\nSaved recipes:");
    history_table(&sessions.value).printstd();
    println!();
    println!(
        "Use {} to open one.",
        "recipe-scout history show <ID>".cyan()
    );
    println!();
    Ok(())
}

fn show_session(history: &HistoryStore, id: &str) -> Result<SavedSession> {
    let session = history
        .get(id)
        .ok_or_else(|| RecipeScoutError::SessionNotFound(id.to_string()))?;

    let saved = session
        .created_at()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{} {}  {} {}",
        "Query:".dimmed(),
        session.query,
        "Saved:".dimmed(),
        saved
    );
    print!(
        "{}",
        render_recipe(&session.recipe, &session.videos, session.user_rating)
    );

    Ok(session)
}

fn rate_session(history: &HistoryStore, id: &str, rating: u8) -> Result<()> {
    let rating = UserRating::new(rating).map_err(RecipeScoutError::Persistence)?;
    let log = history
        .set_rating(id, rating)
        .map_err(RecipeScoutError::Persistence)?;

    match log.iter().find(|s| s.id == id) {
        Some(session) => {
            println!(
                "{}",
                format!("Rated \"{}\" {} out of 5.", session.recipe.title, rating).green()
            );
            Ok(())
        }
        None => Err(RecipeScoutError::SessionNotFound(id.to_string()).into()),
    }
}
