//! Command-line interface definition for Recipe Scout
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for searching recipes, browsing and rating history,
//! and saving dish photos.

use crate::models::{SearchFilters, SearchMode};
use crate::storage::StorageBackend;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Recipe Scout - AI recipe assistant
///
/// Generate a recipe from a dish name or the ingredients you have, find
/// videos that show how to cook it, and keep a rated history of searches.
#[derive(Parser, Debug, Clone)]
#[command(name = "recipe-scout")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the provider from config (gemini, ollama, fake)
    #[arg(long, global = true)]
    pub provider: Option<String>,

    /// Override the history storage location
    #[arg(long, global = true, env = "RECIPE_SCOUT_STORAGE_PATH")]
    pub storage_path: Option<String>,

    /// Override the history storage backend (sled, sqlite, memory)
    #[arg(long, global = true)]
    pub storage_backend: Option<StorageBackend>,

    /// Treat the machine as offline
    #[arg(long, global = true)]
    pub offline: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Recipe Scout
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate a recipe and find cooking videos
    Search {
        /// Dish name, or ingredients with --ingredients
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Treat the query as a list of ingredients on hand
        #[arg(short, long)]
        ingredients: bool,

        /// Dietary requirement (repeatable), e.g. vegetarian, gluten-free
        #[arg(long = "diet")]
        diet: Vec<String>,

        /// Preferred cuisine
        #[arg(long)]
        cuisine: Option<String>,

        /// Maximum prep plus cook time in minutes
        #[arg(long)]
        max_time: Option<u32>,

        /// Preferred difficulty (Easy, Medium, Hard)
        #[arg(long)]
        difficulty: Option<String>,

        /// Also generate a dish photo and write it to this path
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Browse, rate and clear saved searches
    History {
        /// History subcommand
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// Generate a photo for a saved recipe
    Image {
        /// Saved recipe id
        id: String,

        /// Output file; the extension is added when missing
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// History subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum HistoryCommand {
    /// List saved searches, newest first
    List,

    /// Show a saved recipe
    Show {
        /// Saved recipe id
        id: String,

        /// Also generate a dish photo and write it to this path
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Rate a saved recipe from 1 to 5
    Rate {
        /// Saved recipe id
        id: String,

        /// Rating between 1 and 5
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
    },

    /// Delete all saved searches
    Clear,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            provider: None,
            storage_path: None,
            storage_backend: None,
            offline: false,
            command: Commands::History {
                command: HistoryCommand::List,
            },
        }
    }
}

/// Split `search` arguments into the query text, mode and filters
pub fn search_parts(
    query: &[String],
    ingredients: bool,
    diet: Vec<String>,
    cuisine: Option<String>,
    max_time: Option<u32>,
    difficulty: Option<String>,
) -> (String, SearchMode, SearchFilters) {
    let mode = if ingredients {
        SearchMode::Ingredients
    } else {
        SearchMode::Dish
    };
    let filters = SearchFilters {
        dietary: diet,
        cuisine,
        max_total_minutes: max_time,
        difficulty,
    };
    (query.join(" "), mode, filters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default() {
        let cli = Cli::default();
        assert_eq!(cli.config, Some("config/config.yaml".to_string()));
        assert!(!cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::History {
                command: HistoryCommand::List
            }
        ));
    }

    #[test]
    fn test_cli_parse_search_multi_word() {
        let cli = Cli::try_parse_from(["recipe-scout", "search", "chicken", "tikka", "masala"])
            .unwrap();
        if let Commands::Search {
            query, ingredients, ..
        } = cli.command
        {
            assert_eq!(query.join(" "), "chicken tikka masala");
            assert!(!ingredients);
        } else {
            panic!("Expected Search command");
        }
    }

    #[test]
    fn test_cli_parse_search_with_filters() {
        let cli = Cli::try_parse_from([
            "recipe-scout",
            "search",
            "--ingredients",
            "--diet",
            "vegan",
            "--diet",
            "nut-free",
            "--cuisine",
            "Thai",
            "--max-time",
            "30",
            "--difficulty",
            "Easy",
            "tofu, rice",
        ])
        .unwrap();

        if let Commands::Search {
            query,
            ingredients,
            diet,
            cuisine,
            max_time,
            difficulty,
            image,
        } = cli.command
        {
            let (text, mode, filters) =
                search_parts(&query, ingredients, diet, cuisine, max_time, difficulty);
            assert_eq!(text, "tofu, rice");
            assert_eq!(mode, SearchMode::Ingredients);
            assert_eq!(filters.dietary, vec!["vegan", "nut-free"]);
            assert_eq!(filters.cuisine.as_deref(), Some("Thai"));
            assert_eq!(filters.max_total_minutes, Some(30));
            assert_eq!(filters.difficulty.as_deref(), Some("Easy"));
            assert!(image.is_none());
        } else {
            panic!("Expected Search command");
        }
    }

    #[test]
    fn test_cli_search_requires_query() {
        assert!(Cli::try_parse_from(["recipe-scout", "search"]).is_err());
    }

    #[test]
    fn test_cli_parse_history_rate() {
        let cli = Cli::try_parse_from(["recipe-scout", "history", "rate", "01ABC", "5"]).unwrap();
        if let Commands::History {
            command: HistoryCommand::Rate { id, rating },
        } = cli.command
        {
            assert_eq!(id, "01ABC");
            assert_eq!(rating, 5);
        } else {
            panic!("Expected History Rate command");
        }
    }

    #[test]
    fn test_cli_rate_out_of_range() {
        assert!(Cli::try_parse_from(["recipe-scout", "history", "rate", "01ABC", "0"]).is_err());
        assert!(Cli::try_parse_from(["recipe-scout", "history", "rate", "01ABC", "6"]).is_err());
    }

    #[test]
    fn test_cli_parse_history_show_with_image() {
        let cli = Cli::try_parse_from([
            "recipe-scout",
            "history",
            "show",
            "01ABC",
            "--image",
            "dish.png",
        ])
        .unwrap();
        if let Commands::History {
            command: HistoryCommand::Show { id, image },
        } = cli.command
        {
            assert_eq!(id, "01ABC");
            assert_eq!(image, Some(PathBuf::from("dish.png")));
        } else {
            panic!("Expected History Show command");
        }
    }

    #[test]
    fn test_cli_parse_image() {
        let cli =
            Cli::try_parse_from(["recipe-scout", "image", "01ABC", "--output", "out/photo"]).unwrap();
        assert!(matches!(cli.command, Commands::Image { .. }));
    }

    #[test]
    fn test_cli_global_overrides() {
        let cli = Cli::try_parse_from([
            "recipe-scout",
            "history",
            "list",
            "--provider",
            "fake",
            "--storage-backend",
            "memory",
            "--offline",
        ])
        .unwrap();
        assert_eq!(cli.provider.as_deref(), Some("fake"));
        assert_eq!(cli.storage_backend, Some(StorageBackend::Memory));
        assert!(cli.offline);
    }

    #[test]
    fn test_cli_rejects_unknown_backend() {
        assert!(Cli::try_parse_from([
            "recipe-scout",
            "--storage-backend",
            "redis",
            "history",
            "list"
        ])
        .is_err());
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::try_parse_from(["recipe-scout", "-v", "history", "clear"]).unwrap();
        assert!(cli.verbose);
    }
}
