//! Recipe Scout - AI recipe assistant
//!
#![doc = "Recipe Scout - AI recipe assistant"]
#![doc = "Main entry point for the recipe-scout command-line application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use recipe_scout::assistant::SearchRequest;
use recipe_scout::cli::{search_parts, Cli, Commands};
use recipe_scout::commands;
use recipe_scout::config::{Config, ConfigSource, LoggingConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let (config, source) = Config::load_with_source(config_path, &cli)?;

    // Initialize tracing
    init_tracing(&config.logging, cli.verbose);
    if source == ConfigSource::Defaults {
        tracing::warn!("Config file not found at {}, using defaults", config_path);
    }

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Search {
            query,
            ingredients,
            diet,
            cuisine,
            max_time,
            difficulty,
            image,
        } => {
            let (query, mode, filters) =
                search_parts(&query, ingredients, diet, cuisine, max_time, difficulty);
            tracing::info!("Starting search");
            if !filters.is_empty() {
                tracing::debug!(?filters, "Using search filters");
            }

            let request = SearchRequest::new(query)
                .with_mode(mode)
                .with_filters(filters);
            commands::search::run_search(config, request, image).await?;
            Ok(())
        }
        Commands::History { command } => {
            tracing::info!("Starting history command");
            commands::history::handle_history(&config, command).await?;
            Ok(())
        }
        Commands::Image { id, output } => {
            tracing::info!("Starting image command for {}", id);
            commands::image::run_image(config, id, output).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// `RUST_LOG` wins; otherwise `--verbose` selects debug, then the
/// configured level, then info. Logs go to stderr so command output on
/// stdout stays clean.
fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let default_directive = if verbose {
        "recipe_scout=debug".to_string()
    } else {
        logging
            .level
            .clone()
            .unwrap_or_else(|| "recipe_scout=info".to_string())
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let registry = tracing_subscriber::registry().with(env_filter);
    if logging.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
