//! Configuration management for Recipe Scout
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{RecipeScoutError, Result};
use crate::storage::StorageBackend;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Recipe Scout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// AI provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// History storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Connectivity checks
    #[serde(default)]
    pub network: NetworkConfig,
    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Provider configuration
///
/// Specifies which AI provider to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use: "gemini", "ollama" or "fake"
    #[serde(rename = "type", default = "default_provider_type")]
    pub provider_type: String,

    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Ollama configuration
    #[serde(default)]
    pub ollama: OllamaConfig,
}

fn default_provider_type() -> String {
    "gemini".to_string()
}

fn default_request_timeout() -> u64 {
    120
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            request_timeout_seconds: default_request_timeout(),
            gemini: GeminiConfig::default(),
            ollama: OllamaConfig::default(),
        }
    }
}

/// Gemini provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key. Usually supplied through `GEMINI_API_KEY` rather than the file.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Model used for recipes and video lookups
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// Model used for dish photos
    #[serde(default = "default_gemini_image_model")]
    pub image_model: String,

    /// API base URL (overridable for tests and proxies)
    #[serde(default = "default_gemini_api_base")]
    pub api_base: String,
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_gemini_image_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_gemini_model(),
            image_model: default_gemini_image_model(),
            api_base: default_gemini_api_base(),
        }
    }
}

/// Ollama provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Ollama server host
    #[serde(default = "default_ollama_host")]
    pub host: String,

    /// Model to use for Ollama
    #[serde(default = "default_ollama_model")]
    pub model: String,
}

fn default_ollama_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:latest".to_string()
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: default_ollama_host(),
            model: default_ollama_model(),
        }
    }
}

/// History storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend holding the history slot
    #[serde(default)]
    pub backend: StorageBackend,

    /// Backend file or directory; defaults to the user data directory
    #[serde(default)]
    pub path: Option<String>,
}

/// Connectivity check configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Treat the machine as offline without probing
    #[serde(default)]
    pub offline: bool,

    /// Skip the probe and assume connectivity
    #[serde(default)]
    pub skip_probe: bool,

    /// How long a probe connection may take, in milliseconds
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

fn default_probe_timeout_ms() -> u64 {
    2000
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            offline: false,
            skip_probe: false,
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

/// Log output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable logs
    #[serde(default)]
    pub json: bool,

    /// Filter directive used when `RUST_LOG` is unset (e.g. "recipe_scout=debug")
    #[serde(default)]
    pub level: Option<String>,
}

/// Where [`Config::load_with_source`] found its base values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// The configuration file was read
    File,
    /// No file existed at the path; built-in defaults were used
    Defaults,
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let (config, source) = Self::load_with_source(path, cli)?;
        if source == ConfigSource::Defaults {
            tracing::warn!("Config file not found at {}, using defaults", path);
        }
        Ok(config)
    }

    /// Like [`load`](Self::load) but reports a missing file to the caller
    /// instead of logging it, for use before tracing is installed
    pub fn load_with_source(path: &str, cli: &crate::cli::Cli) -> Result<(Self, ConfigSource)> {
        let (mut config, source) = if Path::new(path).exists() {
            (Self::from_file(path)?, ConfigSource::File)
        } else {
            (Self::default(), ConfigSource::Defaults)
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok((config, source))
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RecipeScoutError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| RecipeScoutError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(provider_type) = std::env::var("RECIPE_SCOUT_PROVIDER") {
            self.provider.provider_type = provider_type;
        }

        if let Ok(timeout) = std::env::var("RECIPE_SCOUT_REQUEST_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.provider.request_timeout_seconds = value;
            } else {
                tracing::warn!("Invalid RECIPE_SCOUT_REQUEST_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(api_key) = std::env::var("GEMINI_API_KEY") {
            self.provider.gemini.api_key = Some(api_key);
        }

        if let Ok(model) = std::env::var("RECIPE_SCOUT_GEMINI_MODEL") {
            self.provider.gemini.model = model;
        }

        if let Ok(image_model) = std::env::var("RECIPE_SCOUT_GEMINI_IMAGE_MODEL") {
            self.provider.gemini.image_model = image_model;
        }

        if let Ok(api_base) = std::env::var("RECIPE_SCOUT_GEMINI_API_BASE") {
            self.provider.gemini.api_base = api_base;
        }

        if let Ok(ollama_host) = std::env::var("RECIPE_SCOUT_OLLAMA_HOST") {
            self.provider.ollama.host = ollama_host;
        }

        if let Ok(ollama_model) = std::env::var("RECIPE_SCOUT_OLLAMA_MODEL") {
            self.provider.ollama.model = ollama_model;
        }

        if let Ok(backend) = std::env::var("RECIPE_SCOUT_STORAGE_BACKEND") {
            match backend.parse() {
                Ok(value) => self.storage.backend = value,
                Err(e) => tracing::warn!("Invalid RECIPE_SCOUT_STORAGE_BACKEND: {}", e),
            }
        }

        if let Ok(path) = std::env::var("RECIPE_SCOUT_STORAGE_PATH") {
            tracing::debug!(path = %path, "Env override: RECIPE_SCOUT_STORAGE_PATH");
            self.storage.path = Some(path);
        }

        if let Ok(offline) = std::env::var("RECIPE_SCOUT_OFFLINE") {
            match offline.parse::<bool>() {
                Ok(v) => self.network.offline = v,
                Err(_) => tracing::warn!("Invalid value for RECIPE_SCOUT_OFFLINE: {}", offline),
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(provider) = &cli.provider {
            self.provider.provider_type = provider.clone();
        }

        if let Some(path) = &cli.storage_path {
            self.storage.path = Some(path.clone());
        }

        if let Some(backend) = cli.storage_backend {
            self.storage.backend = backend;
        }

        if cli.offline {
            self.network.offline = true;
        }
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        let valid_providers = ["gemini", "ollama", "fake"];
        if !valid_providers.contains(&self.provider.provider_type.as_str()) {
            return Err(RecipeScoutError::Config(format!(
                "Invalid provider type: {}. Must be one of: {}",
                self.provider.provider_type,
                valid_providers.join(", ")
            ))
            .into());
        }

        if self.provider.request_timeout_seconds == 0 {
            return Err(RecipeScoutError::Config(
                "provider.request_timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.provider.gemini.model.trim().is_empty() {
            return Err(
                RecipeScoutError::Config("provider.gemini.model cannot be empty".to_string()).into(),
            );
        }

        if url::Url::parse(&self.provider.gemini.api_base).is_err() {
            return Err(RecipeScoutError::Config(format!(
                "provider.gemini.api_base is not a valid URL: {}",
                self.provider.gemini.api_base
            ))
            .into());
        }

        if url::Url::parse(&self.provider.ollama.host).is_err() {
            return Err(RecipeScoutError::Config(format!(
                "provider.ollama.host is not a valid URL: {}",
                self.provider.ollama.host
            ))
            .into());
        }

        if self.network.probe_timeout_ms == 0 {
            return Err(RecipeScoutError::Config(
                "network.probe_timeout_ms must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
