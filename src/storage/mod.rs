//! Local durable key-value storage
//!
//! The history log lives in a single string slot. This module provides the
//! slot abstraction and its backends: an embedded `sled` tree, a SQLite
//! table, and an in-memory map for tests and ephemeral runs.

use crate::config::StorageConfig;
use crate::error::{RecipeScoutError, Result, StorageError};
use directories::ProjectDirs;
use std::path::PathBuf;

pub mod memory;
pub mod sled_store;
pub mod sqlite;
pub mod types;

pub use memory::MemoryStore;
pub use sled_store::SledStore;
pub use sqlite::SqliteStore;
pub use types::StorageBackend;

/// A string-keyed slot store
///
/// Every call is a complete, synchronous operation: `set` replaces the whole
/// value and is durable once it returns.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `None` when absent
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError>;

    /// Replace the value under `key`
    fn set(&self, key: &str, value: &str) -> std::result::Result<(), StorageError>;

    /// Delete `key`. Deleting an absent key succeeds.
    fn remove(&self, key: &str) -> std::result::Result<(), StorageError>;

    /// Backend name for logs ("sled", "sqlite", "memory")
    fn backend_name(&self) -> &'static str;
}

/// Open the backend selected by configuration
///
/// # Errors
///
/// Returns error if the data directory cannot be determined or the backend
/// fails to open.
pub fn open_store(config: &StorageConfig) -> Result<Box<dyn KeyValueStore>> {
    let store: Box<dyn KeyValueStore> = match config.backend {
        StorageBackend::Memory => Box::new(MemoryStore::new()),
        StorageBackend::Sled => {
            let path = resolve_path(config, "history.sled")?;
            Box::new(SledStore::open(path)?)
        }
        StorageBackend::Sqlite => {
            let path = resolve_path(config, "history.db")?;
            Box::new(SqliteStore::open(path)?)
        }
    };

    tracing::info!("Opened {} history storage", store.backend_name());
    Ok(store)
}

/// Configured path, or a file under the user's data directory
fn resolve_path(config: &StorageConfig, file_name: &str) -> Result<PathBuf> {
    if let Some(path) = &config.path {
        return Ok(PathBuf::from(path));
    }

    let proj_dirs = ProjectDirs::from("com", "recipe-scout", "recipe-scout").ok_or_else(|| {
        RecipeScoutError::Config("Could not determine data directory".to_string())
    })?;

    Ok(proj_dirs.data_dir().join(file_name))
}
