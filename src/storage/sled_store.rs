use super::KeyValueStore;
use crate::error::StorageError;
use sled::Db;
use std::path::Path;

/// Embedded `sled` slot store
///
/// Each write is flushed before returning so a completed `set` survives a
/// crash.
pub struct SledStore {
    db: Db,
}

impl SledStore {
    /// Open or create a store at `path`
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Open` if the database cannot be opened
    ///
    /// # Examples
    ///
    /// ```
    /// use recipe_scout::storage::{KeyValueStore, SledStore};
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let store = SledStore::open(dir.path().join("history.sled")).unwrap();
    /// store.set("greeting", "hello").unwrap();
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let db = sled::open(path)
            .map_err(|e| StorageError::Open(format!("Failed to open database: {}", e)))?;
        Ok(Self { db })
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self
            .db
            .get(key.as_bytes())
            .map_err(|e| StorageError::Read(format!("Get failed: {}", e)))?
        {
            Some(bytes) => {
                let value = String::from_utf8(bytes.to_vec())
                    .map_err(|e| StorageError::Read(format!("Value is not UTF-8: {}", e)))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.db
            .insert(key.as_bytes(), value.as_bytes())
            .map_err(|e| StorageError::Write(format!("Insert failed: {}", e)))?;

        self.db
            .flush()
            .map_err(|e| StorageError::Write(format!("Flush failed: {}", e)))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.db
            .remove(key.as_bytes())
            .map_err(|e| StorageError::Write(format!("Remove failed: {}", e)))?;

        self.db
            .flush()
            .map_err(|e| StorageError::Write(format!("Flush failed: {}", e)))?;

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "sled"
    }
}
