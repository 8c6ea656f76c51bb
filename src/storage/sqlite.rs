use super::KeyValueStore;
use crate::error::StorageError;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::PathBuf;

/// SQLite-backed slot store
///
/// Keeps one `slots` table of key/value text rows. A connection is opened
/// per call so the store holds no locks between operations.
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `db_path`
    ///
    /// # Examples
    ///
    /// ```
    /// use recipe_scout::storage::{KeyValueStore, SqliteStore};
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let store = SqliteStore::open(dir.path().join("history.db")).unwrap();
    /// assert_eq!(store.get("recipe_history").unwrap(), None);
    /// ```
    pub fn open<P: Into<PathBuf>>(db_path: P) -> Result<Self, StorageError> {
        let db_path = db_path.into();

        // Ensure parent directory exists so opening the DB file succeeds.
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::Open(format!("Failed to create parent directory: {}", e))
            })?;
        }

        let store = Self { db_path };
        store.init()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn init(&self) -> Result<(), StorageError> {
        let conn = self.connect().map_err(StorageError::Open)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS slots (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| StorageError::Open(format!("Failed to create tables: {}", e)))?;

        Ok(())
    }

    fn connect(&self) -> Result<Connection, String> {
        Connection::open(&self.db_path).map_err(|e| format!("Failed to open database: {}", e))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.connect().map_err(StorageError::Read)?;

        conn.query_row(
            "SELECT value FROM slots WHERE key = ?",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| StorageError::Read(format!("Failed to query slot: {}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let conn = self.connect().map_err(StorageError::Write)?;
        let now = chrono::Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO slots (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )
        .map_err(|e| StorageError::Write(format!("Failed to write slot: {}", e)))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let conn = self.connect().map_err(StorageError::Write)?;

        conn.execute("DELETE FROM slots WHERE key = ?", params![key])
            .map_err(|e| StorageError::Write(format!("Failed to delete slot: {}", e)))?;

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Helper: create a temporary store backed by a temp directory.
    ///
    /// Returns the `TempDir` too so the caller keeps the directory alive.
    fn create_test_store() -> (SqliteStore, tempfile::TempDir) {
        let dir = tempdir().expect("failed to create tempdir");
        let store = SqliteStore::open(dir.path().join("history.db")).expect("failed to open store");
        (store, dir)
    }

    #[test]
    fn test_init_creates_table() {
        let (store, _dir) = create_test_store();
        let conn = Connection::open(&store.db_path).expect("open connection");
        let count: i64 = conn
            .query_row(
                "SELECT count(*) FROM sqlite_master WHERE type='table' AND name='slots'",
                [],
                |r| r.get(0),
            )
            .expect("query row");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_get_missing_key_returns_none() {
        let (store, _dir) = create_test_store();
        assert_eq!(store.get("nope").expect("get failed"), None);
    }

    #[test]
    fn test_set_overwrites_existing_value() {
        let (store, _dir) = create_test_store();
        store.set("slot", "first").expect("first set failed");
        store.set("slot", "second").expect("second set failed");
        assert_eq!(store.get("slot").expect("get failed"), Some("second".to_string()));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (store, _dir) = create_test_store();
        store.set("slot", "value").expect("set failed");
        store.remove("slot").expect("first remove failed");
        store.remove("slot").expect("second remove failed");
        assert_eq!(store.get("slot").expect("get failed"), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().expect("failed to create tempdir");
        let path = dir.path().join("history.db");
        SqliteStore::open(&path)
            .expect("open")
            .set("slot", "[]")
            .expect("set");

        let reopened = SqliteStore::open(&path).expect("reopen");
        assert_eq!(reopened.get("slot").expect("get"), Some("[]".to_string()));
    }
}
