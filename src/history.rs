//! Bounded search history
//!
//! Completed searches are kept as one JSON array under a single storage key,
//! newest first, never more than [`HISTORY_CAPACITY`] entries. Every
//! mutation reads the whole log, edits it in memory and writes it back with
//! one `set` call, so a failed write leaves the previous log untouched.
//!
//! Reads never fail outward: a missing, unreadable or corrupt slot is
//! reported as an empty history. Use [`HistoryStore::list_detailed`] when
//! the difference matters.

use crate::error::PersistenceError;
use crate::models::{Degradable, RecipeRecord, SavedSession, UserRating, VideoResult};
use crate::storage::KeyValueStore;
use std::sync::{Arc, Mutex};
use ulid::Ulid;

/// Storage key holding the serialized log
pub const HISTORY_KEY: &str = "recipe_history";

/// Maximum number of sessions retained
pub const HISTORY_CAPACITY: usize = 20;

/// Persistent, bounded list of saved sessions
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use recipe_scout::history::HistoryStore;
/// use recipe_scout::storage::MemoryStore;
///
/// let history = HistoryStore::new(Arc::new(MemoryStore::new()));
/// assert!(history.list().is_empty());
/// history.clear();
/// ```
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl HistoryStore {
    /// Create a history over the given slot store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Record a completed search
    ///
    /// The new session gets a fresh id, the current time and no rating. It
    /// is placed first; the oldest entries beyond capacity are dropped.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the slot cannot be read or written or
    /// the log cannot be serialized. Nothing is written in that case.
    pub fn append(
        &self,
        query: &str,
        recipe: RecipeRecord,
        videos: Vec<VideoResult>,
    ) -> Result<SavedSession, PersistenceError> {
        self.transact(|log| {
            let session = SavedSession {
                id: fresh_id(log),
                timestamp: chrono::Utc::now().timestamp_millis(),
                query: query.to_string(),
                recipe,
                videos,
                user_rating: None,
            };

            log.insert(0, session.clone());
            log.truncate(HISTORY_CAPACITY);

            tracing::info!(id = %session.id, entries = log.len(), "Saved search to history");
            session
        })
    }

    /// All saved sessions, newest first
    ///
    /// Returns an empty list when the slot is absent, unreadable or corrupt.
    pub fn list(&self) -> Vec<SavedSession> {
        self.list_detailed().into_value()
    }

    /// All saved sessions, marking results that stand in for a read failure
    pub fn list_detailed(&self) -> Degradable<Vec<SavedSession>> {
        match self.read_log() {
            Ok(log) => log,
            Err(e) => {
                tracing::warn!("History unavailable: {}", e);
                Degradable::degraded(Vec::new(), e.to_string())
            }
        }
    }

    /// Look up one session by id
    ///
    /// If corrupted storage holds duplicate ids, the first (newest) wins.
    pub fn get(&self, id: &str) -> Option<SavedSession> {
        self.list().into_iter().find(|s| s.id == id)
    }

    /// Set or overwrite the user rating of one session
    ///
    /// Only `user_rating` of the first entry with a matching id changes;
    /// order and all other fields are preserved. An unknown id is not an
    /// error: the log is written back and returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the slot cannot be read or written.
    pub fn set_rating(
        &self,
        id: &str,
        rating: UserRating,
    ) -> Result<Vec<SavedSession>, PersistenceError> {
        self.transact(|log| {
            match log.iter_mut().find(|s| s.id == id) {
                Some(session) => {
                    session.user_rating = Some(rating);
                    tracing::info!(id = %id, rating = rating.value(), "Rated saved recipe");
                }
                None => {
                    tracing::debug!(id = %id, "Rating ignored for unknown history id");
                }
            }
            log.clone()
        })
    }

    /// Delete the whole log
    ///
    /// Idempotent. Storage failures are logged and otherwise ignored.
    pub fn clear(&self) {
        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());

        match self.store.remove(HISTORY_KEY) {
            Ok(()) => tracing::info!("Cleared search history"),
            Err(e) => tracing::warn!("Failed to clear history: {}", e),
        }
    }

    /// Run one read-modify-write cycle under the write lock
    ///
    /// The closure edits the in-memory log; the result is written back with
    /// a single `set`. Nothing is written if reading or serializing fails.
    fn transact<R>(
        &self,
        edit: impl FnOnce(&mut Vec<SavedSession>) -> R,
    ) -> Result<R, PersistenceError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());

        let mut log = self.read_log()?.into_value();
        let output = edit(&mut log);

        let blob = serde_json::to_string(&log)?;
        self.store.set(HISTORY_KEY, &blob)?;

        Ok(output)
    }

    /// Read and parse the log
    ///
    /// An absent slot is an empty log. A corrupt blob is also treated as an
    /// empty log but marked degraded. Only backend read failures are errors.
    fn read_log(&self) -> Result<Degradable<Vec<SavedSession>>, PersistenceError> {
        let Some(blob) = self.store.get(HISTORY_KEY)? else {
            return Ok(Degradable::ok(Vec::new()));
        };

        match serde_json::from_str::<Vec<SavedSession>>(&blob) {
            Ok(log) => Ok(Degradable::ok(log)),
            Err(e) => {
                tracing::warn!("Discarding unparseable history: {}", e);
                Ok(Degradable::degraded(
                    Vec::new(),
                    format!("history is corrupt: {}", e),
                ))
            }
        }
    }
}

/// A new ULID not already present in `log`
fn fresh_id(log: &[SavedSession]) -> String {
    loop {
        let id = Ulid::new().to_string();
        if !log.iter().any(|s| s.id == id) {
            return id;
        }
    }
}
