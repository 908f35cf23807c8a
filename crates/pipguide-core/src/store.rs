//! Durable key-value storage for tutorial state.
//!
//! Backed by a single SQLite file with a string key/value table. The
//! contract required of this layer is small: read-by-key, upsert-by-key,
//! delete-by-key. On top of the raw contract sits a typed layer for the two
//! records the engine persists: the "ever launched" marker and the
//! serialized [`TutorialProgress`] snapshot.
//!
//! A progress record that fails to deserialize is treated the same as an
//! absent record (logged, never surfaced), so a content update or a
//! corrupted file degrades to a fresh state instead of wedging the app.

use std::path::Path;

use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension};

use crate::{
    error::{Result, StorageResultExt},
    progress::TutorialProgress,
};

/// Key under which the "ever launched" marker is stored. Presence
/// semantics: the value is irrelevant.
pub const LAUNCH_MARKER_KEY: &str = "launched";

/// Key under which the serialized progress record is stored.
pub const PROGRESS_KEY: &str = "progress";

/// State store connection and operations handler.
pub struct StateStore {
    connection: Connection,
}

impl StateStore {
    /// Opens the store at `path` and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection =
            Connection::open(path).storage_context("Failed to open state store connection")?;

        let store = Self { connection };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initializes the storage schema using the embedded SQL file.
    fn initialize_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .storage_context("Failed to initialize state store schema")
    }

    /// Reads the value stored under `key`, or `None` if absent.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row(
                "SELECT value FROM tutorial_state WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .storage_context("Failed to read key")
    }

    /// Upserts `value` under `key`, overwriting any prior value.
    pub fn put(&mut self, key: &str, value: &str) -> Result<()> {
        let now = Timestamp::now().to_string();
        self.connection
            .execute(
                "INSERT OR REPLACE INTO tutorial_state (key, value, updated_at) VALUES (?1, ?2, ?3)",
                params![key, value, now],
            )
            .storage_context("Failed to write key")?;
        Ok(())
    }

    /// Deletes the record under `key`. Deleting an absent key succeeds.
    pub fn delete(&mut self, key: &str) -> Result<()> {
        self.connection
            .execute("DELETE FROM tutorial_state WHERE key = ?1", params![key])
            .storage_context("Failed to delete key")?;
        Ok(())
    }

    /// Whether the "ever launched" marker is present.
    pub fn has_launched(&self) -> Result<bool> {
        Ok(self.get(LAUNCH_MARKER_KEY)?.is_some())
    }

    /// Writes the "ever launched" marker.
    pub fn mark_launched(&mut self) -> Result<()> {
        self.put(LAUNCH_MARKER_KEY, "true")
    }

    /// Loads the persisted progress record.
    ///
    /// Returns `Ok(None)` both when no record exists and when a record
    /// exists but fails to deserialize; the malformed case is logged and
    /// the caller proceeds with defaults.
    pub fn load_progress(&self) -> Result<Option<TutorialProgress>> {
        let Some(raw) = self.get(PROGRESS_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(progress) => Ok(Some(progress)),
            Err(e) => {
                log::warn!("Discarding malformed progress record: {e}");
                Ok(None)
            }
        }
    }

    /// Serializes and upserts the progress record.
    pub fn save_progress(&mut self, progress: &TutorialProgress) -> Result<()> {
        let raw = serde_json::to_string(progress)?;
        self.put(PROGRESS_KEY, &raw)
    }

    /// Deletes the progress record, leaving the launch marker untouched.
    pub fn clear_progress(&mut self) -> Result<()> {
        self.delete(PROGRESS_KEY)
    }
}
