// Mirrors the task collection into a key-value store

use crate::models::TaskCollection;
use crate::storage::KeyValueStore;
use eyre::{Context, Result};
use tracing::{debug, warn};

/// Loads the task collection at startup and saves it after every change
///
/// Storage failures never escape: a bad read falls back to the caller's
/// default and a failed write is logged, leaving the in-memory collection
/// authoritative for the session.
pub struct PersistenceBridge<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PersistenceBridge<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Read the collection stored at `key`
    ///
    /// Returns `fallback` when nothing is stored, or when the stored value
    /// can't be read or isn't a valid collection.
    pub fn load(&self, key: &str, fallback: TaskCollection) -> TaskCollection {
        match self.try_load(key) {
            Ok(Some(tasks)) => {
                debug!(key, count = tasks.len(), "Loaded tasks");
                tasks
            }
            Ok(None) => {
                debug!(key, "No stored tasks, using fallback");
                fallback
            }
            Err(e) => {
                warn!(key, error = ?e, "Failed to load tasks, using fallback");
                fallback
            }
        }
    }

    /// Write `collection` at `key`, logging rather than returning failures
    pub fn save(&mut self, key: &str, collection: &TaskCollection) {
        if let Err(e) = self.try_save(key, collection) {
            warn!(key, count = collection.len(), error = ?e, "Failed to save tasks");
        }
    }

    fn try_load(&self, key: &str) -> Result<Option<TaskCollection>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        let tasks: TaskCollection = serde_json::from_str(&raw).context("Stored tasks are not valid JSON")?;
        tasks.validate()?;
        Ok(Some(tasks))
    }

    fn try_save(&mut self, key: &str, collection: &TaskCollection) -> Result<()> {
        let json = serde_json::to_string(collection).context("Failed to serialize tasks")?;
        self.store.set(key, &json)?;
        debug!(key, count = collection.len(), "Saved tasks");
        Ok(())
    }
}
