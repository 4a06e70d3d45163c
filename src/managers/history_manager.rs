//! History Manager for Calcdesk.
//!
//! Implements `HistoryManagerTrait`: a newest-first, capacity-bounded list of
//! completed calculations, persisted as a JSON array under a single key of a
//! [`KeyValueStore`].

use tracing::{debug, warn};

use crate::services::key_value_store::KeyValueStore;
use crate::types::errors::HistoryError;
use crate::types::history::HistoryEntry;

/// Default number of entries retained.
pub const DEFAULT_CAPACITY: usize = 50;

/// Default key the history is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "calcHistory";

/// Trait defining history management operations.
pub trait HistoryManagerTrait {
    fn append(&mut self, expression: &str, result: &str) -> HistoryEntry;
    fn clear(&mut self);
    fn select_at(&self, index: usize) -> Option<&HistoryEntry>;
    fn entries(&self) -> &[HistoryEntry];
    fn load(&mut self);
    fn persist(&mut self) -> Result<(), HistoryError>;
}

/// History manager that owns its backing store.
pub struct HistoryManager {
    store: Box<dyn KeyValueStore>,
    key: String,
    capacity: usize,
    entries: Vec<HistoryEntry>,
}

impl HistoryManager {
    /// Creates a manager with the default key and capacity and loads any
    /// previously persisted entries.
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self::with_options(store, DEFAULT_STORAGE_KEY, DEFAULT_CAPACITY)
    }

    /// Creates a manager with an explicit key and capacity and loads any
    /// previously persisted entries. A capacity of zero is treated as one.
    pub fn with_options(store: Box<dyn KeyValueStore>, key: &str, capacity: usize) -> Self {
        let mut mgr = Self {
            store,
            key: key.to_string(),
            capacity: capacity.max(1),
            entries: Vec::new(),
        };
        mgr.load();
        mgr
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Gives the backing store back, e.g. to reopen it in a fresh manager.
    pub fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }

    /// Reads and parses the stored list. Absent or malformed data yields an error
    /// the caller turns into an empty history.
    fn read_stored(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        match self.store.get(&self.key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| HistoryError::SerializationError(e.to_string())),
            None => Ok(Vec::new()),
        }
    }

    /// Persists and logs instead of propagating; mutations never fail for the caller.
    fn persist_or_warn(&mut self) {
        if let Err(e) = self.persist() {
            warn!(error = %e, "failed to persist calculation history");
        }
    }
}

impl HistoryManagerTrait for HistoryManager {
    /// Inserts a new entry at the front, evicts from the back past capacity,
    /// then persists. Returns the new entry.
    fn append(&mut self, expression: &str, result: &str) -> HistoryEntry {
        let entry = HistoryEntry::new(expression, result);
        self.entries.insert(0, entry.clone());
        self.entries.truncate(self.capacity);
        debug!(expression, result, len = self.entries.len(), "history entry appended");
        self.persist_or_warn();
        entry
    }

    /// Removes every entry and persists the empty list.
    fn clear(&mut self) {
        self.entries.clear();
        debug!("history cleared");
        self.persist_or_warn();
    }

    fn select_at(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Replaces the in-memory list with the stored one. Never fails: absent or
    /// malformed data leaves the history empty.
    fn load(&mut self) {
        self.entries = match self.read_stored() {
            Ok(mut entries) => {
                entries.truncate(self.capacity);
                entries
            }
            Err(e) => {
                warn!(error = %e, key = %self.key, "discarding unreadable history");
                Vec::new()
            }
        };
    }

    /// Serializes the full list under the history key.
    fn persist(&mut self) -> Result<(), HistoryError> {
        let json = serde_json::to_string(&self.entries)
            .map_err(|e| HistoryError::SerializationError(e.to_string()))?;
        self.store.set(&self.key, &json)?;
        Ok(())
    }
}
