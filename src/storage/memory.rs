use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::TrackerError;

use super::{KeyValueStore, Result};

/// In-process store used when nothing on disk can be written.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<T>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> T) -> Result<T> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| TrackerError::Storage("memory store lock poisoned".into()))?;
        Ok(f(&mut guard))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_entries(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.with_entries(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.with_entries(|entries| {
            entries.remove(key);
        })
    }

    fn describe(&self) -> String {
        "in-memory store".into()
    }
}
