//! Key-value persistence for the budget document.

pub mod json_backend;
pub mod memory;

use crate::core::normalizer::{LoadReport, Normalizer};
use crate::domain::BudgetState;
use crate::errors::TrackerError;

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;

pub type Result<T> = std::result::Result<T, TrackerError>;

/// Key used to check that a store accepts writes.
pub const PROBE_KEY: &str = "__cp_test__";

/// String-keyed store holding serialized documents.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;

    /// Short label used in log lines.
    fn describe(&self) -> String {
        "key-value store".into()
    }
}

/// Writes and removes a probe key. Any failure marks the store unusable.
pub fn check_availability(store: &dyn KeyValueStore) -> Result<()> {
    store.set(PROBE_KEY, PROBE_KEY)?;
    store.remove(PROBE_KEY)?;
    Ok(())
}

/// Reads and writes the whole budget document under a single key.
pub struct StateRepository {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl StateRepository {
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn load_raw(&self) -> Result<Option<String>> {
        self.store.get(&self.key)
    }

    /// Loads the stored document.
    ///
    /// A missing or blank value yields an empty budget. A value that cannot be
    /// read yields an empty budget plus a warning.
    pub fn load(&self, normalizer: &Normalizer<'_>) -> LoadReport {
        match self.load_raw() {
            Ok(Some(raw)) if !raw.trim().is_empty() => normalizer.normalize(&raw),
            Ok(_) => LoadReport::fresh(),
            Err(err) => {
                let mut report = LoadReport::fresh();
                report
                    .warnings
                    .push(format!("stored budget could not be read ({err}); starting fresh"));
                report
            }
        }
    }

    pub fn persist(&self, state: &BudgetState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        self.store.set(&self.key, &json)?;
        tracing::debug!(key = %self.key, bytes = json.len(), "budget persisted");
        Ok(())
    }
}
