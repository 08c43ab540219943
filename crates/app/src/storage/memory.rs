//! In-memory storage, for tests and offline runs that should leave no trace.

use std::sync::RwLock;

use rustc_hash::FxHashMap;

use super::{Storage, StorageError, StorageKey};

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<FxHashMap<StorageKey, String>>,
}

impl MemoryStorage {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        let values = self.values.read().map_err(|_poisoned| StorageError::Poisoned)?;

        Ok(values.get(&key).cloned())
    }

    fn write(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.write().map_err(|_poisoned| StorageError::Poisoned)?;

        values.insert(key, value.to_string());

        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        let mut values = self.values.write().map_err(|_poisoned| StorageError::Poisoned)?;

        values.remove(&key);

        Ok(())
    }
}
