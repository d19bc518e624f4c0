//! InMemoryKvStore - BTreeMap-backed key-value store for testing and development.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use super::{KvStore, StoreError};

/// In-memory key-value store backed by a `BTreeMap`.
///
/// Clone-friendly via `Arc`: clones share the same storage. `list` yields
/// keys in lexicographic order.
#[derive(Clone, Default)]
pub struct InMemoryKvStore {
    storage: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl InMemoryKvStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.storage.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KvStore for InMemoryKvStore {
    fn read(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        storage
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn write(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        storage.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        storage
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn list(&self, prefix: &str, suffix: &str) -> Result<Vec<String>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        Ok(storage
            .range(prefix.to_string()..)
            .map(|(key, _)| key)
            .take_while(|key| key.starts_with(prefix))
            .filter(|key| key.len() >= prefix.len() + suffix.len() && key.ends_with(suffix))
            .cloned()
            .collect())
    }
}
