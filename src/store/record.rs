//! RecordStore - typed record access over a raw `KvStore`.

use serde::{de::DeserializeOwned, Serialize};

use super::{Codec, KvStore, StoreError};

/// Typed wrapper around a `KvStore`.
///
/// Owns no state beyond the underlying store and the record encoding.
/// Clones share the same storage when the inner store does.
#[derive(Clone)]
pub struct RecordStore<S> {
    store: S,
    codec: Codec,
}

impl<S: KvStore> RecordStore<S> {
    pub fn new(store: S, codec: Codec) -> Self {
        Self { store, codec }
    }

    /// Access the inner store.
    pub fn inner(&self) -> &S {
        &self.store
    }

    pub fn codec(&self) -> Codec {
        self.codec
    }

    /// Read and decode the record at `key`.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<T, StoreError> {
        let bytes = self.store.read(key)?;
        self.codec.decode(&bytes)
    }

    /// Like `read`, but an absent key is `Ok(None)`.
    pub fn read_optional<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.read(key) {
            Ok(record) => Ok(Some(record)),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Check that a value exists at `key` without decoding it.
    pub fn exists(&self, key: &str) -> Result<bool, StoreError> {
        match self.store.read(key) {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Encode and write a record at `key`.
    pub fn write<T: Serialize>(&self, key: &str, record: &T) -> Result<(), StoreError> {
        let bytes = self.codec.encode(record)?;
        self.store.write(key, bytes)
    }

    /// Delete the value at `key`. Returns `StoreError::NotFound` if absent.
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.store.delete(key)
    }

    /// Delete the value at `key`, treating an absent key as success.
    pub fn delete_tolerant(&self, key: &str) -> Result<(), StoreError> {
        match self.store.delete(key) {
            Ok(()) | Err(StoreError::NotFound(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// List keys by prefix and suffix.
    pub fn list(&self, prefix: &str, suffix: &str) -> Result<Vec<String>, StoreError> {
        self.store.list(prefix, suffix)
    }

    /// Read and decode every key in order. Any failure aborts the whole call.
    pub fn read_all<T: DeserializeOwned>(&self, keys: &[String]) -> Result<Vec<T>, StoreError> {
        keys.iter().map(|key| self.read(key)).collect()
    }
}
