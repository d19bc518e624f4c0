//! KvStore - the raw storage primitives.

use std::sync::Arc;

use super::StoreError;

/// Flat key-value storage.
///
/// Implementations may be in-memory, a file, or a remote service. Reads and
/// writes are individually atomic at best; a read followed by a write is not.
pub trait KvStore: Send + Sync {
    /// Read the value at `key`. Returns `StoreError::NotFound` if absent.
    fn read(&self, key: &str) -> Result<Vec<u8>, StoreError>;

    /// Write (upsert) the value at `key`.
    fn write(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Delete the value at `key`. Returns `StoreError::NotFound` if absent.
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// List keys starting with `prefix` and ending with `suffix`.
    ///
    /// Order is whatever the backend yields; callers must not depend on it.
    fn list(&self, prefix: &str, suffix: &str) -> Result<Vec<String>, StoreError>;
}

impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    fn read(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        (**self).write(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }

    fn list(&self, prefix: &str, suffix: &str) -> Result<Vec<String>, StoreError> {
        (**self).list(prefix, suffix)
    }
}
