use std::sync::Arc;

use super::{Lock, LockError, LockGuard};

/// Hands out the lock that guards a given key.
///
/// Repeated calls with the same key must return the same logical lock.
/// Different keys may share a lock; they must never share a writer.
pub trait LockManager: Send + Sync {
    /// The concrete lock type returned by this manager.
    type Lock: Lock;

    /// Get (or create) the lock for `key`.
    fn get_lock(&self, key: &str) -> Result<Arc<Self::Lock>, LockError>;

    /// Get the lock for `key` and block until it is held.
    fn acquire(&self, key: &str) -> Result<LockGuard<Self::Lock>, LockError> {
        LockGuard::acquire(self.get_lock(key)?)
    }
}
