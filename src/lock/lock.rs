use std::sync::Arc;

use super::LockError;

/// A single mutual-exclusion lock.
///
/// In-memory locks use `Mutex` + `Condvar`; a store shared by several
/// processes would need a distributed implementation behind the same trait.
pub trait Lock: Send + Sync {
    /// Acquire the lock, blocking until it becomes available.
    fn lock(&self) -> Result<(), LockError>;

    /// Try to acquire the lock without blocking.
    /// Returns `Ok(true)` if acquired, `Ok(false)` if already held.
    fn try_lock(&self) -> Result<bool, LockError>;

    /// Release the lock.
    fn unlock(&self) -> Result<(), LockError>;
}

/// Holds a lock until dropped.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct LockGuard<L: Lock> {
    lock: Arc<L>,
}

impl<L: Lock> LockGuard<L> {
    /// Block until `lock` is acquired.
    pub fn acquire(lock: Arc<L>) -> Result<Self, LockError> {
        lock.lock()?;
        Ok(Self { lock })
    }
}

impl<L: Lock> Drop for LockGuard<L> {
    fn drop(&mut self) {
        let _ = self.lock.unlock();
    }
}
