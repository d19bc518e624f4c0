//! Locks guarding read-modify-write sequences against the store.
//!
//! The store itself gives no isolation, so counter increments take a lock
//! for their key before reading and release it after writing.
//! [`InMemoryLockManager`] keeps one lock per key, or a single lock for
//! every key when built with [`LockScope::Global`].

mod error;
mod in_memory;
mod lock;
mod lock_manager;

use serde::{Deserialize, Serialize};

pub use error::LockError;
pub use in_memory::{InMemoryLock, InMemoryLockManager};
pub use lock::{Lock, LockGuard};
pub use lock_manager::LockManager;

/// Which keys share a lock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockScope {
    /// One lock per key; unrelated counters never wait on each other.
    #[default]
    PerKey,
    /// One lock for the whole process.
    Global,
}
