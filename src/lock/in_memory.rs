use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex};

use super::{Lock, LockError, LockManager, LockScope};

/// In-memory lock backed by `Mutex<bool>` + `Condvar`.
///
/// Unlike a `MutexGuard`, holding it is not tied to a borrow, so it can be
/// taken and released across calls through [`LockGuard`](super::LockGuard).
pub struct InMemoryLock {
    state: Mutex<bool>,
    wake: Condvar,
}

impl InMemoryLock {
    pub fn new() -> Self {
        InMemoryLock {
            state: Mutex::new(false),
            wake: Condvar::new(),
        }
    }
}

impl Default for InMemoryLock {
    fn default() -> Self {
        Self::new()
    }
}

impl Lock for InMemoryLock {
    fn lock(&self) -> Result<(), LockError> {
        let mut locked = self
            .state
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        while *locked {
            locked = self
                .wake
                .wait(locked)
                .map_err(|e| LockError::Poisoned(e.to_string()))?;
        }
        *locked = true;
        Ok(())
    }

    fn try_lock(&self) -> Result<bool, LockError> {
        let mut locked = self
            .state
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        if *locked {
            Ok(false)
        } else {
            *locked = true;
            Ok(true)
        }
    }

    fn unlock(&self) -> Result<(), LockError> {
        let mut locked = self
            .state
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        if *locked {
            *locked = false;
            self.wake.notify_one();
        }
        Ok(())
    }
}

/// In-memory lock table.
///
/// With [`LockScope::PerKey`] it lazily creates one `InMemoryLock` per key and
/// returns the same `Arc` for repeated lookups while anyone still holds it.
/// Entries nobody holds are evicted on the next lookup, so the table only
/// grows with the number of keys in use at once. With [`LockScope::Global`]
/// every key gets the same lock.
pub struct InMemoryLockManager {
    scope: LockScope,
    global: Arc<InMemoryLock>,
    locks: Mutex<HashMap<String, Arc<InMemoryLock>>>,
}

impl InMemoryLockManager {
    pub fn new() -> Self {
        Self::with_scope(LockScope::PerKey)
    }

    pub fn with_scope(scope: LockScope) -> Self {
        InMemoryLockManager {
            scope,
            global: Arc::new(InMemoryLock::new()),
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn scope(&self) -> LockScope {
        self.scope
    }

    /// Number of per-key locks currently in the table.
    pub fn len(&self) -> usize {
        self.locks.lock().map(|locks| locks.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryLockManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LockManager for InMemoryLockManager {
    type Lock = InMemoryLock;

    fn get_lock(&self, key: &str) -> Result<Arc<InMemoryLock>, LockError> {
        if self.scope == LockScope::Global {
            return Ok(self.global.clone());
        }
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| LockError::Poisoned("lock table poisoned".into()))?;
        // A count of one means only the table holds it; new clones are only
        // handed out under this mutex.
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        Ok(locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(InMemoryLock::new()))
            .clone())
    }
}
