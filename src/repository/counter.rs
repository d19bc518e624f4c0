use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::key::{CounterKey, ScanFilter};
use crate::lock::{InMemoryLockManager, LockManager};
use crate::model::Counter;
use crate::store::{KvStore, StoreError};
use crate::tenant::Tenant;

use super::RepositoryContext;

/// Named counters, keyed `{tenant}:{name}`.
///
/// `increment` is the only read-modify-write in the crate that is guarded:
/// it holds the lock for the counter's key from the read until the write,
/// so concurrent increments never lose an update.
pub struct CounterRepository<S, M = InMemoryLockManager> {
    ctx: RepositoryContext<S>,
    locks: Arc<M>,
}

impl<S: KvStore> CounterRepository<S> {
    /// Repository with a per-key in-memory lock table.
    pub fn new(ctx: RepositoryContext<S>) -> Self {
        Self::with_locks(ctx, Arc::new(InMemoryLockManager::new()))
    }
}

impl<S: KvStore, M: LockManager> CounterRepository<S, M> {
    pub fn with_locks(ctx: RepositoryContext<S>, locks: Arc<M>) -> Self {
        Self { ctx, locks }
    }

    /// Create the counter with value 1, or add one to it. Returns the new record.
    pub fn increment(&self, tenant: &Tenant, name: &str) -> Result<Counter> {
        let key = Self::key(tenant, name)?;

        let _guard = self
            .locks
            .acquire(key.as_str())
            .map_err(|e| Error::Internal(e.to_string()))?;

        let counter = match self.ctx.records.read_optional::<Counter>(key.as_str())? {
            Some(mut counter) => {
                counter.value = counter.value.saturating_add(1);
                counter
            }
            None => Counter::first(name, self.ctx.clock.now()),
        };
        self.ctx.records.write(key.as_str(), &counter)?;

        debug!(%tenant, %key, value = counter.value, "counter incremented");
        Ok(counter)
    }

    pub fn get(&self, tenant: &Tenant, name: &str) -> Result<Counter> {
        let key = Self::key(tenant, name)?;
        self.read(&key)
    }

    /// Delete a counter and return it. A concurrent delete is not an error.
    pub fn delete(&self, tenant: &Tenant, name: &str) -> Result<Counter> {
        let key = Self::key(tenant, name)?;
        let counter = self.read(&key)?;
        self.ctx
            .records
            .delete_tolerant(key.as_str())
            .map_err(|e| Error::Internal(format!("failed to delete counter: {e}")))?;

        debug!(%tenant, %key, "counter deleted");
        Ok(counter)
    }

    /// All counters of the tenant. Project and action records sharing the
    /// tenant prefix are skipped; any undecodable counter fails the call.
    pub fn list(&self, tenant: &Tenant) -> Result<Vec<Counter>> {
        let filter = ScanFilter::counters(tenant);
        let keys: Vec<String> = self
            .ctx
            .records
            .list(filter.prefix(), filter.suffix())?
            .into_iter()
            .filter(|key| CounterKey::parse(tenant, key).is_some())
            .collect();

        Ok(self.ctx.records.read_all(&keys)?)
    }

    fn key(tenant: &Tenant, name: &str) -> Result<CounterKey> {
        if name.is_empty() {
            return Err(Error::invalid("missing name"));
        }
        let key = CounterKey::new(tenant, name);
        if key.shadows_entity() {
            return Err(Error::invalid(format!(
                "counter name {name} collides with a project or action key"
            )));
        }
        Ok(key)
    }

    fn read(&self, key: &CounterKey) -> Result<Counter> {
        match self.ctx.records.read(key.as_str()) {
            Ok(counter) => Ok(counter),
            Err(StoreError::NotFound(_)) => Err(Error::not_found("counter not found")),
            Err(e) => Err(e.into()),
        }
    }
}

impl<S: Clone, M> Clone for CounterRepository<S, M> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            locks: self.locks.clone(),
        }
    }
}
