//! Entity repositories.
//!
//! One repository per entity kind. Each operation derives its keys through
//! [`crate::key`], performs the existence checks the store cannot enforce
//! (parent present, no dependents), then reads and writes through a
//! [`RecordStore`].
//!
//! Project and action writes are not locked: concurrent updates to the same
//! record are last-writer-wins. Counter increments go through a
//! [`LockManager`](crate::lock::LockManager), see [`CounterRepository`].

mod action;
mod counter;
mod project;

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::id::{IdGenerator, UuidGenerator};
use crate::key::{ActionKey, ScanFilter};
use crate::store::{Codec, KvStore, RecordStore};
use crate::tenant::Tenant;

pub use action::ActionRepository;
pub use counter::CounterRepository;
pub use project::ProjectRepository;

/// Collaborators shared by every repository: the record store, the id
/// source and the clock. Clones share all three.
pub struct RepositoryContext<S> {
    records: RecordStore<S>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl<S: KvStore> RepositoryContext<S> {
    /// Context with uuid ids and the system clock.
    pub fn new(store: S, codec: Codec) -> Self {
        Self {
            records: RecordStore::new(store, codec),
            ids: Arc::new(UuidGenerator),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn records(&self) -> &RecordStore<S> {
        &self.records
    }

    /// Keys of the actions that belong to `project_id`.
    ///
    /// The prefix scan `{tenant}:{project_id}` also matches projects whose id
    /// merely starts with `project_id`, so each key is parsed and kept only
    /// on an exact project segment.
    pub(crate) fn action_keys_of_project(
        &self,
        tenant: &Tenant,
        project_id: &str,
    ) -> Result<Vec<String>> {
        let filter = ScanFilter::actions_of_project(tenant, project_id);
        let keys = self.records.list(filter.prefix(), filter.suffix())?;
        Ok(keys
            .into_iter()
            .filter(|key| {
                ActionKey::parse(key).is_some_and(|parts| {
                    parts.tenant == tenant.as_str() && parts.project_id == project_id
                })
            })
            .collect())
    }
}

impl<S: Clone> Clone for RepositoryContext<S> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
            ids: self.ids.clone(),
            clock: self.clock.clone(),
        }
    }
}
