//! Analytics: the operations offered to the transport layer.
//!
//! One method per repository operation. Each takes the caller's [`Session`]
//! (for the tenant) and a request struct, and returns a response struct or an
//! [`Error`]. Transport, routing and encoding of these structs live outside
//! this crate.
//!
//! ## Example
//!
//! ```ignore
//! use analytics_store::{Analytics, InMemoryKvStore, Session};
//! use analytics_store::service::{AnalyticsRequest, CreateProjectRequest};
//!
//! let analytics = Analytics::new(InMemoryKvStore::new());
//! let session = Session::for_tenant("acme");
//!
//! let project = analytics.create_project(&session, CreateProjectRequest {
//!     name: "Site".into(),
//!     ..Default::default()
//! })?.project;
//!
//! analytics.track(&session, AnalyticsRequest::new("signups"))?;
//! ```

mod types;

use tracing::debug;

pub use types::*;

use crate::config::{Config, TrackConfig};
use crate::error::{Error, Result};
use crate::lock::InMemoryLockManager;
use crate::repository::{
    ActionRepository, CounterRepository, ProjectRepository, RepositoryContext,
};
use crate::store::KvStore;
use crate::tenant::{Session, Tenant};
use crate::track::{TrackStats, TrackWorker};

use std::sync::Arc;

/// Projects, actions and counters over one key-value store.
pub struct Analytics<S> {
    projects: ProjectRepository<S>,
    actions: ActionRepository<S>,
    counters: CounterRepository<S>,
    tracker: TrackWorker,
}

impl<S: KvStore + Clone + 'static> Analytics<S> {
    /// Service with the default configuration (JSON records, one track worker).
    pub fn new(store: S) -> Self {
        Self::with_config(store, &Config::default())
    }

    pub fn with_config(store: S, config: &Config) -> Self {
        Self::from_context(RepositoryContext::new(store, config.codec), &config.track)
    }

    /// Build from an explicit context, e.g. one with deterministic ids or clock.
    pub fn from_context(ctx: RepositoryContext<S>, track: &TrackConfig) -> Self {
        let locks = Arc::new(InMemoryLockManager::with_scope(track.lock_scope));
        let counters = CounterRepository::with_locks(ctx.clone(), locks);
        let tracker = TrackWorker::spawn(counters.clone(), track.workers);
        debug!(workers = tracker.workers(), "analytics service started");

        Self {
            projects: ProjectRepository::new(ctx.clone()),
            actions: ActionRepository::new(ctx),
            counters,
            tracker,
        }
    }

    pub fn projects(&self) -> &ProjectRepository<S> {
        &self.projects
    }

    pub fn actions(&self) -> &ActionRepository<S> {
        &self.actions
    }

    pub fn counters(&self) -> &CounterRepository<S> {
        &self.counters
    }

    /// Stop the track worker after it has applied everything queued so far.
    pub fn shutdown(self) -> TrackStats {
        let stats = self.tracker.stop();
        debug!(applied = stats.applied, dropped = stats.dropped, "analytics service stopped");
        stats
    }

    // ------------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------------

    pub fn create_project(
        &self,
        session: &Session,
        req: CreateProjectRequest,
    ) -> Result<ProjectResponse> {
        let project = self
            .projects
            .create(&tenant(session)?, &req.name, &req.description)?;
        Ok(ProjectResponse { project })
    }

    pub fn get_project(&self, session: &Session, req: RequestById) -> Result<ProjectResponse> {
        let project = self.projects.get(&tenant(session)?, &req.id)?;
        Ok(ProjectResponse { project })
    }

    pub fn update_project(
        &self,
        session: &Session,
        req: UpdateProjectRequest,
    ) -> Result<ProjectResponse> {
        let update = req.project.ok_or_else(|| Error::invalid("missing project"))?;
        let project = self.projects.update(
            &tenant(session)?,
            &update.id,
            &update.name,
            &update.description,
        )?;
        Ok(ProjectResponse { project })
    }

    pub fn delete_project(&self, session: &Session, req: RequestById) -> Result<ProjectResponse> {
        let project = self.projects.delete(&tenant(session)?, &req.id)?;
        Ok(ProjectResponse { project })
    }

    pub fn list_projects(&self, session: &Session, _req: Empty) -> Result<ListProjectsResponse> {
        let projects = self.projects.list(&tenant(session)?)?;
        Ok(ListProjectsResponse { projects })
    }

    // ------------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------------

    pub fn create_action(
        &self,
        session: &Session,
        req: CreateActionRequest,
    ) -> Result<ActionResponse> {
        let action = self.actions.create(
            &tenant(session)?,
            &req.name,
            &req.description,
            &req.project,
        )?;
        Ok(ActionResponse { action })
    }

    pub fn get_action(&self, session: &Session, req: RequestById) -> Result<ActionResponse> {
        let action = self.actions.get(&tenant(session)?, &req.id)?;
        Ok(ActionResponse { action })
    }

    pub fn update_action(
        &self,
        session: &Session,
        req: UpdateActionRequest,
    ) -> Result<ActionResponse> {
        let update = req.action.ok_or_else(|| Error::invalid("missing action"))?;
        let action = self.actions.update(
            &tenant(session)?,
            &update.id,
            &update.name,
            &update.description,
        )?;
        Ok(ActionResponse { action })
    }

    pub fn delete_action(&self, session: &Session, req: RequestById) -> Result<ActionResponse> {
        let action = self.actions.delete(&tenant(session)?, &req.id)?;
        Ok(ActionResponse { action })
    }

    pub fn trigger_action(&self, session: &Session, req: RequestById) -> Result<Empty> {
        self.actions.trigger(&tenant(session)?, &req.id)?;
        Ok(Empty {})
    }

    pub fn reset_action(&self, session: &Session, req: RequestById) -> Result<ActionResponse> {
        let action = self.actions.reset(&tenant(session)?, &req.id)?;
        Ok(ActionResponse { action })
    }

    pub fn list_actions(
        &self,
        session: &Session,
        req: ListActionsRequest,
    ) -> Result<ListActionsResponse> {
        let actions = self.actions.list(&tenant(session)?, &req.project)?;
        Ok(ListActionsResponse { actions })
    }

    // ------------------------------------------------------------------------
    // Counters
    // ------------------------------------------------------------------------

    /// Queue one increment of the named counter and return immediately.
    ///
    /// Only the name and tenant are validated here. The increment runs on the track
    /// worker after this call has returned; if it fails, nobody is told.
    pub fn track(&self, session: &Session, req: AnalyticsRequest) -> Result<Empty> {
        if req.name.is_empty() {
            return Err(Error::invalid("missing name"));
        }
        self.tracker.submit(tenant(session)?, req.name);
        Ok(Empty {})
    }

    pub fn get(&self, session: &Session, req: AnalyticsRequest) -> Result<AnalyticsResponse> {
        let counter = self.counters.get(&tenant(session)?, &req.name)?;
        Ok(AnalyticsResponse { counter })
    }

    pub fn delete(&self, session: &Session, req: AnalyticsRequest) -> Result<AnalyticsResponse> {
        let counter = self.counters.delete(&tenant(session)?, &req.name)?;
        Ok(AnalyticsResponse { counter })
    }

    pub fn list(&self, session: &Session, _req: Empty) -> Result<Counters> {
        let counters = self.counters.list(&tenant(session)?)?;
        Ok(Counters { counters })
    }
}

fn tenant(session: &Session) -> Result<Tenant> {
    Tenant::from_session(session)
}
