use tracing::debug;

use crate::error::{Error, Result};
use crate::key::{segment, ProjectKey, ScanFilter};
use crate::model::Project;
use crate::store::{KvStore, StoreError};
use crate::tenant::Tenant;

use super::RepositoryContext;

/// Projects of a tenant, keyed `{tenant}:{id}:project`.
pub struct ProjectRepository<S> {
    ctx: RepositoryContext<S>,
}

impl<S: KvStore> ProjectRepository<S> {
    pub fn new(ctx: RepositoryContext<S>) -> Self {
        Self { ctx }
    }

    /// Create a project with a fresh id; `created == updated`.
    pub fn create(&self, tenant: &Tenant, name: &str, description: &str) -> Result<Project> {
        if name.is_empty() {
            return Err(Error::invalid("missing project name"));
        }

        let now = self.ctx.clock.now();
        let project = Project {
            id: self.ctx.ids.generate(),
            name: name.to_string(),
            description: description.to_string(),
            created: now.clone(),
            updated: now,
        };

        let key = ProjectKey::new(tenant, &project.id);
        self.ctx
            .records
            .write(key.as_str(), &project)
            .map_err(|e| Error::Internal(format!("failed to create project: {e}")))?;

        debug!(%tenant, %key, "project created");
        Ok(project)
    }

    pub fn get(&self, tenant: &Tenant, id: &str) -> Result<Project> {
        segment("project id", id)?;
        self.read(&ProjectKey::new(tenant, id))
    }

    /// Overwrite the supplied (non-empty) fields and refresh `updated`.
    /// At least one of `name` and `description` must be non-empty.
    pub fn update(
        &self,
        tenant: &Tenant,
        id: &str,
        name: &str,
        description: &str,
    ) -> Result<Project> {
        segment("project id", id)?;
        if name.is_empty() && description.is_empty() {
            return Err(Error::invalid("provide a property to update"));
        }

        let key = ProjectKey::new(tenant, id);
        let mut project = self.read(&key)?;
        project.apply(name, description);
        project.updated = self.ctx.clock.now();

        self.ctx.records.write(key.as_str(), &project)?;

        debug!(%tenant, %key, "project updated");
        Ok(project)
    }

    /// Delete a project that has no actions. Returns the deleted record.
    ///
    /// The dependents scan runs first, so a project with actions reports
    /// `FailedPrecondition` even before its own existence is checked.
    pub fn delete(&self, tenant: &Tenant, id: &str) -> Result<Project> {
        segment("project id", id)?;

        if !self.ctx.action_keys_of_project(tenant, id)?.is_empty() {
            return Err(Error::FailedPrecondition(
                "project can't be deleted if it has actions".into(),
            ));
        }

        let key = ProjectKey::new(tenant, id);
        let project = self.read(&key)?;
        self.ctx.records.delete_tolerant(key.as_str())?;

        debug!(%tenant, %key, "project deleted");
        Ok(project)
    }

    /// All projects of the tenant. One undecodable record fails the whole call.
    pub fn list(&self, tenant: &Tenant) -> Result<Vec<Project>> {
        let filter = ScanFilter::projects(tenant);
        let keys: Vec<String> = self
            .ctx
            .records
            .list(filter.prefix(), filter.suffix())?
            .into_iter()
            .filter(|key| {
                ProjectKey::parse(key).is_some_and(|parts| parts.tenant == tenant.as_str())
            })
            .collect();

        Ok(self.ctx.records.read_all(&keys)?)
    }

    /// Whether the project exists, without decoding it.
    pub fn exists(&self, tenant: &Tenant, id: &str) -> Result<bool> {
        segment("project id", id)?;
        Ok(self.ctx.records.exists(ProjectKey::new(tenant, id).as_str())?)
    }

    fn read(&self, key: &ProjectKey) -> Result<Project> {
        match self.ctx.records.read(key.as_str()) {
            Ok(project) => Ok(project),
            Err(StoreError::NotFound(_)) => Err(Error::not_found("project not found")),
            Err(e) => Err(e.into()),
        }
    }
}

impl<S: Clone> Clone for ProjectRepository<S> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
        }
    }
}
