use tracing::debug;

use crate::error::{Error, Result};
use crate::key::{segment, ActionKey, ProjectKey, ScanFilter};
use crate::model::Action;
use crate::store::{KvStore, StoreError};
use crate::tenant::Tenant;

use super::RepositoryContext;

/// Actions, keyed `{tenant}:{project_id}:{id}:action`.
///
/// Only `create` and `list` take the parent project. Every other operation
/// locates the action by id alone with a tenant-wide suffix scan.
pub struct ActionRepository<S> {
    ctx: RepositoryContext<S>,
}

impl<S: KvStore> ActionRepository<S> {
    pub fn new(ctx: RepositoryContext<S>) -> Self {
        Self { ctx }
    }

    /// Create an action under an existing project, starting at value 0.
    pub fn create(
        &self,
        tenant: &Tenant,
        name: &str,
        description: &str,
        project_id: &str,
    ) -> Result<Action> {
        if name.is_empty() {
            return Err(Error::invalid("missing action name"));
        }
        segment("project id", project_id)?;
        self.require_project(tenant, project_id)?;

        let now = self.ctx.clock.now();
        let action = Action {
            id: self.ctx.ids.generate(),
            created: now.clone(),
            updated: now,
            name: name.to_string(),
            description: description.to_string(),
            value: 0,
            project: project_id.to_string(),
        };

        let key = ActionKey::new(tenant, project_id, &action.id);
        self.ctx
            .records
            .write(key.as_str(), &action)
            .map_err(|e| Error::Internal(format!("failed to create action: {e}")))?;

        debug!(%tenant, %key, "action created");
        Ok(action)
    }

    pub fn get(&self, tenant: &Tenant, id: &str) -> Result<Action> {
        let (_, action) = self.resolve(tenant, id)?;
        Ok(action)
    }

    /// Overwrite the supplied (non-empty) fields and refresh `updated`.
    pub fn update(
        &self,
        tenant: &Tenant,
        id: &str,
        name: &str,
        description: &str,
    ) -> Result<Action> {
        segment("action id", id)?;
        if name.is_empty() && description.is_empty() {
            return Err(Error::invalid("provide a property to update"));
        }

        let (key, mut action) = self.resolve(tenant, id)?;
        action.apply(name, description);
        action.updated = self.ctx.clock.now();
        self.ctx.records.write(&key, &action)?;

        debug!(%tenant, %key, "action updated");
        Ok(action)
    }

    /// Delete an action and return it. A concurrent delete of the same key is not an error.
    pub fn delete(&self, tenant: &Tenant, id: &str) -> Result<Action> {
        let (key, action) = self.resolve(tenant, id)?;
        self.ctx
            .records
            .delete_tolerant(&key)
            .map_err(|e| Error::Internal(format!("failed to delete action: {e}")))?;

        debug!(%tenant, %key, "action deleted");
        Ok(action)
    }

    /// Increment the action's value by exactly one.
    pub fn trigger(&self, tenant: &Tenant, id: &str) -> Result<()> {
        let (key, mut action) = self.resolve(tenant, id)?;
        action.trigger();
        self.ctx.records.write(&key, &action)?;

        debug!(%tenant, %key, value = action.value, "action triggered");
        Ok(())
    }

    /// Set the action's value back to zero and return the record.
    pub fn reset(&self, tenant: &Tenant, id: &str) -> Result<Action> {
        let (key, mut action) = self.resolve(tenant, id)?;
        action.reset();
        self.ctx.records.write(&key, &action)?;

        debug!(%tenant, %key, "action reset");
        Ok(action)
    }

    /// All actions of an existing project. Unknown project is `NotFound`,
    /// a project without actions is an empty list.
    pub fn list(&self, tenant: &Tenant, project_id: &str) -> Result<Vec<Action>> {
        segment("project id", project_id)?;
        self.require_project(tenant, project_id)?;

        let keys = self.ctx.action_keys_of_project(tenant, project_id)?;
        Ok(self.ctx.records.read_all(&keys)?)
    }

    fn require_project(&self, tenant: &Tenant, project_id: &str) -> Result<()> {
        let key = ProjectKey::new(tenant, project_id);
        if self.ctx.records.exists(key.as_str())? {
            Ok(())
        } else {
            Err(Error::not_found("project not found"))
        }
    }

    /// Locate an action by id alone.
    ///
    /// Scans `{tenant}` / `{id}:action`, then keeps only keys whose parsed
    /// tenant and action segments equal the request exactly: the suffix alone
    /// would also match any id ending in `id`. More than one exact match means
    /// the id is not unique in the tenant, which is reported rather than
    /// resolved by scan order.
    fn resolve(&self, tenant: &Tenant, id: &str) -> Result<(String, Action)> {
        segment("action id", id)?;

        let filter = ScanFilter::action_by_id(tenant, id);
        let mut matches = self
            .ctx
            .records
            .list(filter.prefix(), filter.suffix())?
            .into_iter()
            .filter(|key| {
                ActionKey::parse(key).is_some_and(|parts| {
                    parts.tenant == tenant.as_str() && parts.action_id == id
                })
            });

        let key = matches
            .next()
            .ok_or_else(|| Error::not_found("action not found"))?;
        if matches.next().is_some() {
            return Err(Error::Internal(format!("ambiguous action id {id}")));
        }

        match self.ctx.records.read(&key) {
            Ok(action) => Ok((key, action)),
            Err(StoreError::NotFound(_)) => Err(Error::not_found("action not found")),
            Err(e) => Err(e.into()),
        }
    }
}

impl<S: Clone> Clone for ActionRepository<S> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
        }
    }
}
