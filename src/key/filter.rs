//! Prefix/suffix scan filters, the only query the store supports.

use crate::tenant::Tenant;

use super::{ACTION_KIND, PROJECT_KIND, SEPARATOR};

/// A `(prefix, suffix)` pair handed to the store's `list` primitive.
///
/// The store returns every key that starts with `prefix` and ends with
/// `suffix`. An empty suffix matches any key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFilter {
    prefix: String,
    suffix: String,
}

impl ScanFilter {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// All projects of a tenant: prefix `{tenant}:`, suffix `:project`.
    pub fn projects(tenant: &Tenant) -> Self {
        Self::new(
            format!("{tenant}{SEPARATOR}"),
            format!("{SEPARATOR}{PROJECT_KIND}"),
        )
    }

    /// All actions under one project: prefix `{tenant}:{project_id}`, suffix `:action`.
    pub fn actions_of_project(tenant: &Tenant, project_id: &str) -> Self {
        Self::new(
            format!("{tenant}{SEPARATOR}{project_id}"),
            format!("{SEPARATOR}{ACTION_KIND}"),
        )
    }

    /// An action by id, whatever its project: prefix `{tenant}`, suffix `{action_id}:action`.
    pub fn action_by_id(tenant: &Tenant, action_id: &str) -> Self {
        Self::new(
            tenant.as_str(),
            format!("{action_id}{SEPARATOR}{ACTION_KIND}"),
        )
    }

    /// All counters of a tenant: prefix `{tenant}`, no suffix.
    pub fn counters(tenant: &Tenant) -> Self {
        Self::new(tenant.as_str(), "")
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Whether a key passes this filter.
    pub fn matches(&self, key: &str) -> bool {
        key.len() >= self.prefix.len() + self.suffix.len()
            && key.starts_with(&self.prefix)
            && key.ends_with(&self.suffix)
    }
}
