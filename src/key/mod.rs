//! Composite store keys.
//!
//! The store has no notion of relations, so the hierarchy
//! tenant → project → action is spelled out in the key itself:
//!
//! | Key | Format |
//! |-----|--------|
//! | [`ProjectKey`] | `{tenant}:{project_id}:project` |
//! | [`ActionKey`] | `{tenant}:{project_id}:{action_id}:action` |
//! | [`CounterKey`] | `{tenant}:{counter_name}` |
//!
//! Scans over these keys are described by [`ScanFilter`]. Tenants and entity
//! ids are single segments: [`segment`] rejects any containing `:` before
//! they reach a key.

mod filter;

use std::fmt;

use crate::error::{Error, Result};
use crate::tenant::Tenant;

pub use filter::ScanFilter;

/// Trailing segment of every project key.
pub const PROJECT_KIND: &str = "project";
/// Trailing segment of every action key.
pub const ACTION_KIND: &str = "action";

const SEPARATOR: char = ':';

/// Validate a caller-supplied id before it is placed in a key.
///
/// `field` names the id in the error, e.g. `"project id"`.
pub fn segment<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(Error::invalid(format!("missing {field}")));
    }
    if value.contains(SEPARATOR) {
        return Err(Error::invalid(format!("{field} must not contain '{SEPARATOR}'")));
    }
    Ok(value)
}

// ============================================================================
// ProjectKey
// ============================================================================

/// Key of a project record: `{tenant}:{project_id}:project`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectKey(String);

impl ProjectKey {
    pub fn new(tenant: &Tenant, id: &str) -> Self {
        Self(format!("{tenant}{SEPARATOR}{id}{SEPARATOR}{PROJECT_KIND}"))
    }

    /// Split a raw key back into its segments, right to left.
    pub fn parse(key: &str) -> Option<ProjectKeyParts<'_>> {
        let mut parts = key.rsplitn(3, SEPARATOR);
        if parts.next()? != PROJECT_KIND {
            return None;
        }
        let project_id = parts.next()?;
        let tenant = parts.next()?;
        if project_id.is_empty() || tenant.is_empty() {
            return None;
        }
        Some(ProjectKeyParts { tenant, project_id })
    }
}

/// Borrowed segments of a project key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectKeyParts<'a> {
    pub tenant: &'a str,
    pub project_id: &'a str,
}

// ============================================================================
// ActionKey
// ============================================================================

/// Key of an action record: `{tenant}:{project_id}:{action_id}:action`.
///
/// The parent project is part of the key, but actions are looked up by id
/// alone through [`ScanFilter::action_by_id`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionKey(String);

impl ActionKey {
    pub fn new(tenant: &Tenant, project_id: &str, id: &str) -> Self {
        Self(format!(
            "{tenant}{SEPARATOR}{project_id}{SEPARATOR}{id}{SEPARATOR}{ACTION_KIND}"
        ))
    }

    /// Split a raw key back into its segments, right to left.
    pub fn parse(key: &str) -> Option<ActionKeyParts<'_>> {
        let mut parts = key.rsplitn(4, SEPARATOR);
        if parts.next()? != ACTION_KIND {
            return None;
        }
        let action_id = parts.next()?;
        let project_id = parts.next()?;
        let tenant = parts.next()?;
        if action_id.is_empty() || project_id.is_empty() || tenant.is_empty() {
            return None;
        }
        Some(ActionKeyParts {
            tenant,
            project_id,
            action_id,
        })
    }
}

/// Borrowed segments of an action key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionKeyParts<'a> {
    pub tenant: &'a str,
    pub project_id: &'a str,
    pub action_id: &'a str,
}

// ============================================================================
// CounterKey
// ============================================================================

/// Key of a counter record: `{tenant}:{counter_name}`.
///
/// Counters live in a flat namespace directly under the tenant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CounterKey(String);

impl CounterKey {
    pub fn new(tenant: &Tenant, name: &str) -> Self {
        Self(format!("{tenant}{SEPARATOR}{name}"))
    }

    /// True when this counter key would be read back as a project or action
    /// key, i.e. the counter name would shadow an entity record.
    pub fn shadows_entity(&self) -> bool {
        is_entity_key(&self.0)
    }

    /// Return the counter name if `key` is a counter key of `tenant`.
    ///
    /// Project and action keys share the tenant prefix and are rejected.
    pub fn parse<'a>(tenant: &Tenant, key: &'a str) -> Option<&'a str> {
        let name = key
            .strip_prefix(tenant.as_str())?
            .strip_prefix(SEPARATOR)?;
        if name.is_empty() || is_entity_key(key) {
            return None;
        }
        Some(name)
    }
}

fn is_entity_key(key: &str) -> bool {
    ProjectKey::parse(key).is_some() || ActionKey::parse(key).is_some()
}

macro_rules! string_key {
    ($($ty:ident),+) => {
        $(
            impl $ty {
                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl AsRef<str> for $ty {
                fn as_ref(&self) -> &str {
                    &self.0
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }
        )+
    };
}

string_key!(ProjectKey, ActionKey, CounterKey);
