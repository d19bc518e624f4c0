//! Tenant resolution.
//!
//! Every key is namespaced by a tenant. Callers that supply no tenant land in
//! [`DEFAULT_TENANT`]. A tenant is a single key segment, so it may not contain
//! the `:` separator.

mod session;

use std::fmt;

use crate::error::{Error, Result};

pub use session::{Session, TENANT_VARIABLE};

/// Tenant used when the caller supplies none.
pub const DEFAULT_TENANT: &str = "default";

/// An isolation namespace, always the leading key segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tenant(String);

impl Tenant {
    /// Resolve an optional caller-supplied tenant, falling back to `"default"`
    /// when it is absent or empty. A tenant containing `:` is rejected.
    pub fn resolve(tenant: Option<&str>) -> Result<Self> {
        match tenant {
            Some(t) if t.contains(':') => Err(Error::invalid(format!(
                "tenant {t} must not contain ':'"
            ))),
            Some(t) if !t.is_empty() => Ok(Tenant(t.to_string())),
            _ => Ok(Self::default()),
        }
    }

    /// Resolve the tenant carried by a session.
    pub fn from_session(session: &Session) -> Result<Self> {
        Self::resolve(session.tenant())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Tenant {
    fn default() -> Self {
        Tenant(DEFAULT_TENANT.to_string())
    }
}

impl TryFrom<&str> for Tenant {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Tenant::resolve(Some(value))
    }
}

impl AsRef<str> for Tenant {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
