//! Session variables from the request context.

use std::collections::HashMap;

/// Variable carrying the caller's tenant.
pub const TENANT_VARIABLE: &str = "x-tenant";

/// Parsed session variables from the incoming request.
///
/// The transport layer fills this from whatever metadata it receives
/// (headers, RPC metadata, auth claims). The store only reads the tenant:
///
/// ```json
/// {
///   "x-tenant": "acme"
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    variables: HashMap<String, String>,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session from a map of variables.
    pub fn from_map(variables: HashMap<String, String>) -> Self {
        Self { variables }
    }

    /// Create a session bound to a tenant.
    pub fn for_tenant(tenant: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.set(TENANT_VARIABLE, tenant);
        session
    }

    /// Get the tenant (`x-tenant`), if the caller supplied one.
    pub fn tenant(&self) -> Option<&str> {
        self.get(TENANT_VARIABLE)
    }

    /// Get a session variable by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|v| v.as_str())
    }

    /// Set a session variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Check if a session variable exists.
    pub fn has(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }
}
