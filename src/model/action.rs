use serde::{Deserialize, Serialize};

/// A triggerable counter that belongs to a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Action {
    pub id: String,
    pub created: String,
    pub updated: String,
    pub name: String,
    pub description: String,
    pub value: i64,
    /// Id of the parent project. Also encoded in the action's key.
    pub project: String,
}

impl Action {
    pub(crate) fn apply(&mut self, name: &str, description: &str) {
        if !name.is_empty() {
            self.name = name.to_string();
        }
        if !description.is_empty() {
            self.description = description.to_string();
        }
    }

    /// Add one, stopping at `i64::MAX`.
    pub(crate) fn trigger(&mut self) {
        self.value = self.value.saturating_add(1);
    }

    pub(crate) fn reset(&mut self) {
        self.value = 0;
    }
}
