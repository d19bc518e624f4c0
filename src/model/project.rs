use serde::{Deserialize, Serialize};

/// A named grouping of actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created: String,
    pub updated: String,
}

impl Project {
    /// Overwrite the non-empty fields of an update; empty means "leave as is".
    pub(crate) fn apply(&mut self, name: &str, description: &str) {
        if !name.is_empty() {
            self.name = name.to_string();
        }
        if !description.is_empty() {
            self.description = description.to_string();
        }
    }
}
