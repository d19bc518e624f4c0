use serde::{Deserialize, Serialize};

/// A named tally, created on first track.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Counter {
    pub name: String,
    pub created: String,
    pub value: i64,
}

impl Counter {
    pub(crate) fn first(name: &str, created: String) -> Self {
        Counter {
            name: name.to_string(),
            created,
            value: 1,
        }
    }
}
