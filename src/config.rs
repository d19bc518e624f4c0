//! Service configuration.
//!
//! ```toml
//! codec = "json"
//!
//! [track]
//! workers = 2
//! lock_scope = "per_key"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lock::LockScope;
use crate::store::Codec;

/// Default number of track worker threads.
pub const DEFAULT_TRACK_WORKERS: usize = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Record encoding for everything this crate writes.
    pub codec: Codec,
    pub track: TrackConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Threads applying tracked increments.
    pub workers: usize,
    /// Whether counters share one lock or get one each.
    pub lock_scope: LockScope,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_TRACK_WORKERS,
            lock_scope: LockScope::PerKey,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
