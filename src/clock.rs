//! Record timestamps.

use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};

/// Source of `created` / `updated` timestamps.
pub trait Clock: Send + Sync {
    /// Current time as an RFC 3339 string.
    fn now(&self) -> String;
}

/// Wall clock, UTC, second precision (`2024-01-02T03:04:05Z`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// A clock that returns whatever it was last set to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<String>,
}

impl ManualClock {
    pub fn new(now: impl Into<String>) -> Self {
        Self {
            now: Mutex::new(now.into()),
        }
    }

    pub fn set(&self, now: impl Into<String>) {
        if let Ok(mut current) = self.now.lock() {
            *current = now.into();
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> String {
        self.now
            .lock()
            .map(|now| now.clone())
            .unwrap_or_default()
    }
}
