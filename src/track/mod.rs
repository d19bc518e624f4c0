//! Fire-and-forget counter tracking.
//!
//! Tracking must never fail a caller-visible request, so the increment is
//! decoupled from the call: the caller's request is validated and queued,
//! and a [`TrackWorker`] applies it later under the counter's lock.

mod worker;

pub use worker::{TrackStats, TrackWorker};
