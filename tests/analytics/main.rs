//! Analytics integration tests.
//!
//! Drives the service facade end to end over an in-memory store:
//! - Project and action lifecycles, including dependent-blocked deletes
//! - Action triggers and resets
//! - Counter tracking through the background worker, under contention
//! - Tenant isolation
//! - Store failures surfacing as `Internal` (and being swallowed by track)

mod actions;
mod counters;
