//! Store - flat key-value storage and the typed record adapter on top of it.
//!
//! The storage collaborator offers four primitives and nothing else:
//! point `read`, `write`, `delete`, and a `list` by key prefix and suffix.
//! There are no transactions and no secondary indexes.
//!
//! ## Example
//!
//! ```ignore
//! use analytics_store::store::{Codec, InMemoryKvStore, RecordStore};
//!
//! let records = RecordStore::new(InMemoryKvStore::new(), Codec::Json);
//! records.write("acme:p1:project", &project)?;
//! let loaded: Project = records.read("acme:p1:project")?;
//! ```

mod codec;
mod in_memory;
mod kv;
mod record;

use thiserror::Error;

/// Error type for store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No value exists at the key.
    #[error("key not found: {0}")]
    NotFound(String),
    /// The record bytes could not be encoded.
    #[error("record encode error: {0}")]
    Encode(String),
    /// The record bytes could not be decoded.
    #[error("record decode error: {0}")]
    Decode(String),
    /// Storage-level failure (I/O, poisoned lock, unreachable backend).
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

pub use codec::Codec;
pub use in_memory::InMemoryKvStore;
pub use kv::KvStore;
pub use record::RecordStore;
