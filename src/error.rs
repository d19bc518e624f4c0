//! Error kinds surfaced by repository and service operations.

use thiserror::Error;

use crate::store::StoreError;

/// Error returned by every repository and service operation.
///
/// The four kinds mirror what a caller can act on: fix the request, accept
/// that the entity is gone, remove dependents first, or retry later.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A required field was missing or empty. Raised before any store access.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The referenced entity (or its parent) does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// The operation is blocked by existing dependents.
    #[error("failed precondition: {0}")]
    FailedPrecondition(String),
    /// Store I/O failure or a record that could not be decoded.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidArgument(_) => 400,
            Error::NotFound(_) => 404,
            Error::FailedPrecondition(_) => 412,
            Error::Internal(_) => 500,
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub(crate) fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::Internal(err.to_string())
    }
}
