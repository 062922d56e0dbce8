//! # Error Types
//!
//! Errors raised by the persistence collaborator, shared by every repository port.

use thiserror::Error;

/// Failure of the persistence collaborator.
///
/// These are fatal from the core's point of view: they propagate to the
/// caller unchanged and the operation commits nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend could not be reached.
    #[error("Persistence backend unavailable: {0}")]
    Unavailable(String),

    /// A record with this key already exists.
    #[error("Duplicate key: {0}")]
    Duplicate(String),

    /// The stored record could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Local I/O failure (file-backed adapters).
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
