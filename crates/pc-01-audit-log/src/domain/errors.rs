//! Audit log error types.

use shared_types::StoreError;
use thiserror::Error;

/// Failure reported by the durable audit sink.
///
/// Recovered locally by the logger: the entry is queued, never lost.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditSinkError {
    #[error("Audit sink sync failure: {0}")]
    SyncFailure(String),
}

/// Errors surfaced by audit queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditError {
    #[error(transparent)]
    Sink(#[from] AuditSinkError),

    #[error("Fallback store error: {0}")]
    Store(#[from] StoreError),
}
