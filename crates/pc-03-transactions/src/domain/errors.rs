//! Transaction store error types.

use shared_types::{Role, StoreError, TransactionId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// Input rejected before any write.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Transaction not found: {0}")]
    NotFound(TransactionId),

    #[error("Transaction {0} is already voided")]
    AlreadyVoided(TransactionId),

    #[error("Role {role} may not {action}")]
    PermissionDenied { role: Role, action: &'static str },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TransactionError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
