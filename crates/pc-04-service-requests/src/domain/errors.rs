//! Service request error types.

use shared_types::{Role, ServiceRequestId, StoreError, TransactionId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceRequestError {
    /// Input rejected before any write.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Service request not found: {0}")]
    NotFound(ServiceRequestId),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    #[error("Service request {0} is already paid")]
    AlreadyPaid(ServiceRequestId),

    #[error("Service request {0} is not paid")]
    NotPaid(ServiceRequestId),

    #[error("Role {role} may not {action}")]
    PermissionDenied { role: Role, action: &'static str },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceRequestError {
    /// Whether this is one of the not-found kinds.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::TransactionNotFound(_))
    }
}
