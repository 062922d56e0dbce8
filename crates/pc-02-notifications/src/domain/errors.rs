//! Notification error types.

use shared_types::{NotificationId, StoreError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    #[error("Notification not found: {0}")]
    NotFound(NotificationId),

    #[error(transparent)]
    Store(#[from] StoreError),
}
