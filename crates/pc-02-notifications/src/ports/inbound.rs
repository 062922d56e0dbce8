//! Inbound Ports (Driving Ports)

use async_trait::async_trait;
use shared_bus::ConsoleEvent;
use shared_types::{NotificationId, UserId};

use crate::domain::{NewNotification, Notification, NotificationError};

/// Notification dispatcher API.
///
/// Every subsystem that changes state tells open views about it through
/// `broadcast`; nothing else touches the bus directly.
#[async_trait]
pub trait NotificationApi: Send + Sync {
    /// Store a notification for one user and announce it.
    async fn notify(&self, notification: NewNotification) -> Result<Notification, NotificationError>;

    /// Best-effort signal to every open view. Returns the receiver count.
    async fn broadcast(&self, event: ConsoleEvent) -> usize;

    async fn mark_read(&self, id: NotificationId) -> Result<Notification, NotificationError>;

    /// Mark every notification of `user_id` read. Returns how many changed.
    async fn mark_all_read(&self, user_id: UserId) -> Result<usize, NotificationError>;

    async fn unread_count(&self, user_id: UserId) -> Result<usize, NotificationError>;

    /// Unread first, then most recent first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Notification>, NotificationError>;
}
