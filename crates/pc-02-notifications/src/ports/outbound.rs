//! Outbound Ports (Driven Ports)

use async_trait::async_trait;
use shared_types::{NotificationId, StoreError, UserId};

use crate::domain::Notification;

/// Notification persistence.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn insert(&self, notification: &Notification) -> Result<(), StoreError>;

    async fn get(&self, id: NotificationId) -> Result<Option<Notification>, StoreError>;

    /// Replace an existing notification.
    async fn update(&self, notification: &Notification) -> Result<(), StoreError>;

    /// All notifications for a user, any order.
    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Notification>, StoreError>;
}
