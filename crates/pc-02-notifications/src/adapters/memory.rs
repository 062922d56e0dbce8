use async_trait::async_trait;
use shared_types::{NotificationId, StoreError, UserId};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::Notification;
use crate::ports::outbound::NotificationRepository;

/// In-memory notification store.
#[derive(Default)]
pub struct InMemoryNotificationRepository {
    data: RwLock<HashMap<NotificationId, Notification>>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn insert(&self, notification: &Notification) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        if data.contains_key(&notification.id) {
            return Err(StoreError::Duplicate(notification.id.to_string()));
        }
        data.insert(notification.id, notification.clone());
        Ok(())
    }

    async fn get(&self, id: NotificationId) -> Result<Option<Notification>, StoreError> {
        Ok(self.data.read().await.get(&id).cloned())
    }

    async fn update(&self, notification: &Notification) -> Result<(), StoreError> {
        self.data
            .write()
            .await
            .insert(notification.id, notification.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Notification>, StoreError> {
        Ok(self
            .data
            .read()
            .await
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect())
    }
}
