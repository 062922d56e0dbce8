//! Notification Dispatcher Service

use async_trait::async_trait;
use shared_bus::{ConsoleEvent, EventPublisher};
use shared_types::{NotificationId, SystemTimeSource, TimeSource, UserId};
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::{NewNotification, Notification, NotificationError};
use crate::ports::inbound::NotificationApi;
use crate::ports::outbound::NotificationRepository;

/// Stores per-user notifications and relays change events to open views.
pub struct NotificationDispatcher {
    repository: Arc<dyn NotificationRepository>,
    publisher: Arc<dyn EventPublisher>,
    time_source: Arc<dyn TimeSource>,
}

impl NotificationDispatcher {
    pub fn new(
        repository: Arc<dyn NotificationRepository>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            publisher,
            time_source: Arc::new(SystemTimeSource),
        }
    }

    #[must_use]
    pub fn with_time_source(mut self, time_source: Arc<dyn TimeSource>) -> Self {
        self.time_source = time_source;
        self
    }
}

#[async_trait]
impl NotificationApi for NotificationDispatcher {
    async fn notify(&self, draft: NewNotification) -> Result<Notification, NotificationError> {
        let notification = Notification {
            id: NotificationId::new(),
            user_id: draft.user_id,
            notification_type: draft.notification_type,
            title: draft.title,
            message: draft.message,
            read: false,
            timestamp: self.time_source.now(),
            request_id: draft.request_id,
        };

        self.repository.insert(&notification).await?;
        info!(
            notification_id = %notification.id,
            user_id = %notification.user_id,
            kind = ?notification.notification_type,
            "Notification created"
        );

        self.broadcast(ConsoleEvent::NotificationCreated {
            notification_id: notification.id,
            user_id: notification.user_id,
        })
        .await;

        Ok(notification)
    }

    async fn broadcast(&self, event: ConsoleEvent) -> usize {
        let topic = event.topic();
        let receivers = self.publisher.publish(event).await;
        debug!(topic = ?topic, receivers, "Broadcast sent");
        receivers
    }

    async fn mark_read(&self, id: NotificationId) -> Result<Notification, NotificationError> {
        let mut notification = self
            .repository
            .get(id)
            .await?
            .ok_or(NotificationError::NotFound(id))?;

        if !notification.read {
            notification.read = true;
            self.repository.update(&notification).await?;
        }
        Ok(notification)
    }

    async fn mark_all_read(&self, user_id: UserId) -> Result<usize, NotificationError> {
        let mut changed = 0;
        for mut notification in self.repository.find_by_user(user_id).await? {
            if notification.read {
                continue;
            }
            notification.read = true;
            self.repository.update(&notification).await?;
            changed += 1;
        }
        Ok(changed)
    }

    async fn unread_count(&self, user_id: UserId) -> Result<usize, NotificationError> {
        Ok(self
            .repository
            .find_by_user(user_id)
            .await?
            .iter()
            .filter(|n| !n.read)
            .count())
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Notification>, NotificationError> {
        let mut notifications = self.repository.find_by_user(user_id).await?;
        notifications.sort_by(Notification::display_order);
        Ok(notifications)
    }
}
