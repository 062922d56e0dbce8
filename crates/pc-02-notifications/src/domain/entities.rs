//! Notification entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{CorrectionRequestId, NotificationId, UserId};
use std::cmp::Ordering;

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    CorrectionApproved,
    CorrectionRejected,
    Other,
}

/// A message shown to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub timestamp: DateTime<Utc>,
    /// Correction request the notification refers to, if any.
    pub request_id: Option<CorrectionRequestId>,
}

impl Notification {
    /// Display order for a user's list: unread first, then newest first.
    pub fn display_order(a: &Notification, b: &Notification) -> Ordering {
        a.read
            .cmp(&b.read)
            .then_with(|| b.timestamp.cmp(&a.timestamp))
    }
}

/// Input to `notify`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub user_id: UserId,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub request_id: Option<CorrectionRequestId>,
}

impl NewNotification {
    pub fn new(
        user_id: UserId,
        notification_type: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            notification_type,
            title: title.into(),
            message: message.into(),
            request_id: None,
        }
    }

    #[must_use]
    pub fn about(mut self, request_id: CorrectionRequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }
}
