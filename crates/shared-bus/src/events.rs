//! # Console Events
//!
//! Defines all event types that flow through the shared bus. Each mutating
//! operation in the core emits exactly one of these after its write succeeds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{CorrectionRequestId, NotificationId, ServiceRequestId, TransactionId, UserId};
use uuid::Uuid;

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConsoleEvent {
    // =========================================================================
    // TRANSACTIONS
    // =========================================================================
    /// A donation or payment was recorded.
    TransactionRecorded {
        transaction_id: TransactionId,
        /// Service request the payment is linked to, if any.
        service_request_id: Option<ServiceRequestId>,
    },

    /// A transaction was voided. History is kept; totals change.
    TransactionVoided {
        transaction_id: TransactionId,
        service_request_id: Option<ServiceRequestId>,
    },

    // =========================================================================
    // SERVICE REQUESTS
    // =========================================================================
    /// A service request's payment status changed (paid or reverted).
    PaymentUpdated {
        service_request_id: ServiceRequestId,
        paid: bool,
    },

    // =========================================================================
    // CORRECTION REQUESTS
    // =========================================================================
    /// A member submitted a profile correction request.
    CorrectionSubmitted {
        request_id: CorrectionRequestId,
        user_id: UserId,
    },

    /// An admin approved or rejected a correction request.
    CorrectionReviewed {
        request_id: CorrectionRequestId,
        user_id: UserId,
        approved: bool,
    },

    /// The member saved their edits; the approved fields lock again.
    CorrectionCompleted {
        request_id: CorrectionRequestId,
        user_id: UserId,
    },

    // =========================================================================
    // NOTIFICATIONS & AUDIT
    // =========================================================================
    /// A notification was created for a user.
    NotificationCreated {
        notification_id: NotificationId,
        user_id: UserId,
    },

    /// Audit entries are waiting in the local fallback queue.
    AuditSyncDegraded {
        /// Number of entries not yet written to the durable sink.
        unsynced: usize,
    },
}

impl ConsoleEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::TransactionRecorded { .. } | Self::TransactionVoided { .. } => {
                EventTopic::Transactions
            }
            Self::PaymentUpdated { .. } => EventTopic::Payments,
            Self::CorrectionSubmitted { .. }
            | Self::CorrectionReviewed { .. }
            | Self::CorrectionCompleted { .. } => EventTopic::Corrections,
            Self::NotificationCreated { .. } => EventTopic::Notifications,
            Self::AuditSyncDegraded { .. } => EventTopic::Audit,
        }
    }

    /// Service request this event concerns, if any.
    #[must_use]
    pub fn service_request_id(&self) -> Option<ServiceRequestId> {
        match self {
            Self::TransactionRecorded {
                service_request_id, ..
            }
            | Self::TransactionVoided {
                service_request_id, ..
            } => *service_request_id,
            Self::PaymentUpdated {
                service_request_id, ..
            } => Some(*service_request_id),
            _ => None,
        }
    }

    /// User this event concerns, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::CorrectionSubmitted { user_id, .. }
            | Self::CorrectionReviewed { user_id, .. }
            | Self::CorrectionCompleted { user_id, .. }
            | Self::NotificationCreated { user_id, .. } => Some(*user_id),
            _ => None,
        }
    }
}

/// An event as it travels on the bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique id, used by consumers to drop duplicate deliveries.
    pub event_id: Uuid,
    /// When the event was published.
    pub emitted_at: DateTime<Utc>,
    pub event: ConsoleEvent,
}

impl EventEnvelope {
    #[must_use]
    pub fn new(event: ConsoleEvent) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            emitted_at: Utc::now(),
            event,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Donations and payment records.
    Transactions,
    /// Service request payment status.
    Payments,
    /// Correction request lifecycle.
    Corrections,
    /// Per-user notifications.
    Notifications,
    /// Audit log health.
    Audit,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Only events about this service request (views of a single request).
    pub service_request_id: Option<ServiceRequestId>,
    /// Only events about this user (member-facing views).
    pub user_id: Option<UserId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            ..Self::default()
        }
    }

    /// Filter for a view showing a single service request.
    #[must_use]
    pub fn service_request(id: ServiceRequestId) -> Self {
        Self {
            topics: vec![EventTopic::Transactions, EventTopic::Payments],
            service_request_id: Some(id),
            user_id: None,
        }
    }

    /// Filter for a member's own views (notifications, corrections).
    #[must_use]
    pub fn user(id: UserId) -> Self {
        Self {
            topics: vec![EventTopic::Corrections, EventTopic::Notifications],
            service_request_id: None,
            user_id: Some(id),
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &ConsoleEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let request_match = match self.service_request_id {
            Some(id) => event.service_request_id() == Some(id),
            None => true,
        };

        let user_match = match self.user_id {
            Some(id) => event.user_id() == Some(id),
            None => true,
        };

        topic_match && request_match && user_match
    }
}
