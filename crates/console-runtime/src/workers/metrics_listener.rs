//! # Metrics Listener
//!
//! Subscribes to every bus event and updates the Prometheus counters, so the
//! subsystem crates never depend on the metrics registry.

use parish_telemetry::{
    metric_inc, AUDIT_FALLBACKS, BUS_EVENTS, CORRECTIONS_REVIEWED, NOTIFICATIONS_SENT,
    PAYMENT_STATUS_CHANGES, TRANSACTIONS_RECORDED, TRANSACTIONS_VOIDED,
};
use shared_bus::{ConsoleEvent, EventTopic, SeenEventCache, Subscription};
use tokio::sync::watch;
use tracing::debug;

pub struct MetricsListener {
    subscription: Subscription,
    seen: SeenEventCache,
}

impl MetricsListener {
    pub fn new(subscription: Subscription) -> Self {
        Self {
            subscription,
            seen: SeenEventCache::new(),
        }
    }

    /// Update counters for one event.
    pub fn record(event: &ConsoleEvent) {
        metric_inc!(BUS_EVENTS, &[topic_label(event.topic())]);

        match event {
            ConsoleEvent::TransactionRecorded {
                service_request_id, ..
            } => {
                let link = if service_request_id.is_some() { "service_request" } else { "none" };
                metric_inc!(TRANSACTIONS_RECORDED, &[link]);
            }
            ConsoleEvent::TransactionVoided { .. } => metric_inc!(TRANSACTIONS_VOIDED),
            ConsoleEvent::PaymentUpdated { paid, .. } => {
                metric_inc!(PAYMENT_STATUS_CHANGES, &[if *paid { "paid" } else { "unpaid" }]);
            }
            ConsoleEvent::CorrectionReviewed { approved, .. } => {
                metric_inc!(CORRECTIONS_REVIEWED, &[if *approved { "approved" } else { "rejected" }]);
            }
            ConsoleEvent::NotificationCreated { .. } => metric_inc!(NOTIFICATIONS_SENT),
            ConsoleEvent::AuditSyncDegraded { .. } => metric_inc!(AUDIT_FALLBACKS),
            ConsoleEvent::CorrectionSubmitted { .. } | ConsoleEvent::CorrectionCompleted { .. } => {}
        }
    }

    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        loop {
            tokio::select! {
                received = self.subscription.recv() => match received {
                    Some(envelope) => {
                        if self.seen.first_sighting(envelope.event_id) {
                            Self::record(&envelope.event);
                        }
                    }
                    None => {
                        debug!("Event bus closed, metrics listener stopping");
                        return;
                    }
                },
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        debug!("Metrics listener stopping");
                        return;
                    }
                }
            }
        }
    }
}

fn topic_label(topic: EventTopic) -> &'static str {
    match topic {
        EventTopic::Transactions => "transactions",
        EventTopic::Payments => "payments",
        EventTopic::Corrections => "corrections",
        EventTopic::Notifications => "notifications",
        EventTopic::Audit => "audit",
        EventTopic::All => "all",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{ServiceRequestId, TransactionId};

    #[test]
    fn test_record_counts_by_label() {
        let before = PAYMENT_STATUS_CHANGES.with_label_values(&["unpaid"]).get();
        MetricsListener::record(&ConsoleEvent::PaymentUpdated {
            service_request_id: ServiceRequestId(42),
            paid: false,
        });
        assert!(PAYMENT_STATUS_CHANGES.with_label_values(&["unpaid"]).get() >= before + 1.0);

        let voided_before = TRANSACTIONS_VOIDED.get();
        MetricsListener::record(&ConsoleEvent::TransactionVoided {
            transaction_id: TransactionId::new(),
            service_request_id: None,
        });
        assert!(TRANSACTIONS_VOIDED.get() >= voided_before + 1.0);
    }
}
