//! # Audit Resync Worker
//!
//! Periodically drains the audit fallback queue back into the durable sink.
//! While entries remain queued it broadcasts `AuditSyncDegraded` so the admin
//! views can show the gap.

use parish_telemetry::log_event;
use pc_01_audit_log::{AuditLogApi, RetryReport};
use pc_02_notifications::NotificationApi;
use shared_bus::ConsoleEvent;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

pub struct AuditResyncWorker {
    audit: Arc<dyn AuditLogApi>,
    notifier: Arc<dyn NotificationApi>,
    period: Duration,
}

impl AuditResyncWorker {
    pub fn new(audit: Arc<dyn AuditLogApi>, notifier: Arc<dyn NotificationApi>, period: Duration) -> Self {
        Self {
            audit,
            notifier,
            period,
        }
    }

    /// One retry pass.
    pub async fn resync_once(&self) -> RetryReport {
        if self.audit.unsynced_count().await == 0 {
            parish_telemetry::AUDIT_UNSYNCED.set(0.0);
            return RetryReport::default();
        }

        let report = self.audit.retry_unsynced().await;
        parish_telemetry::AUDIT_UNSYNCED.set(report.remaining as f64);

        if report.synced > 0 {
            info!(synced = report.synced, remaining = report.remaining, "Audit entries resynced");
        }
        if report.remaining > 0 {
            log_event!(warn, "audit", "Audit sink still unreachable", remaining = report.remaining);
            self.notifier
                .broadcast(ConsoleEvent::AuditSyncDegraded {
                    unsynced: report.remaining,
                })
                .await;
        }
        report
    }

    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.resync_once().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        debug!("Audit resync worker stopping");
                        return;
                    }
                }
            }
        }
    }
}
