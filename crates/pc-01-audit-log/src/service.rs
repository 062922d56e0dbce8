//! Audit Logger Service
//!
//! Implements `AuditLogApi` on top of a durable sink and a local fallback
//! queue.
//!
//! ## Write path
//!
//! ```text
//! append ──→ AuditSink ──ok──→ synced
//!               │
//!            SyncFailure
//!               ↓
//!          FallbackStore ──ok──→ queued (synced = false)
//!               │
//!             error
//!               ↓
//!         overflow buffer (in process, logged at error level)
//! ```

use async_trait::async_trait;
use shared_types::{AuditEntryId, SystemTimeSource, TimeSource};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::domain::{AuditError, AuditLogEntry, NewAuditEntry, RetryReport};
use crate::ports::inbound::AuditLogApi;
use crate::ports::outbound::{AuditSink, FallbackStore};

/// Dependencies for the audit logger.
pub struct AuditDependencies {
    pub sink: Arc<dyn AuditSink>,
    pub fallback: Arc<dyn FallbackStore>,
    pub time_source: Arc<dyn TimeSource>,
}

impl AuditDependencies {
    pub fn new(sink: Arc<dyn AuditSink>, fallback: Arc<dyn FallbackStore>) -> Self {
        Self {
            sink,
            fallback,
            time_source: Arc::new(SystemTimeSource),
        }
    }

    #[must_use]
    pub fn with_time_source(mut self, time_source: Arc<dyn TimeSource>) -> Self {
        self.time_source = time_source;
        self
    }
}

/// Audit logger.
pub struct AuditLogger {
    sink: Arc<dyn AuditSink>,
    fallback: Arc<dyn FallbackStore>,
    time_source: Arc<dyn TimeSource>,
    /// Entries neither the sink nor the fallback store accepted.
    overflow: Mutex<VecDeque<AuditLogEntry>>,
    /// One resync pass at a time, so entries are not written twice.
    retry_lock: Mutex<()>,
}

impl AuditLogger {
    pub fn new(deps: AuditDependencies) -> Self {
        Self {
            sink: deps.sink,
            fallback: deps.fallback,
            time_source: deps.time_source,
            overflow: Mutex::new(VecDeque::new()),
            retry_lock: Mutex::new(()),
        }
    }

    async fn queue_locally(&self, entry: &AuditLogEntry) {
        match self.fallback.push(entry).await {
            Ok(()) => {
                warn!(
                    entry_id = %entry.id,
                    action = %entry.action,
                    "Audit sink unavailable, entry queued locally"
                );
            }
            Err(err) => {
                error!(
                    entry_id = %entry.id,
                    action = %entry.action,
                    error = %err,
                    "Audit fallback store failed, entry held in memory"
                );
                self.overflow.lock().await.push_back(entry.clone());
            }
        }
    }

    /// Push queued entries to the sink in order. Returns how many made it.
    async fn drain_into_sink(&self, entries: &[AuditLogEntry]) -> usize {
        let mut written = 0;
        for entry in entries {
            let mut synced = entry.clone();
            synced.synced = true;
            if let Err(err) = self.sink.write(&synced).await {
                debug!(entry_id = %entry.id, error = %err, "Audit resync stopped");
                break;
            }
            written += 1;
        }
        written
    }
}

#[async_trait]
impl AuditLogApi for AuditLogger {
    async fn append(&self, entry: NewAuditEntry) -> AuditLogEntry {
        let mut entry = entry.stamp(AuditEntryId::new(), self.time_source.now());

        match self.sink.write(&entry).await {
            Ok(()) => {
                debug!(
                    entry_id = %entry.id,
                    action = %entry.action,
                    module = %entry.module,
                    "Audit entry written"
                );
            }
            Err(err) => {
                debug!(error = %err, "Audit sink write failed");
                entry.synced = false;
                self.queue_locally(&entry).await;
            }
        }
        entry
    }

    async fn retry_unsynced(&self) -> RetryReport {
        let _guard = self.retry_lock.lock().await;
        let mut report = RetryReport::default();

        let fallback_drained = match self.fallback.pending().await {
            Ok(pending) => {
                let written = self.drain_into_sink(&pending).await;
                if written > 0 {
                    if let Err(err) = self.fallback.remove_front(written).await {
                        // The sink already has them; a later pass would duplicate.
                        error!(error = %err, written, "Could not trim audit fallback queue");
                    }
                }
                report.synced += written;
                report.remaining += pending.len() - written;
                written == pending.len()
            }
            Err(err) => {
                error!(error = %err, "Could not read audit fallback queue");
                false
            }
        };

        {
            let mut overflow = self.overflow.lock().await;
            if fallback_drained && !overflow.is_empty() {
                let held: Vec<AuditLogEntry> = overflow.iter().cloned().collect();
                let written = self.drain_into_sink(&held).await;
                overflow.drain(..written);
                report.synced += written;
            }
            report.remaining += overflow.len();
        }

        if report.synced > 0 {
            info!(
                synced = report.synced,
                remaining = report.remaining,
                "Audit entries resynced"
            );
        }
        report
    }

    async fn unsynced_count(&self) -> usize {
        let queued = match self.fallback.len().await {
            Ok(len) => len,
            Err(err) => {
                warn!(error = %err, "Could not read audit fallback queue length");
                0
            }
        };
        queued + self.overflow.lock().await.len()
    }

    async fn entries_for_record(&self, record_id: &str) -> Result<Vec<AuditLogEntry>, AuditError> {
        Ok(self.sink.entries_for_record(record_id).await?)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<AuditLogEntry>, AuditError> {
        Ok(self.sink.recent(limit).await?)
    }
}
