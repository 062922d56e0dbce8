//! Inbound Ports (Driving Ports)
//!
//! The API every other subsystem uses to record what it changed.

use async_trait::async_trait;

use crate::domain::{AuditError, AuditLogEntry, NewAuditEntry, RetryReport};

/// Audit log API.
#[async_trait]
pub trait AuditLogApi: Send + Sync {
    /// Record an entry.
    ///
    /// Infallible from the caller's point of view: when the durable sink is
    /// down the entry is returned with `synced = false` and kept locally.
    async fn append(&self, entry: NewAuditEntry) -> AuditLogEntry;

    /// Push locally queued entries to the sink, oldest first, stopping at the
    /// first failure.
    async fn retry_unsynced(&self) -> RetryReport;

    /// Number of entries not yet written to the sink.
    async fn unsynced_count(&self) -> usize;

    /// All synced entries for one record, oldest first.
    async fn entries_for_record(&self, record_id: &str) -> Result<Vec<AuditLogEntry>, AuditError>;

    /// The most recent synced entries, newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<AuditLogEntry>, AuditError>;
}
