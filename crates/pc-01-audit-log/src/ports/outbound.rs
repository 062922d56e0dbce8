//! Outbound Ports (Driven Ports)
//!
//! Storage the audit logger depends on.

use async_trait::async_trait;
use shared_types::StoreError;

use crate::domain::{AuditLogEntry, AuditSinkError};

/// The durable audit store (persistence collaborator).
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Persist one entry.
    async fn write(&self, entry: &AuditLogEntry) -> Result<(), AuditSinkError>;

    /// Entries for a record, oldest first.
    async fn entries_for_record(&self, record_id: &str) -> Result<Vec<AuditLogEntry>, AuditSinkError>;

    /// Latest entries, newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<AuditLogEntry>, AuditSinkError>;
}

/// Local FIFO queue for entries the sink could not accept.
#[async_trait]
pub trait FallbackStore: Send + Sync {
    /// Append to the back of the queue.
    async fn push(&self, entry: &AuditLogEntry) -> Result<(), StoreError>;

    /// All queued entries, oldest first.
    async fn pending(&self) -> Result<Vec<AuditLogEntry>, StoreError>;

    /// Drop the `count` oldest entries.
    async fn remove_front(&self, count: usize) -> Result<(), StoreError>;

    /// Number of queued entries.
    async fn len(&self) -> Result<usize, StoreError>;
}
