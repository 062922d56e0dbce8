use async_trait::async_trait;
use shared_types::StoreError;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, RwLock};

use crate::domain::{AuditLogEntry, AuditSinkError};
use crate::ports::outbound::{AuditSink, FallbackStore};

/// In-memory audit sink.
///
/// Can be switched offline to exercise the fallback path.
pub struct InMemoryAuditSink {
    entries: RwLock<Vec<AuditLogEntry>>,
    online: AtomicBool,
}

impl InMemoryAuditSink {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            online: AtomicBool::new(true),
        }
    }

    /// Simulate the backend going down or coming back.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// Snapshot of everything written so far, in write order.
    pub async fn entries(&self) -> Vec<AuditLogEntry> {
        self.entries.read().await.clone()
    }

    fn check_online(&self) -> Result<(), AuditSinkError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AuditSinkError::SyncFailure("sink offline".to_string()))
        }
    }
}

impl Default for InMemoryAuditSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditSink for InMemoryAuditSink {
    async fn write(&self, entry: &AuditLogEntry) -> Result<(), AuditSinkError> {
        self.check_online()?;
        self.entries.write().await.push(entry.clone());
        Ok(())
    }

    async fn entries_for_record(&self, record_id: &str) -> Result<Vec<AuditLogEntry>, AuditSinkError> {
        self.check_online()?;
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|e| e.record_id.as_deref() == Some(record_id))
            .cloned()
            .collect())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<AuditLogEntry>, AuditSinkError> {
        self.check_online()?;
        let entries = self.entries.read().await;
        Ok(entries.iter().rev().take(limit).cloned().collect())
    }
}

/// In-memory fallback queue.
#[derive(Default)]
pub struct InMemoryFallbackStore {
    queue: Mutex<VecDeque<AuditLogEntry>>,
    failing: AtomicBool,
}

impl InMemoryFallbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write fail, as a full disk would.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl FallbackStore for InMemoryFallbackStore {
    async fn push(&self, entry: &AuditLogEntry) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Io("fallback store unavailable".to_string()));
        }
        self.queue.lock().await.push_back(entry.clone());
        Ok(())
    }

    async fn pending(&self) -> Result<Vec<AuditLogEntry>, StoreError> {
        Ok(self.queue.lock().await.iter().cloned().collect())
    }

    async fn remove_front(&self, count: usize) -> Result<(), StoreError> {
        let mut queue = self.queue.lock().await;
        let count = count.min(queue.len());
        queue.drain(..count);
        Ok(())
    }

    async fn len(&self) -> Result<usize, StoreError> {
        Ok(self.queue.lock().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewAuditEntry;
    use chrono::Utc;
    use shared_types::{Actor, AuditAction, AuditEntryId, AuditModule};

    fn entry(record: &str) -> AuditLogEntry {
        NewAuditEntry::new(&Actor::system(), AuditAction::Create, AuditModule::Donations, "x")
            .record(record)
            .stamp(AuditEntryId::new(), Utc::now())
    }

    #[tokio::test]
    async fn test_sink_offline_rejects_writes() {
        let sink = InMemoryAuditSink::new();
        sink.set_online(false);
        assert!(matches!(
            sink.write(&entry("a")).await,
            Err(AuditSinkError::SyncFailure(_))
        ));
        sink.set_online(true);
        sink.write(&entry("a")).await.unwrap();
        assert_eq!(sink.entries().await.len(), 1);
    }

    #[tokio::test]
    async fn test_sink_recent_is_newest_first() {
        let sink = InMemoryAuditSink::new();
        for record in ["a", "b", "c"] {
            sink.write(&entry(record)).await.unwrap();
        }
        let recent = sink.recent(2).await.unwrap();
        assert_eq!(recent[0].record_id.as_deref(), Some("c"));
        assert_eq!(recent[1].record_id.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn test_fallback_is_fifo() {
        let store = InMemoryFallbackStore::new();
        for record in ["a", "b", "c"] {
            store.push(&entry(record)).await.unwrap();
        }
        store.remove_front(2).await.unwrap();
        let pending = store.pending().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].record_id.as_deref(), Some("c"));
    }
}
