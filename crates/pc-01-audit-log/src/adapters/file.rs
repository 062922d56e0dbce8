use async_trait::async_trait;
use shared_types::StoreError;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::domain::AuditLogEntry;
use crate::ports::outbound::FallbackStore;

/// File-backed fallback queue, one JSON entry per line.
///
/// Survives a restart of the console, so entries queued while the sink was
/// down are still pushed on the next resync. Lines that cannot be parsed are
/// moved to a quarantine file next to the queue when the queue is rewritten.
pub struct JsonLinesFallbackStore {
    path: PathBuf,
    /// Serializes file access within the process.
    lock: Mutex<()>,
}

impl JsonLinesFallbackStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        if path.exists() {
            info!(path = %path.display(), "Using existing audit fallback file");
        }
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where unreadable queue lines are kept.
    pub fn quarantine_path(&self) -> PathBuf {
        self.path.with_extension("quarantine")
    }

    async fn read_all(&self) -> Result<Vec<AuditLogEntry>, StoreError> {
        Ok(self.read_lines().await?.0)
    }

    /// Parsed entries, plus the raw lines that did not parse.
    async fn read_lines(&self) -> Result<(Vec<AuditLogEntry>, Vec<String>), StoreError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok((Vec::new(), Vec::new()))
            }
            Err(err) => return Err(err.into()),
        };

        let mut entries = Vec::new();
        let mut unreadable = Vec::new();
        for (line_no, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<AuditLogEntry>(line) {
                Ok(entry) => entries.push(entry),
                Err(err) => {
                    warn!(line = line_no + 1, error = %err, "Unreadable audit line in fallback queue");
                    unreadable.push(line.to_string());
                }
            }
        }
        Ok((entries, unreadable))
    }

    /// Whether the file ends without a newline, e.g. after a crash mid-write.
    async fn ends_mid_line(&self) -> Result<bool, StoreError> {
        let mut file = match fs::File::open(&self.path).await {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(err) => return Err(err.into()),
        };
        if file.metadata().await?.len() == 0 {
            return Ok(false);
        }
        file.seek(SeekFrom::End(-1)).await?;
        Ok(file.read_u8().await? != b'\n')
    }

    async fn quarantine(&self, lines: &[String]) -> Result<(), StoreError> {
        let mut bytes = Vec::new();
        for line in lines {
            bytes.extend_from_slice(line.as_bytes());
            bytes.push(b'\n');
        }

        let path = self.quarantine_path();
        let mut file = OpenOptions::new().create(true).append(true).open(&path).await?;
        file.write_all(&bytes).await?;
        file.sync_data().await?;
        error!(
            count = lines.len(),
            path = %path.display(),
            "Moved unreadable audit lines to quarantine"
        );
        Ok(())
    }

    async fn write_all(&self, entries: &[AuditLogEntry]) -> Result<(), StoreError> {
        let mut bytes = Vec::new();
        for entry in entries {
            bytes.extend_from_slice(serde_json::to_string(entry)?.as_bytes());
            bytes.push(b'\n');
        }

        // Write atomically via temp file
        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(&bytes).await?;
        file.sync_all().await?;
        fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl FallbackStore for JsonLinesFallbackStore {
    async fn push(&self, entry: &AuditLogEntry) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut line = String::new();
        if self.ends_mid_line().await? {
            warn!(path = %self.path.display(), "Fallback queue ends mid-line, starting a new line");
            line.push('\n');
        }
        line.push_str(&serde_json::to_string(entry)?);
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.sync_data().await?;
        Ok(())
    }

    async fn pending(&self) -> Result<Vec<AuditLogEntry>, StoreError> {
        let _guard = self.lock.lock().await;
        self.read_all().await
    }

    async fn remove_front(&self, count: usize) -> Result<(), StoreError> {
        if count == 0 {
            return Ok(());
        }
        let _guard = self.lock.lock().await;
        let (entries, unreadable) = self.read_lines().await?;
        if !unreadable.is_empty() {
            self.quarantine(&unreadable).await?;
        }
        let rest = entries.get(count..).unwrap_or(&[]);
        self.write_all(rest).await
    }

    async fn len(&self) -> Result<usize, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewAuditEntry;
    use chrono::Utc;
    use shared_types::{Actor, AuditAction, AuditEntryId, AuditModule};

    fn entry(record: &str) -> AuditLogEntry {
        let mut entry =
            NewAuditEntry::new(&Actor::system(), AuditAction::Void, AuditModule::Donations, "x")
                .record(record)
                .stamp(AuditEntryId::new(), Utc::now());
        entry.synced = false;
        entry
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_queue() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLinesFallbackStore::new(dir.path().join("audit.jsonl"));
        assert_eq!(store.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("queue").join("audit.jsonl");

        {
            let store = JsonLinesFallbackStore::new(&path);
            store.push(&entry("a")).await.unwrap();
            store.push(&entry("b")).await.unwrap();
        }

        let reopened = JsonLinesFallbackStore::new(&path);
        let pending = reopened.pending().await.unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].record_id.as_deref(), Some("a"));
        assert!(!pending[0].synced);
    }

    #[tokio::test]
    async fn test_remove_front_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLinesFallbackStore::new(dir.path().join("audit.jsonl"));
        for record in ["a", "b", "c"] {
            store.push(&entry(record)).await.unwrap();
        }

        store.remove_front(2).await.unwrap();
        let pending = store.pending().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].record_id.as_deref(), Some("c"));

        store.remove_front(5).await.unwrap();
        assert_eq!(store.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_torn_line_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let store = JsonLinesFallbackStore::new(&path);
        store.push(&entry("a")).await.unwrap();

        let mut file = OpenOptions::new().append(true).open(&path).await.unwrap();
        file.write_all(b"{\"id\":").await.unwrap();

        assert_eq!(store.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_push_after_torn_line_starts_new_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        JsonLinesFallbackStore::new(&path).push(&entry("a")).await.unwrap();

        let mut file = OpenOptions::new().append(true).open(&path).await.unwrap();
        file.write_all(b"{\"id\":").await.unwrap();
        drop(file);

        let store = JsonLinesFallbackStore::new(&path);
        store.push(&entry("b")).await.unwrap();

        let pending = store.pending().await.unwrap();
        let records: Vec<_> = pending.iter().map(|e| e.record_id.as_deref()).collect();
        assert_eq!(records, vec![Some("a"), Some("b")]);
    }

    #[tokio::test]
    async fn test_rewrite_quarantines_unreadable_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let store = JsonLinesFallbackStore::new(&path);
        store.push(&entry("a")).await.unwrap();

        let mut file = OpenOptions::new().append(true).open(&path).await.unwrap();
        file.write_all(b"{\"id\":").await.unwrap();
        drop(file);
        store.push(&entry("b")).await.unwrap();

        store.remove_front(1).await.unwrap();

        let pending = store.pending().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].record_id.as_deref(), Some("b"));
        let kept = fs::read_to_string(store.quarantine_path()).await.unwrap();
        assert_eq!(kept, "{\"id\":\n");
    }
}
