//! Append-only post history persisted as a JSON snapshot.

use herald_core::{HistoryEntry, PostHistory};
use herald_error::{StorageError, StorageErrorKind, StorageResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

/// Durable post history.
///
/// Every read-modify-write runs under an internal async mutex. Snapshots are
/// written to a sibling temp file and renamed into place.
#[derive(Debug)]
pub struct HistoryLedger {
    path: PathBuf,
    lock: Mutex<()>,
}

impl HistoryLedger {
    /// Create a ledger stored at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// History file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the history, creating and persisting an empty one if the file is
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns `HistoryLoad`/`HistoryParse` for unreadable or malformed files,
    /// and `HistoryWrite` if the fresh ledger cannot be written.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> StorageResult<PostHistory> {
        let _guard = self.lock.lock().await;
        match self.read_unlocked().await? {
            Some(history) => Ok(history),
            None => {
                let history = PostHistory::default();
                self.write_unlocked(&history).await?;
                info!("Created new post history");
                Ok(history)
            }
        }
    }

    /// Load the history without creating it.
    ///
    /// # Errors
    ///
    /// Returns `HistoryLoad`/`HistoryParse` for unreadable or malformed files.
    pub async fn read(&self) -> StorageResult<Option<PostHistory>> {
        let _guard = self.lock.lock().await;
        self.read_unlocked().await
    }

    /// Append an entry, checkpoint the rotation cursor and persist.
    ///
    /// # Returns
    ///
    /// The history as written.
    #[instrument(skip(self, entry), fields(idea_id = *entry.idea_id()))]
    pub async fn append(
        &self,
        entry: HistoryEntry,
        rotation_cursor: u64,
    ) -> StorageResult<PostHistory> {
        let _guard = self.lock.lock().await;
        let mut history = self.read_unlocked().await?.unwrap_or_default();
        history.append(entry, rotation_cursor);
        self.write_unlocked(&history).await?;
        debug!(posts = history.posts().len(), "History entry appended");
        Ok(history)
    }

    async fn read_unlocked(&self) -> StorageResult<Option<PostHistory>> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::HistoryLoad(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                ))));
            }
        };

        serde_json::from_str(&json).map(Some).map_err(|e| {
            StorageError::new(StorageErrorKind::HistoryParse(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })
    }

    async fn write_unlocked(&self, history: &PostHistory) -> StorageResult<()> {
        let write_error = |e: std::io::Error| {
            StorageError::new(StorageErrorKind::HistoryWrite(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
            }
        }

        let json = serde_json::to_string_pretty(history).map_err(|e| {
            StorageError::new(StorageErrorKind::HistoryWrite(e.to_string()))
        })?;

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, json).await.map_err(write_error)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(write_error)?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "post-history.json".to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }
}
