//! File-backed result store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, warn};

use chickenshield_protocols::{
    push_history, ResultStore, RiskReport, StoreChange, StoreError, StoreKey, DEFAULT_HISTORY_LIMIT,
};

use crate::CHANGE_CHANNEL_CAPACITY;

/// Result store persisted as one JSON file per key:
///
/// ```text
/// {data_dir}/
/// ├── lastScanResult.json
/// └── chicken_history.json
/// ```
///
/// Reads always go to disk so that several processes sharing a data
/// directory (watcher, dashboard) see each other's writes. Writes within
/// one process are serialized.
pub struct FileResultStore {
    data_dir: PathBuf,
    history_limit: usize,
    write_lock: Mutex<()>,
    changes: broadcast::Sender<StoreChange>,
}

impl FileResultStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed.
    pub async fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Self::open_with_limit(data_dir, DEFAULT_HISTORY_LIMIT).await
    }

    pub async fn open_with_limit(data_dir: impl Into<PathBuf>, history_limit: usize) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).await?;
        debug!("FileResultStore initialized at {:?}", data_dir);

        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Ok(Self {
            data_dir,
            history_limit,
            write_lock: Mutex::new(()),
            changes,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, key: StoreKey) -> PathBuf {
        self.data_dir.join(format!("{}.json", key.as_str()))
    }

    async fn read_entry<T: DeserializeOwned>(&self, key: StoreKey) -> Result<Option<T>, StoreError> {
        let path = self.path_for(key);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StoreError::Corrupt {
                key: key.as_str().to_string(),
                message: e.to_string(),
            })
    }

    /// Read the previous value before overwriting it. A corrupt entry is
    /// treated as absent so that a fresh write can repair it.
    async fn read_for_update<T: DeserializeOwned>(&self, key: StoreKey) -> Result<Option<T>, StoreError> {
        match self.read_entry(key).await {
            Err(StoreError::Corrupt { key, message }) => {
                warn!("Discarding corrupt store entry {}: {}", key, message);
                Ok(None)
            }
            other => other,
        }
    }

    async fn write_entry<T: Serialize>(&self, key: StoreKey, value: &T) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(value)?;
        fs::write(&tmp, content).await?;
        fs::rename(&tmp, &path).await?;
        debug!("Wrote store entry {} to {:?}", key.as_str(), path);
        Ok(())
    }
}

#[async_trait]
impl ResultStore for FileResultStore {
    async fn set_last(&self, report: RiskReport) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let old_value = self.read_for_update(StoreKey::LastResult).await?;
        self.write_entry(StoreKey::LastResult, &report).await?;
        let _ = self.changes.send(StoreChange::LastResult {
            old_value,
            new_value: report,
        });
        Ok(())
    }

    async fn get_last(&self) -> Result<Option<RiskReport>, StoreError> {
        self.read_entry(StoreKey::LastResult).await
    }

    async fn append_history(&self, report: RiskReport) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let old_value: Vec<RiskReport> = self
            .read_for_update(StoreKey::History)
            .await?
            .unwrap_or_default();

        let Some(new_value) = push_history(&old_value, report, self.history_limit) else {
            debug!("Skipping history entry with duplicate timestamp");
            return Ok(false);
        };

        self.write_entry(StoreKey::History, &new_value).await?;
        let _ = self.changes.send(StoreChange::History { old_value, new_value });
        Ok(true)
    }

    async fn history(&self) -> Result<Vec<RiskReport>, StoreError> {
        Ok(self.read_entry(StoreKey::History).await?.unwrap_or_default())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
