//! In-memory result store.

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};

use chickenshield_protocols::{
    push_history, ResultStore, RiskReport, StoreChange, StoreError, DEFAULT_HISTORY_LIMIT,
};

use crate::CHANGE_CHANNEL_CAPACITY;

#[derive(Default)]
struct Slots {
    last: Option<RiskReport>,
    history: Vec<RiskReport>,
}

/// Non-persistent store for tests and one-shot scans.
pub struct MemoryResultStore {
    slots: RwLock<Slots>,
    history_limit: usize,
    changes: broadcast::Sender<StoreChange>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(history_limit: usize) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            slots: RwLock::new(Slots::default()),
            history_limit,
            changes,
        }
    }
}

impl Default for MemoryResultStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResultStore for MemoryResultStore {
    async fn set_last(&self, report: RiskReport) -> Result<(), StoreError> {
        let mut slots = self.slots.write().await;
        let old_value = slots.last.replace(report.clone());
        let _ = self.changes.send(StoreChange::LastResult {
            old_value,
            new_value: report,
        });
        Ok(())
    }

    async fn get_last(&self) -> Result<Option<RiskReport>, StoreError> {
        Ok(self.slots.read().await.last.clone())
    }

    async fn append_history(&self, report: RiskReport) -> Result<bool, StoreError> {
        let mut slots = self.slots.write().await;
        let Some(next) = push_history(&slots.history, report, self.history_limit) else {
            return Ok(false);
        };
        let old_value = std::mem::replace(&mut slots.history, next.clone());
        let _ = self.changes.send(StoreChange::History {
            old_value,
            new_value: next,
        });
        Ok(true)
    }

    async fn history(&self) -> Result<Vec<RiskReport>, StoreError> {
        Ok(self.slots.read().await.history.clone())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}
