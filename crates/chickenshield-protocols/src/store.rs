//! Result store protocol.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::StoreError;
use crate::types::RiskReport;

/// Default number of reports kept in history.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Fixed names of the persisted entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    LastResult,
    History,
}

impl StoreKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::LastResult => "lastScanResult",
            StoreKey::History => "chicken_history",
        }
    }
}

/// Change notification published after every successful write.
#[derive(Debug, Clone)]
pub enum StoreChange {
    LastResult {
        old_value: Option<RiskReport>,
        new_value: RiskReport,
    },
    History {
        old_value: Vec<RiskReport>,
        new_value: Vec<RiskReport>,
    },
}

impl StoreChange {
    pub fn key(&self) -> StoreKey {
        match self {
            StoreChange::LastResult { .. } => StoreKey::LastResult,
            StoreChange::History { .. } => StoreKey::History,
        }
    }
}

/// Last-result slot plus bounded, de-duplicated history.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Overwrite the last-result slot.
    async fn set_last(&self, report: RiskReport) -> Result<(), StoreError>;

    /// Read the last-result slot.
    async fn get_last(&self) -> Result<Option<RiskReport>, StoreError>;

    /// Prepend to history. Returns `false` when a report with the same
    /// timestamp is already present.
    async fn append_history(&self, report: RiskReport) -> Result<bool, StoreError>;

    /// History, newest first.
    async fn history(&self) -> Result<Vec<RiskReport>, StoreError>;

    /// Subscribe to change notifications.
    fn subscribe(&self) -> broadcast::Receiver<StoreChange>;
}

/// Compute the history after appending `report`.
///
/// Returns `None` if a report with the same timestamp already exists.
/// Otherwise the report is prepended and the list cut to `limit` entries,
/// dropping the oldest.
pub fn push_history(history: &[RiskReport], report: RiskReport, limit: usize) -> Option<Vec<RiskReport>> {
    if history.iter().any(|r| r.timestamp == report.timestamp) {
        return None;
    }
    let mut next = Vec::with_capacity(limit.min(history.len() + 1));
    next.push(report);
    next.extend(history.iter().cloned());
    next.truncate(limit);
    Some(next)
}
