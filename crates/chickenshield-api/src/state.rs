//! Application state.

use std::sync::Arc;

use tracing::{debug, info, warn};

use chickenshield_protocols::{ResultStore, RiskReport, StoreError};

/// State shared across dashboard handlers.
pub struct AppState {
    pub store: Arc<dyn ResultStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ResultStore>) -> Self {
        Self { store }
    }

    /// Decode a report passed in the query string and add it to history.
    ///
    /// Undecodable input is logged and yields `None`.
    pub async fn seed(&self, raw: &str) -> Result<Option<RiskReport>, StoreError> {
        let report = match serde_json::from_str::<RiskReport>(raw) {
            Ok(report) => report,
            Err(e) => {
                warn!("Ignoring invalid report data: {}", e);
                return Ok(None);
            }
        };

        if self.store.append_history(report.clone()).await? {
            info!("Seeded dashboard with report from {}", report.timestamp);
        } else {
            debug!("Report {} already in history", report.timestamp);
        }
        Ok(Some(report))
    }

    /// History, newest first. A corrupt entry reads as empty.
    pub async fn history(&self) -> Result<Vec<RiskReport>, StoreError> {
        tolerate_corrupt(self.store.history().await)
    }

    /// The report to show when nothing was seeded: the history entry with
    /// timestamp `at` if given and present, otherwise the last result.
    pub async fn current(&self, at: Option<&str>, history: &[RiskReport]) -> Result<Option<RiskReport>, StoreError> {
        if let Some(at) = at {
            if let Some(found) = history.iter().find(|r| r.timestamp == at) {
                return Ok(Some(found.clone()));
            }
            debug!("No history entry at {}", at);
        }
        tolerate_corrupt(self.store.get_last().await)
    }
}

fn tolerate_corrupt<T: Default>(result: Result<T, StoreError>) -> Result<T, StoreError> {
    match result {
        Err(StoreError::Corrupt { key, message }) => {
            warn!("Treating corrupt {} as empty: {}", key, message);
            Ok(T::default())
        }
        other => other,
    }
}
