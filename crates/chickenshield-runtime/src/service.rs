//! Background analysis service.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info, warn};

use chickenshield_core::Envelope;
use chickenshield_protocols::{
    Analyzer, Badge, BadgeSink, ContentDescription, ExtensionMessage, MessageResponse, ResultStore,
    RiskReport,
};

/// Source of report timestamps.
pub type TimestampFn = Arc<dyn Fn() -> String + Send + Sync>;

/// Handles extension messages.
///
/// Every analysis takes a sequence number when it starts. A completion
/// older than the newest one already applied still reaches its requester
/// and history, but leaves the last-result slot and the badge alone.
pub struct BackgroundService {
    analyzer: Arc<dyn Analyzer>,
    store: Arc<dyn ResultStore>,
    badge: Arc<dyn BadgeSink>,
    timestamps: TimestampFn,
    next_sequence: AtomicU64,
    newest_applied: Mutex<u64>,
}

impl BackgroundService {
    pub fn new(analyzer: Arc<dyn Analyzer>, store: Arc<dyn ResultStore>, badge: Arc<dyn BadgeSink>) -> Self {
        Self {
            analyzer,
            store,
            badge,
            timestamps: Arc::new(RiskReport::now_timestamp),
            next_sequence: AtomicU64::new(0),
            newest_applied: Mutex::new(0),
        }
    }

    /// Replace the clock used for report timestamps.
    pub fn with_timestamps(mut self, timestamps: TimestampFn) -> Self {
        self.timestamps = timestamps;
        self
    }

    /// Drain `rx`, handling each message in its own task. Returns when
    /// every sender is gone.
    pub async fn run(self: Arc<Self>, mut rx: mpsc::UnboundedReceiver<Envelope>) {
        info!("Background service started (analyzer: {})", self.analyzer.id());

        while let Some(Envelope { message, reply }) = rx.recv().await {
            let service = Arc::clone(&self);
            tokio::spawn(async move {
                let response = service.handle(message).await;
                if let Some(reply) = reply {
                    if reply.send(response).is_err() {
                        debug!("Requester went away before the reply");
                    }
                }
            });
        }

        info!("Background service stopped");
    }

    /// Handle one message.
    pub async fn handle(&self, message: ExtensionMessage) -> MessageResponse {
        match message {
            ExtensionMessage::AnalyzeContent { data } => MessageResponse::analyzed(self.analyze_content(&data).await),
            ExtensionMessage::GetLastResult => MessageResponse::LastResult(self.last_result().await),
        }
    }

    /// Analyze a description, record the report and update the badge.
    ///
    /// Never fails: analysis errors become the fallback report and store
    /// errors are logged.
    pub async fn analyze_content(&self, description: &ContentDescription) -> RiskReport {
        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.badge.set_badge(&Badge::PENDING);
        debug!(sequence, kind = %description.kind, source = %description.source, "Analyzing");

        let report = match self.analyzer.analyze(description).await {
            Ok(assessment) => RiskReport::from_assessment(assessment, description, (self.timestamps)()),
            Err(e) => {
                warn!("Analysis failed for {}: {}", description.source, e);
                RiskReport::fallback(description, (self.timestamps)())
            }
        };

        info!(
            sequence,
            verdict = %report.verdict(),
            risk_score = report.risk_score(),
            source = %report.source,
            "Scan complete"
        );

        self.apply(sequence, &report).await;

        match self.store.append_history(report.clone()).await {
            Ok(true) => {}
            Ok(false) => debug!("History already holds a report at {}", report.timestamp),
            Err(e) => error!("Failed to append history: {}", e),
        }

        report
    }

    /// Update the last slot and badge unless a newer analysis got there first.
    async fn apply(&self, sequence: u64, report: &RiskReport) {
        let mut newest = self.newest_applied.lock().await;
        if sequence < *newest {
            warn!(sequence, newest = *newest, "Discarding stale completion for last result");
            return;
        }
        *newest = sequence;

        if let Err(e) = self.store.set_last(report.clone()).await {
            error!("Failed to store last result: {}", e);
        }
        self.badge.set_badge(&Badge::for_verdict(report.verdict()));
    }

    /// Stored last result, or `None` if nothing has been stored or the
    /// store cannot be read.
    pub async fn last_result(&self) -> Option<RiskReport> {
        match self.store.get_last().await {
            Ok(report) => report,
            Err(e) => {
                error!("Failed to read last result: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
