//! Analyzer protocol.

use async_trait::async_trait;

use crate::error::AnalysisError;
use crate::types::{ContentDescription, ModelAssessment};

/// Produces a risk assessment for a content description.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Analyzer identifier used in logs.
    fn id(&self) -> &str;

    /// Run one analysis. A single attempt; no retries.
    async fn analyze(&self, description: &ContentDescription) -> Result<ModelAssessment, AnalysisError>;
}
