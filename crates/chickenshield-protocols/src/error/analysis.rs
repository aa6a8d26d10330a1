//! Analysis errors.

use thiserror::Error;

/// Why an analysis request produced no assessment.
///
/// Callers collapse every variant into the same fallback report; the
/// variants exist for logging.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Empty response: {0}")]
    EmptyResponse(String),

    #[error("Malformed model reply: {0}")]
    MalformedReply(String),

    #[error("Missing API key")]
    MissingApiKey,
}

impl From<serde_json::Error> for AnalysisError {
    fn from(e: serde_json::Error) -> Self {
        AnalysisError::MalformedReply(e.to_string())
    }
}
