//! Dashboard error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use chickenshield_protocols::StoreError;

/// Dashboard error types.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Result store failure.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Listen address could not be parsed.
    #[error("Invalid listen address {addr}: {message}")]
    InvalidAddress { addr: String, message: String },

    /// Socket failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        error!("Dashboard request failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
