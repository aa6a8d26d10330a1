//! Dashboard routes.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use chickenshield_protocols::RiskReport;

use crate::error::DashboardError;
use crate::state::AppState;
use crate::view::{DashboardPage, ViewMode};

/// Query parameters accepted by the dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// JSON-encoded report that seeds the view.
    pub data: Option<String>,
    /// `simple` or `technical`.
    pub mode: Option<String>,
    /// Timestamp of a history entry to show.
    pub at: Option<String>,
}

/// Create the dashboard router.
///
/// Routes:
/// - GET /             - report view (`?data=`, `?mode=`, `?at=`)
/// - GET /api/report   - report the view would show, or null
/// - GET /api/history  - stored history, newest first
/// - GET /health       - liveness
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/api/report", get(current_report))
        .route("/api/history", get(history))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, DashboardError> {
    let seeded = match query.data.as_deref() {
        Some(raw) => state.seed(raw).await?,
        None => None,
    };
    let history = state.history().await?;
    let report = match seeded {
        Some(report) => Some(report),
        None => state.current(query.at.as_deref(), &history).await?,
    };

    let page = DashboardPage {
        report: report.as_ref(),
        history: &history,
        mode: ViewMode::from_query(query.mode.as_deref()),
    };
    Ok(Html(page.render()))
}

async fn current_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<Option<RiskReport>>, DashboardError> {
    let history = state.history().await?;
    Ok(Json(state.current(query.at.as_deref(), &history).await?))
}

async fn history(State(state): State<Arc<AppState>>) -> Result<Json<Vec<RiskReport>>, DashboardError> {
    Ok(Json(state.history().await?))
}

async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
