//! Dashboard server.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use chickenshield_config::DashboardConfig;
use chickenshield_protocols::ResultStore;

use crate::error::DashboardError;
use crate::routes::create_router;
use crate::state::AppState;

/// The dashboard HTTP server.
pub struct DashboardServer {
    config: DashboardConfig,
    state: Arc<AppState>,
}

impl DashboardServer {
    pub fn new(config: DashboardConfig, store: Arc<dyn ResultStore>) -> Self {
        Self {
            config,
            state: Arc::new(AppState::new(store)),
        }
    }

    /// Get the server address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Serve until `shutdown` resolves.
    pub async fn run(&self, shutdown: impl Future<Output = ()> + Send + 'static) -> Result<(), DashboardError> {
        let addr: SocketAddr = self.addr().parse().map_err(|e: std::net::AddrParseError| {
            DashboardError::InvalidAddress {
                addr: self.addr(),
                message: e.to_string(),
            }
        })?;
        let listener = TcpListener::bind(addr).await?;

        info!("Dashboard listening on http://{}", addr);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Dashboard stopped");
        Ok(())
    }
}
