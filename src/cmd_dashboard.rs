//! `dashboard` subcommand handler.

use chickenshield_api::DashboardServer;
use chickenshield_config::Config;

use crate::cmd_watch::shutdown_signal;
use crate::setup;

/// Serve the dashboard until Ctrl-C. `host`/`port` override the config.
pub(crate) async fn run_dashboard(
    config: &Config,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut dashboard = config.dashboard.clone();
    if let Some(host) = host {
        dashboard.host = host;
    }
    if let Some(port) = port {
        dashboard.port = port;
    }

    let mut config = config.clone();
    config.dashboard = dashboard.clone();
    setup::validate(&config, false)?;

    let store = setup::open_store(&config).await?;
    let server = DashboardServer::new(dashboard, store);
    server.run(shutdown_signal()).await?;
    Ok(())
}
