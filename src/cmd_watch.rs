//! `watch` subcommand handler.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use chickenshield_browser::{CdpClient, TabMonitor};
use chickenshield_config::Config;
use chickenshield_core::MessageSender;
use chickenshield_protocols::ResultStore;

use crate::{cmd_report, setup};

/// Time allowed for in-flight analyses after the monitor stops.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Attach to Chrome and scan tabs until Ctrl-C, printing each new result.
pub(crate) async fn run_watch(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting ChickenShield v{}", env!("CARGO_PKG_VERSION"));
    setup::validate(config, true)?;

    let store = setup::open_store(config).await?;
    let service = setup::build_service(config, store.clone())?;
    let client = Arc::new(CdpClient::connect(&config.browser.endpoint).await?);
    info!("Connected to Chrome at {}", config.browser.endpoint);

    let changes = store.subscribe();
    let follower = tokio::spawn(async move {
        cmd_report::follow_results(changes, &mut std::io::stdout()).await;
    });

    let (sender, rx) = MessageSender::channel();
    let worker = tokio::spawn(service.run(rx));

    let monitor = TabMonitor::new(client, config, sender);
    let result = monitor.run(shutdown_signal()).await;
    drop(monitor);

    if tokio::time::timeout(DRAIN_TIMEOUT, worker).await.is_err() {
        warn!("Pending analyses did not finish within {:?}", DRAIN_TIMEOUT);
    }
    follower.abort();

    result?;
    info!("ChickenShield stopped");
    Ok(())
}

pub(crate) async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
