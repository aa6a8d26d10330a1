//! `export` subcommand handler.

use std::path::Path;

use tracing::info;

use chickenshield_browser::{export_report, CdpClient};
use chickenshield_config::Config;

/// Print `url` (or the configured dashboard) to a PDF in `output`.
pub(crate) async fn run_export(config: &Config, url: Option<String>, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let url = url.unwrap_or_else(|| config.dashboard.base_url());
    let client = CdpClient::connect(&config.browser.endpoint).await?;
    info!("Exporting {}", url);

    let path = export_report(&client, &url, output).await?;
    println!("Saved {}", path.display());
    Ok(())
}
