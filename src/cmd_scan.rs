//! `scan` subcommand handler.

use std::sync::Arc;

use tracing::{info, warn};

use chickenshield_browser::{CdpClient, CdpPage, PageSession};
use chickenshield_config::Config;
use chickenshield_core::{ContentExtractor, MessageSender};
use chickenshield_protocols::{ContentDescription, ExtensionMessage};

use crate::cmd_report::print_report;
use crate::setup;

/// Scan one tab, wait for its report and print it.
pub(crate) async fn run_scan(config: &Config, url: Option<String>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    setup::validate(config, true)?;
    let service = setup::build_service(config, setup::open_store(config).await?)?;
    let client = CdpClient::connect(&config.browser.endpoint).await?;

    let (sender, rx) = MessageSender::channel();
    let extractor = ContentExtractor::from_config(config, sender.clone());

    let description = match url.as_deref() {
        Some(url) => {
            let session = Arc::new(client.new_page(Some(url)).await?);
            let described = describe(&extractor, session.clone(), true).await;
            if let Err(e) = client.close_page(session.target_id()).await {
                warn!("Failed to close scan tab: {}", e);
            }
            client.release_session(session.session_id()).await;
            described?
        }
        None => {
            let session = Arc::new(attach_first_tab(&client).await?);
            let described = describe(&extractor, session.clone(), false).await;
            client.release_session(session.session_id()).await;
            described?
        }
    };

    let Some(description) = description else {
        println!("Nothing to scan on this page. On webmail, open a message first.");
        return Ok(());
    };
    info!("Scanning {} ({})", description.source, description.kind);

    tokio::spawn(service.run(rx));
    let report = sender
        .request(ExtensionMessage::analyze(description))
        .await?
        .into_report()
        .ok_or("Background service returned no report")?;

    print_report(&report, json)
}

async fn attach_first_tab(client: &CdpClient) -> Result<PageSession, Box<dyn std::error::Error>> {
    let pages = client.list_pages().await?;
    let tab = pages
        .iter()
        .find(|p| p.is_tab())
        .ok_or("No open tab to scan")?;
    info!("Using tab {}", tab.url);
    Ok(client.attach_page(&tab.id).await?)
}

async fn describe(
    extractor: &ContentExtractor,
    session: Arc<PageSession>,
    wait: bool,
) -> Result<Option<ContentDescription>, Box<dyn std::error::Error>> {
    if wait {
        session.wait_for_load().await?;
    }
    let page = CdpPage::new(session);
    Ok(extractor.describe(&page).await?)
}
