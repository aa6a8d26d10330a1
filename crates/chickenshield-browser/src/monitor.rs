//! Tab discovery and per-tab scanning.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

use chickenshield_config::Config;
use chickenshield_core::{ContentExtractor, MailViewProvider, MailWatcher, MessageSender, ScanOutcome};
use chickenshield_protocols::{ContentProvider, PageView};

use crate::cdp::{CdpClient, CdpError, PageInfo, PageSession};
use crate::events::{install_mutation_bridge, page_events, PageEvent};
use crate::page::CdpPage;

struct TrackedTab {
    session_id: String,
    task: JoinHandle<()>,
}

/// Installs the in-page mutation observer for a tab.
#[async_trait]
pub(crate) trait MutationBridge: Send + Sync {
    async fn install(&self) -> Result<(), CdpError>;
}

#[async_trait]
impl MutationBridge for PageSession {
    async fn install(&self) -> Result<(), CdpError> {
        install_mutation_bridge(self).await
    }
}

/// Scanning state shared by every tab.
struct TabScanner {
    extractor: ContentExtractor,
    mail_provider: Arc<MailViewProvider>,
    sender: MessageSender,
    debounce: Duration,
}

impl TabScanner {
    fn from_config(config: &Config, sender: MessageSender) -> Self {
        let cap = config.limits.page_text_chars;
        Self {
            extractor: ContentExtractor::from_config(config, sender.clone()),
            mail_provider: Arc::new(MailViewProvider::from_config(&config.webmail, cap)),
            sender,
            debounce: Duration::from_millis(config.webmail.debounce_ms),
        }
    }

    async fn scan(&self, page: &dyn PageView) {
        match self.extractor.scan(page).await {
            Ok(ScanOutcome::Dispatched(desc)) => debug!("Dispatched {} for analysis", desc.source),
            Ok(outcome) => debug!("Nothing to scan: {:?}", outcome),
            Err(e) => warn!("Scan failed: {}", e),
        }
    }
}

/// Attaches to every browser tab and keeps it scanned.
///
/// Each tab is re-classified whenever a document finishes loading: webmail
/// documents get the mutation bridge and a fresh [`MailWatcher`], other
/// documents are scanned whole. Tabs open before the monitor started are
/// not scanned until they next load.
pub struct TabMonitor {
    client: Arc<CdpClient>,
    scanner: Arc<TabScanner>,
    poll_interval: Duration,
}

impl TabMonitor {
    pub fn new(client: Arc<CdpClient>, config: &Config, sender: MessageSender) -> Self {
        Self {
            client,
            scanner: Arc::new(TabScanner::from_config(config, sender)),
            poll_interval: Duration::from_secs(config.browser.poll_interval_secs),
        }
    }

    /// Poll for tabs until `shutdown` resolves. A failed poll is logged and
    /// retried on the next tick.
    pub async fn run(&self, shutdown: impl Future<Output = ()>) -> Result<(), CdpError> {
        tokio::pin!(shutdown);
        let mut tracked: HashMap<String, TrackedTab> = HashMap::new();
        let mut interval = tokio::time::interval(self.poll_interval);
        let mut first_poll = true;

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Tab monitor shutting down");
                    break;
                }
                _ = interval.tick() => {
                    match self.poll(&mut tracked, !first_poll).await {
                        Ok(()) => first_poll = false,
                        Err(e) => warn!("Failed to list browser tabs: {}", e),
                    }
                }
            }
        }

        for (_, tab) in tracked.drain() {
            self.client.release_session(&tab.session_id).await;
            tab.task.abort();
        }
        Ok(())
    }

    async fn poll(&self, tracked: &mut HashMap<String, TrackedTab>, scan_new: bool) -> Result<(), CdpError> {
        let pages = self.client.list_pages().await?;
        let open: HashMap<&str, &PageInfo> = pages
            .iter()
            .filter(|p| p.is_tab())
            .map(|p| (p.id.as_str(), p))
            .collect();

        // Forget closed tabs and tabs whose task ended.
        let mut gone = Vec::new();
        for (target_id, tab) in tracked.iter() {
            if !open.contains_key(target_id.as_str()) || tab.task.is_finished() {
                gone.push(target_id.clone());
            }
        }
        for target_id in gone {
            if let Some(tab) = tracked.remove(&target_id) {
                debug!("Tab {} gone", target_id);
                self.client.release_session(&tab.session_id).await;
                tab.task.abort();
            }
        }

        for (target_id, info) in open {
            if tracked.contains_key(target_id) {
                continue;
            }
            match self.client.attach_page(target_id).await {
                Ok(session) => {
                    let session = Arc::new(session);
                    let session_id = session.session_id().to_string();
                    info!("Attached to tab {} ({})", target_id, info.url);
                    let task = tokio::spawn(watch_tab(self.scanner.clone(), session, scan_new));
                    tracked.insert(target_id.to_string(), TrackedTab { session_id, task });
                }
                Err(e) => warn!("Failed to attach to tab {}: {}", target_id, e),
            }
        }

        Ok(())
    }
}

async fn watch_tab(scanner: Arc<TabScanner>, session: Arc<PageSession>, scan_now: bool) {
    let target_id = session.target_id().to_string();
    let Some(raw) = session.take_events() else {
        return;
    };
    let page: Arc<dyn PageView> = Arc::new(CdpPage::new(session.clone()));
    let driver = TabDriver::new(scanner, page, session);
    if let Err(e) = driver.run(page_events(raw), scan_now).await {
        warn!("Stopped watching tab {}: {}", target_id, e);
    }
}

/// A running [`MailWatcher`]. Dropping it stops the watcher.
struct MailTask {
    pokes: mpsc::UnboundedSender<()>,
    handle: JoinHandle<()>,
}

impl Drop for MailTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Follows one tab through its page events.
struct TabDriver {
    scanner: Arc<TabScanner>,
    page: Arc<dyn PageView>,
    bridge: Arc<dyn MutationBridge>,
    bridge_installed: bool,
    mail: Option<MailTask>,
}

impl TabDriver {
    fn new(scanner: Arc<TabScanner>, page: Arc<dyn PageView>, bridge: Arc<dyn MutationBridge>) -> Self {
        Self {
            scanner,
            page,
            bridge,
            bridge_installed: false,
            mail: None,
        }
    }

    /// Run until the event stream ends. `scan_now` scans the document
    /// already loaded at attach time.
    async fn run(mut self, mut events: mpsc::UnboundedReceiver<PageEvent>, scan_now: bool) -> Result<(), CdpError> {
        match self.is_webmail().await {
            Some(true) => self.start_mail().await?,
            Some(false) if scan_now => self.scanner.scan(self.page.as_ref()).await,
            _ => {}
        }

        while let Some(event) = events.recv().await {
            match event {
                PageEvent::Loaded => self.on_load().await?,
                PageEvent::Mutation => {
                    if let Some(mail) = &self.mail {
                        let _ = mail.pokes.send(());
                    }
                }
            }
        }
        Ok(())
    }

    async fn on_load(&mut self) -> Result<(), CdpError> {
        match self.is_webmail().await {
            Some(true) => self.start_mail().await,
            Some(false) => {
                if self.mail.take().is_some() {
                    debug!("Left webmail, mail watcher stopped");
                }
                self.scanner.scan(self.page.as_ref()).await;
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Start a watcher for the newly loaded webmail document, replacing any
    /// watcher left from the previous document.
    async fn start_mail(&mut self) -> Result<(), CdpError> {
        self.mail = None;
        if !self.bridge_installed {
            self.bridge.install().await?;
            self.bridge_installed = true;
        }

        let (pokes, mutations) = mpsc::unbounded_channel();
        let watcher = MailWatcher::new(
            self.scanner.mail_provider.clone(),
            self.scanner.sender.clone(),
            self.scanner.debounce,
        );
        let page = self.page.clone();
        let handle = tokio::spawn(async move {
            match watcher.run(page, mutations).await {
                Ok(scans) => debug!("Mail watcher finished after {} scans", scans),
                Err(e) => warn!("Mail watcher failed: {}", e),
            }
        });
        self.mail = Some(MailTask { pokes, handle });
        Ok(())
    }

    /// `None` when the URL cannot be read.
    async fn is_webmail(&self) -> Option<bool> {
        match self.page.url().await {
            Ok(url) => Some(Url::parse(&url).is_ok_and(|u| self.scanner.mail_provider.applies_to(&u))),
            Err(e) => {
                warn!("Failed to read tab URL: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
