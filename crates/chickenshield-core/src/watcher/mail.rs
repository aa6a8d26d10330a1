//! Re-extraction when the webmail app navigates in place.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use chickenshield_protocols::{ContentProvider, ExtensionMessage, PageView};

use super::settle::SettledNotifier;
use crate::dispatch::MessageSender;
use crate::error::CoreError;
use crate::extractor::MailViewProvider;

/// Watches a webmail tab and scans each newly opened message once.
///
/// DOM mutations arrive as unit pokes. After they settle, the tab URL is
/// compared with the last one seen; only a changed URL triggers
/// extraction. The URL at attach time is recorded without scanning.
pub struct MailWatcher {
    provider: Arc<MailViewProvider>,
    sender: MessageSender,
    quiet: Duration,
}

impl MailWatcher {
    pub fn new(provider: Arc<MailViewProvider>, sender: MessageSender, quiet: Duration) -> Self {
        Self {
            provider,
            sender,
            quiet,
        }
    }

    /// Run until the mutation stream closes. Returns how many messages
    /// were dispatched.
    pub async fn run(
        &self,
        page: Arc<dyn PageView>,
        mut mutations: mpsc::UnboundedReceiver<()>,
    ) -> Result<usize, CoreError> {
        let mut last_url = page.url().await?;
        let mut notifier = SettledNotifier::new(self.quiet);
        let mut dispatched = 0;

        info!("Watching mail view at {}", last_url);

        loop {
            tokio::select! {
                event = mutations.recv() => match event {
                    Some(()) => notifier.poke(),
                    None => break,
                },
                _ = notifier.settled() => {
                    match self.on_settled(page.as_ref(), &mut last_url).await {
                        Ok(true) => dispatched += 1,
                        Ok(false) => {}
                        Err(CoreError::ChannelClosed) => return Err(CoreError::ChannelClosed),
                        Err(e) => warn!("Mail extraction failed: {}", e),
                    }
                }
            }
        }

        debug!("Mutation stream closed after {} scans", dispatched);
        Ok(dispatched)
    }

    async fn on_settled(&self, page: &dyn PageView, last_url: &mut String) -> Result<bool, CoreError> {
        let current = page.url().await?;
        if current == *last_url {
            return Ok(false);
        }
        debug!("Mail view moved to {}", current);
        *last_url = current;

        match self.provider.extract(page).await? {
            Some(desc) => {
                info!(source = %desc.source, "Scanned open message");
                self.sender.send(ExtensionMessage::analyze(desc))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
