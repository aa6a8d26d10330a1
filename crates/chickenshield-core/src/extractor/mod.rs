//! Content extraction.

mod generic;
mod mail;

pub use generic::GenericPageProvider;
pub use mail::{MailSelectors, MailViewProvider};

use std::sync::Arc;

use tracing::{debug, info};
use url::Url;

use chickenshield_config::Config;
use chickenshield_protocols::{ContentDescription, ContentProvider, ExtensionMessage, PageError, PageView};

use crate::dispatch::MessageSender;
use crate::error::CoreError;

/// Result of a single scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A description was sent for analysis.
    Dispatched(ContentDescription),
    /// The page has nothing to describe yet.
    NotReady,
    /// No provider handles the page URL.
    Unsupported,
}

/// Picks a provider for a page and sends its description off for analysis.
///
/// Providers are consulted in registration order; the first one whose
/// [`ContentProvider::applies_to`] matches wins.
pub struct ContentExtractor {
    providers: Vec<Arc<dyn ContentProvider>>,
    sender: MessageSender,
}

impl ContentExtractor {
    pub fn new(sender: MessageSender) -> Self {
        Self {
            providers: Vec::new(),
            sender,
        }
    }

    /// Mail view first, then the whole-page fallback.
    pub fn from_config(config: &Config, sender: MessageSender) -> Self {
        let cap = config.limits.page_text_chars;
        Self::new(sender)
            .with_provider(Arc::new(MailViewProvider::from_config(&config.webmail, cap)))
            .with_provider(Arc::new(GenericPageProvider::new(config.webmail.host.clone(), cap)))
    }

    pub fn with_provider(mut self, provider: Arc<dyn ContentProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn provider_for(&self, url: &Url) -> Option<&Arc<dyn ContentProvider>> {
        self.providers.iter().find(|p| p.applies_to(url))
    }

    /// Describe the page without dispatching.
    pub async fn describe(&self, page: &dyn PageView) -> Result<Option<ContentDescription>, CoreError> {
        let url = page_url(page).await?;
        let Some(provider) = self.provider_for(&url) else {
            debug!("No provider for {}", url);
            return Ok(None);
        };
        Ok(provider.extract(page).await?)
    }

    /// Describe the page and send the description for analysis without
    /// waiting for the verdict.
    pub async fn scan(&self, page: &dyn PageView) -> Result<ScanOutcome, CoreError> {
        let url = page_url(page).await?;
        let Some(provider) = self.provider_for(&url) else {
            debug!("No provider for {}", url);
            return Ok(ScanOutcome::Unsupported);
        };

        match provider.extract(page).await? {
            Some(desc) => {
                info!(provider = provider.id(), source = %desc.source, "Scanned page");
                self.sender.send(ExtensionMessage::analyze(desc.clone()))?;
                Ok(ScanOutcome::Dispatched(desc))
            }
            None => {
                debug!(provider = provider.id(), "Page not ready for extraction");
                Ok(ScanOutcome::NotReady)
            }
        }
    }
}

async fn page_url(page: &dyn PageView) -> Result<Url, CoreError> {
    let url = page.url().await?;
    Ok(Url::parse(&url).map_err(PageError::from)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_page::FakePage;
    use chickenshield_protocols::{ContentKind, ElementSnapshot};

    fn extractor() -> (ContentExtractor, tokio::sync::mpsc::UnboundedReceiver<crate::Envelope>) {
        let (sender, rx) = MessageSender::channel();
        (ContentExtractor::from_config(&Config::default(), sender), rx)
    }

    #[tokio::test]
    async fn test_scan_website_dispatches() {
        let (extractor, mut rx) = extractor();
        let page = FakePage::new("https://example.com/").with_title("Example").with_text("Hello");

        let outcome = extractor.scan(&page).await.unwrap();
        let ScanOutcome::Dispatched(desc) = outcome else {
            panic!("expected dispatch, got {:?}", outcome);
        };
        assert_eq!(desc.kind, ContentKind::Website);

        let envelope = rx.try_recv().unwrap();
        assert_eq!(envelope.message, ExtensionMessage::analyze(desc));
        assert!(envelope.reply.is_none());
    }

    #[tokio::test]
    async fn test_scan_webmail_uses_mail_provider() {
        let (extractor, mut rx) = extractor();
        let page = FakePage::new("https://mail.google.com/mail/u/0/#inbox/abc")
            .with_text("Inbox chrome that must not be scanned")
            .with_element(".hP", ElementSnapshot::new("Invoice"))
            .with_element(".a3s", ElementSnapshot::new("Pay now"));

        let outcome = extractor.scan(&page).await.unwrap();
        let ScanOutcome::Dispatched(desc) = outcome else {
            panic!("expected dispatch, got {:?}", outcome);
        };
        assert_eq!(desc.kind, ContentKind::Email);
        assert_eq!(desc.body, "Pay now");
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_scan_webmail_without_message() {
        let (extractor, mut rx) = extractor();
        let page = FakePage::new("https://mail.google.com/mail/u/0/#inbox");

        assert_eq!(extractor.scan(&page).await.unwrap(), ScanOutcome::NotReady);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_scan_without_providers() {
        let (sender, _rx) = MessageSender::channel();
        let extractor = ContentExtractor::new(sender);
        let page = FakePage::new("https://example.com/");

        assert_eq!(extractor.scan(&page).await.unwrap(), ScanOutcome::Unsupported);
    }

    #[tokio::test]
    async fn test_scan_skips_non_web_pages() {
        let (extractor, mut rx) = extractor();
        for url in ["about:blank", "chrome://settings/", "chrome-extension://abc/popup.html", "file:///etc/passwd"] {
            let page = FakePage::new(url).with_text("local content");
            assert_eq!(extractor.scan(&page).await.unwrap(), ScanOutcome::Unsupported, "{url}");
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_scan_invalid_url() {
        let (extractor, _rx) = extractor();
        let page = FakePage::new("not a url");

        assert!(matches!(extractor.scan(&page).await, Err(CoreError::Page(_))));
    }

    #[tokio::test]
    async fn test_scan_closed_channel() {
        let (extractor, rx) = extractor();
        drop(rx);
        let page = FakePage::new("https://example.com/");

        assert!(matches!(extractor.scan(&page).await, Err(CoreError::ChannelClosed)));
    }

    #[tokio::test]
    async fn test_describe_does_not_dispatch() {
        let (extractor, mut rx) = extractor();
        let page = FakePage::new("https://example.com/").with_text("Hello");

        let desc = extractor.describe(&page).await.unwrap().unwrap();
        assert_eq!(desc.body, "Hello");
        assert!(rx.try_recv().is_err());
    }
}
