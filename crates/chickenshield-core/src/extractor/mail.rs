//! Open-message extraction for the webmail app.

use async_trait::async_trait;
use url::Url;

use chickenshield_config::WebmailConfig;
use chickenshield_protocols::{ContentDescription, ContentProvider, PageError, PageView};

const UNKNOWN_SENDER: &str = "Unknown";

/// Selectors locating the parts of an open message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSelectors {
    pub subject: String,
    pub sender: String,
    pub body: String,
    /// Attribute on the sender element holding the address.
    pub sender_address_attribute: String,
}

impl Default for MailSelectors {
    fn default() -> Self {
        Self::from(&WebmailConfig::default())
    }
}

impl From<&WebmailConfig> for MailSelectors {
    fn from(config: &WebmailConfig) -> Self {
        Self {
            subject: config.subject_selector.clone(),
            sender: config.sender_selector.clone(),
            body: config.body_selector.clone(),
            sender_address_attribute: config.sender_address_attribute.clone(),
        }
    }
}

/// Describes the message currently open in the webmail app.
///
/// Yields nothing until both subject and body are present.
pub struct MailViewProvider {
    host: String,
    selectors: MailSelectors,
    cap: usize,
}

impl MailViewProvider {
    pub fn new(host: impl Into<String>, selectors: MailSelectors, cap: usize) -> Self {
        Self {
            host: host.into(),
            selectors,
            cap,
        }
    }

    pub fn from_config(config: &WebmailConfig, cap: usize) -> Self {
        Self::new(config.host.clone(), MailSelectors::from(config), cap)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// `"name <address>"`. The name is the element text, even when empty;
    /// the address falls back to that text. Without a sender element both
    /// parts are `Unknown`.
    async fn sender(&self, page: &dyn PageView) -> Result<String, PageError> {
        let Some(el) = page.query(&self.selectors.sender).await? else {
            return Ok(format!("{UNKNOWN_SENDER} <{UNKNOWN_SENDER}>"));
        };

        let name = el.text.as_str();
        let address = el
            .attribute(&self.selectors.sender_address_attribute)
            .filter(|a| !a.is_empty())
            .unwrap_or(name);

        Ok(format!("{name} <{address}>"))
    }
}

#[async_trait]
impl ContentProvider for MailViewProvider {
    fn id(&self) -> &str {
        "email"
    }

    fn applies_to(&self, url: &Url) -> bool {
        url.host_str().is_some_and(|host| host.contains(&self.host))
    }

    async fn extract(&self, page: &dyn PageView) -> Result<Option<ContentDescription>, PageError> {
        let Some(subject) = page.query(&self.selectors.subject).await? else {
            return Ok(None);
        };
        let Some(body) = page.query(&self.selectors.body).await? else {
            return Ok(None);
        };

        let source = self.sender(page).await?;
        Ok(Some(ContentDescription::email(source, subject.text, &body.text, self.cap)))
    }
}
