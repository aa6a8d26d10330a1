//! Whole-page extraction for ordinary websites.

use async_trait::async_trait;
use url::Url;

use chickenshield_protocols::{ContentDescription, ContentProvider, PageError, PageView};

/// Describes any web page that is not the webmail app.
///
/// Only `http` and `https` documents are described.
pub struct GenericPageProvider {
    webmail_host: String,
    cap: usize,
}

impl GenericPageProvider {
    pub fn new(webmail_host: impl Into<String>, cap: usize) -> Self {
        Self {
            webmail_host: webmail_host.into(),
            cap,
        }
    }
}

#[async_trait]
impl ContentProvider for GenericPageProvider {
    fn id(&self) -> &str {
        "website"
    }

    fn applies_to(&self, url: &Url) -> bool {
        matches!(url.scheme(), "http" | "https")
            && !url.host_str().is_some_and(|host| host.contains(&self.webmail_host))
    }

    async fn extract(&self, page: &dyn PageView) -> Result<Option<ContentDescription>, PageError> {
        let url = page.url().await?;
        let title = page.title().await?;
        let text = page.visible_text().await?;
        Ok(Some(ContentDescription::website(url, title, &text, self.cap)))
    }
}
