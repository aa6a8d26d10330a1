//! Content provider protocol.

use async_trait::async_trait;
use url::Url;

use crate::error::PageError;
use crate::page::PageView;
use crate::types::ContentDescription;

/// Turns a page into a content description.
///
/// `Ok(None)` means the page is not ready to be described yet (for example
/// a mail view with no message open). It is not an error.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Provider identifier used in logs.
    fn id(&self) -> &str;

    /// Whether this provider handles pages at `url`.
    fn applies_to(&self, url: &Url) -> bool;

    /// Extract a description from the page.
    async fn extract(&self, page: &dyn PageView) -> Result<Option<ContentDescription>, PageError>;
}
