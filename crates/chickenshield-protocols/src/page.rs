//! Read-only page access.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::PageError;

/// Text and attributes of one element matched by a selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementSnapshot {
    pub text: String,
    pub attributes: HashMap<String, String>,
}

impl ElementSnapshot {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attributes: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }
}

/// A loaded page as seen by content providers.
#[async_trait]
pub trait PageView: Send + Sync {
    /// Current navigable URL, including the fragment.
    async fn url(&self) -> Result<String, PageError>;

    /// Document title.
    async fn title(&self) -> Result<String, PageError>;

    /// Rendered text of the document body.
    async fn visible_text(&self) -> Result<String, PageError>;

    /// First element matching a CSS selector.
    async fn query(&self, selector: &str) -> Result<Option<ElementSnapshot>, PageError>;
}
