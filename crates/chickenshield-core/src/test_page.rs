//! In-memory page used by extractor and watcher tests.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use chickenshield_protocols::{ElementSnapshot, PageError, PageView};

#[derive(Default)]
struct PageState {
    url: String,
    title: String,
    text: String,
    elements: HashMap<String, ElementSnapshot>,
}

#[derive(Default)]
pub struct FakePage {
    state: Mutex<PageState>,
}

impl FakePage {
    pub fn new(url: &str) -> Self {
        let page = Self::default();
        page.set_url(url);
        page
    }

    pub fn with_title(self, title: &str) -> Self {
        self.state.lock().title = title.to_string();
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.state.lock().text = text.to_string();
        self
    }

    pub fn with_element(self, selector: &str, element: ElementSnapshot) -> Self {
        self.set_element(selector, element);
        self
    }

    pub fn set_url(&self, url: &str) {
        self.state.lock().url = url.to_string();
    }

    pub fn set_element(&self, selector: &str, element: ElementSnapshot) {
        self.state.lock().elements.insert(selector.to_string(), element);
    }

    pub fn remove_element(&self, selector: &str) {
        self.state.lock().elements.remove(selector);
    }
}

#[async_trait]
impl PageView for FakePage {
    async fn url(&self) -> Result<String, PageError> {
        Ok(self.state.lock().url.clone())
    }

    async fn title(&self) -> Result<String, PageError> {
        Ok(self.state.lock().title.clone())
    }

    async fn visible_text(&self) -> Result<String, PageError> {
        Ok(self.state.lock().text.clone())
    }

    async fn query(&self, selector: &str) -> Result<Option<ElementSnapshot>, PageError> {
        Ok(self.state.lock().elements.get(selector).cloned())
    }
}
