//! [`PageView`] over a CDP session.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use chickenshield_protocols::{ElementSnapshot, PageError, PageView};

use crate::cdp::PageSession;

/// Live tab read through `Runtime.evaluate`.
pub struct CdpPage {
    session: Arc<PageSession>,
}

#[derive(Deserialize)]
struct RawElement {
    #[serde(default)]
    text: String,
    #[serde(default)]
    attributes: HashMap<String, String>,
}

impl CdpPage {
    pub fn new(session: Arc<PageSession>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Arc<PageSession> {
        &self.session
    }
}

/// Script returning `{text, attributes}` for the first match of
/// `selector`, or `null`.
pub(crate) fn query_script(selector: &str) -> Result<String, serde_json::Error> {
    let literal = serde_json::to_string(selector)?;
    Ok(format!(
        "(() => {{ const el = document.querySelector({literal}); \
         if (!el) return null; \
         const attributes = {{}}; \
         for (const a of el.attributes) attributes[a.name] = a.value; \
         return {{ text: el.innerText || '', attributes }}; }})()"
    ))
}

#[async_trait]
impl PageView for CdpPage {
    async fn url(&self) -> Result<String, PageError> {
        Ok(self.session.get_url().await?)
    }

    async fn title(&self) -> Result<String, PageError> {
        Ok(self.session.get_title().await?)
    }

    async fn visible_text(&self) -> Result<String, PageError> {
        Ok(self
            .session
            .evaluate_string("document.body ? document.body.innerText : ''")
            .await?)
    }

    async fn query(&self, selector: &str) -> Result<Option<ElementSnapshot>, PageError> {
        let script = query_script(selector).map_err(|e| PageError::Script(e.to_string()))?;
        let value = self.session.evaluate(&script).await?;
        if value.is_null() {
            return Ok(None);
        }
        let raw: RawElement = serde_json::from_value(value).map_err(|e| PageError::Script(e.to_string()))?;
        Ok(Some(ElementSnapshot {
            text: raw.text,
            attributes: raw.attributes,
        }))
    }
}
