//! PDF printing for CDP page session.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::PrintOptions;

use super::core::PageSession;

const DOCUMENT_SIZE_SCRIPT: &str = "(() => { const e = document.documentElement; \
    return [Math.max(e.scrollWidth, document.body ? document.body.scrollWidth : 0), \
    Math.max(e.scrollHeight, document.body ? document.body.scrollHeight : 0)]; })()";

impl PageSession {
    /// Print the page to PDF bytes.
    pub async fn print_to_pdf(&self, options: &PrintOptions) -> Result<Vec<u8>, CdpError> {
        let result = self
            .call("Page.printToPDF", Some(serde_json::to_value(options)?))
            .await?;

        let data = result["data"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing PDF data".to_string()))?;

        STANDARD
            .decode(data)
            .map_err(|e| CdpError::InvalidResponse(format!("PDF data is not base64: {}", e)))
    }

    /// Print the whole document onto a single page.
    pub async fn print_single_page(&self) -> Result<Vec<u8>, CdpError> {
        let size = self.evaluate(DOCUMENT_SIZE_SCRIPT).await?;
        let width = size[0].as_f64().unwrap_or(0.0);
        let height = size[1].as_f64().unwrap_or(0.0);
        debug!("Printing {}x{} px document", width, height);

        self.print_to_pdf(&PrintOptions::single_page(width, height)).await
    }
}
