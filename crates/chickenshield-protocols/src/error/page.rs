//! Page access errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Page unavailable: {0}")]
    Unavailable(String),

    #[error("Script evaluation failed: {0}")]
    Script(String),

    #[error("Invalid page URL: {0}")]
    InvalidUrl(String),
}

impl From<url::ParseError> for PageError {
    fn from(e: url::ParseError) -> Self {
        PageError::InvalidUrl(e.to_string())
    }
}
