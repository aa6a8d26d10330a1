//! Core errors.

use thiserror::Error;

use chickenshield_protocols::PageError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Page(#[from] PageError),

    /// The background service is no longer receiving messages.
    #[error("Message channel closed")]
    ChannelClosed,

    /// The background service dropped a request without answering.
    #[error("No reply to {0}")]
    NoReply(&'static str),
}
