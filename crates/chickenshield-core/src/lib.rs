//! # ChickenShield Core
//!
//! The page side of the scan pipeline:
//!
//! - [`ContentExtractor`] picks a [`ContentProvider`] for the page and
//!   dispatches the resulting description to the background service.
//! - [`SettledNotifier`] coalesces bursts of activity into one signal.
//! - [`MailWatcher`] re-runs mail extraction when the webmail app navigates
//!   without a reload.
//!
//! [`ContentProvider`]: chickenshield_protocols::ContentProvider

pub mod dispatch;
pub mod error;
pub mod extractor;
pub mod watcher;

#[cfg(test)]
mod test_page;

pub use dispatch::{Envelope, MessageSender};
pub use error::CoreError;
pub use extractor::{ContentExtractor, GenericPageProvider, MailSelectors, MailViewProvider, ScanOutcome};
pub use watcher::{MailWatcher, SettledNotifier};
