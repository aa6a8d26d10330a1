//! Change detection for single-page apps.

mod mail;
mod settle;

pub use mail::MailWatcher;
pub use settle::SettledNotifier;
