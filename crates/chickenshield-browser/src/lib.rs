//! # ChickenShield Browser
//!
//! Drives a running Chrome over the DevTools protocol: reads pages for the
//! content extractor, bridges DOM mutations into the mail watcher, keeps
//! every tab scanned and prints the dashboard to PDF.

pub mod cdp;
pub mod events;
pub mod export;
pub mod monitor;
pub mod page;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use events::{PageEvent, MUTATION_BINDING};
pub use export::{export_report, report_filename};
pub use monitor::TabMonitor;
pub use page::CdpPage;
