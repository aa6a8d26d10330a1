//! # ChickenShield Protocols
//!
//! Core data model and protocol definitions (traits) for ChickenShield.
//! Contains only interface definitions and plain data - no I/O.
//!
//! ## Core Traits
//!
//! - [`PageView`] - Read-only view of a loaded page
//! - [`ContentProvider`] - Turns a page into a [`ContentDescription`]
//! - [`Analyzer`] - Produces a model assessment for a description
//! - [`ResultStore`] - Last-result slot plus bounded history
//! - [`BadgeSink`] - Receives badge updates

pub mod analyzer;
pub mod error;
pub mod message;
pub mod page;
pub mod provider;
pub mod store;
pub mod types;

pub use analyzer::Analyzer;
pub use error::{AnalysisError, PageError, StoreError};
pub use message::{ExtensionMessage, MessageResponse};
pub use page::{ElementSnapshot, PageView};
pub use provider::ContentProvider;
pub use store::{push_history, ResultStore, StoreChange, StoreKey, DEFAULT_HISTORY_LIMIT};
pub use types::*;
