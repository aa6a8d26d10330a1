//! Error types for ChickenShield protocols.

mod analysis;
mod page;
mod store;

pub use analysis::AnalysisError;
pub use page::PageError;
pub use store::StoreError;
