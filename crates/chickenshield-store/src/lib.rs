//! Result stores.
//!
//! Both stores keep a last-result slot and a bounded history, reject
//! history entries whose timestamp is already present, and publish a
//! [`StoreChange`](chickenshield_protocols::StoreChange) after every write.

mod file;
mod memory;

pub use file::FileResultStore;
pub use memory::MemoryResultStore;

/// Capacity of the change notification channel.
const CHANGE_CHANNEL_CAPACITY: usize = 64;
