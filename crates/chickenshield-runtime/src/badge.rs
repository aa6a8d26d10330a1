//! Badge sinks.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use chickenshield_protocols::{Badge, BadgeSink};

/// Reports badge changes through the log.
#[derive(Debug, Default)]
pub struct LogBadge;

impl BadgeSink for LogBadge {
    fn set_badge(&self, badge: &Badge) {
        info!(text = badge.text, color = badge.color, "Badge updated");
    }
}

/// Keeps the current badge in memory so other components can read it.
#[derive(Debug, Clone, Default)]
pub struct SharedBadge {
    current: Arc<RwLock<Option<Badge>>>,
}

impl SharedBadge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Badge last set, if any.
    pub fn current(&self) -> Option<Badge> {
        *self.current.read()
    }
}

impl BadgeSink for SharedBadge {
    fn set_badge(&self, badge: &Badge) {
        *self.current.write() = Some(*badge);
    }
}
