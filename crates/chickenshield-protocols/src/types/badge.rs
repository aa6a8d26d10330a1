//! Extension badge.

use serde::Serialize;

use super::report::Verdict;

/// Short text plus color shown on the extension icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub text: &'static str,
    pub color: &'static str,
}

impl Badge {
    /// Badge shown while an analysis is in flight.
    pub const PENDING: Badge = Badge { text: "...", color: "#999" };

    /// Badge reflecting a verdict.
    pub fn for_verdict(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Safe => Badge { text: "OK", color: "green" },
            Verdict::Suspicious => Badge { text: "WARN", color: "orange" },
            Verdict::Dangerous => Badge { text: "BAD", color: "red" },
            Verdict::Unknown => Badge { text: "?", color: "gray" },
        }
    }
}

/// Receives badge updates.
pub trait BadgeSink: Send + Sync {
    fn set_badge(&self, badge: &Badge);
}
