//! Quiet-period detection.

use std::time::Duration;

use tokio::time::Instant;

/// Turns a burst of pokes into one "settled" signal once `quiet` has
/// passed without another poke.
///
/// Each poke restarts the quiet period. Meant to be polled from a
/// `tokio::select!` loop alongside whatever produces the pokes.
#[derive(Debug)]
pub struct SettledNotifier {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl SettledNotifier {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Record activity.
    pub fn poke(&mut self) {
        self.deadline = Some(Instant::now() + self.quiet);
    }

    /// Whether a settled signal is still owed for earlier pokes.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Resolve once the quiet period after the latest poke has elapsed.
    ///
    /// Never resolves while nothing is pending. Cancel safe: dropping the
    /// future keeps the pending deadline.
    pub async fn settled(&mut self) {
        match self.deadline {
            Some(deadline) => {
                tokio::time::sleep_until(deadline).await;
                self.deadline = None;
            }
            None => std::future::pending().await,
        }
    }
}
