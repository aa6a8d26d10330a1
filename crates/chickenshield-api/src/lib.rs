//! Dashboard HTTP surface for ChickenShield.
//!
//! Serves the report view seeded from a `?data=` query, the stored scan
//! history and a small JSON API over the result store.

pub mod error;
pub mod routes;
pub mod server;
pub mod state;
pub mod view;

pub use error::DashboardError;
pub use routes::create_router;
pub use server::DashboardServer;
pub use state::AppState;
pub use view::{display_tag, RiskBand, ViewMode};
