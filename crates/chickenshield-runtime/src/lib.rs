//! # ChickenShield Runtime
//!
//! The background service: receives extension messages, runs analysis,
//! attaches provenance, persists results and drives the badge.

mod badge;
mod service;

pub use badge::{LogBadge, SharedBadge};
pub use service::{BackgroundService, TimestampFn};
