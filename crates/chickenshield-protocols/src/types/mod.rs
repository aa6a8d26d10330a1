//! Shared data types.

mod badge;
mod content;
mod report;

pub use badge::{Badge, BadgeSink};
pub use content::{truncate_chars, ContentDescription, ContentKind, PAGE_TEXT_CAP, REQUEST_BODY_CAP};
pub use report::{ModelAssessment, RiskReport, SenderReputation, Verdict, FALLBACK_EXPLANATION};
