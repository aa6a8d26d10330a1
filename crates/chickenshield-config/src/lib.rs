//! # ChickenShield Config
//!
//! Configuration management for ChickenShield.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::{API_KEY_ENV, API_URL_ENV, ConfigLoader};
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
