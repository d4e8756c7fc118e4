//! Delta Import command-line front-end
//!
//! Wires configuration, logging and the `delta-importer` library together.
//! This library exposes the components for testing purposes.

pub mod commands;
pub mod config;
pub mod error;
pub mod prompt;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use error::{AppError, Result};
