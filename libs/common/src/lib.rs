//! Shared building blocks for the sensor tools
//!
//! Provides the functions every crate in the workspace relies on:
//! - hex codec (normalization, decoding, encoding)
//! - logging setup
//! - configuration loading

pub mod config;
pub mod config_loader;
pub mod hex;
pub mod logging;
pub mod serde_helpers;

pub use config::{load_config, AppConfig, DatabaseConfig};
pub use logging::LogConfig;

// Re-export the error crate so downstream code needs a single import
pub use errors::{ErrorInfo, FormatIssue, SensorError, SensorResult};
