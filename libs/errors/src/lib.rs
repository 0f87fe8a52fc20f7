//! Unified error handling for the sensor ingestion tools
//!
//! Every library in the workspace returns [`SensorError`]; the CLI converts
//! it into an [`ErrorInfo`] for JSON output and into a process exit code.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

// ============================================================================
// ErrorInfo - serializable error report
// ============================================================================

/// Standard error information for machine-readable output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Process exit code the error maps to
    pub code: u8,
    /// Stable error code (e.g. `INVALID_FORMAT`)
    pub error_code: String,
    /// Error message
    pub message: String,
    /// Detailed error description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Field-specific errors for configuration problems
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_errors: HashMap<String, Vec<String>>,
}

impl ErrorInfo {
    /// Create a new ErrorInfo with just a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: 1,
            error_code: "UNKNOWN_ERROR".to_string(),
            message: message.into(),
            details: None,
            field_errors: HashMap::new(),
        }
    }

    /// Set the exit code
    pub fn with_code(mut self, code: u8) -> Self {
        self.code = code;
        self
    }

    /// Set the stable error code
    pub fn with_error_code(mut self, error_code: impl Into<String>) -> Self {
        self.error_code = error_code.into();
        self
    }

    /// Add details
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Add a field error
    pub fn add_field_error(mut self, field: impl Into<String>, error: impl Into<String>) -> Self {
        self.field_errors
            .entry(field.into())
            .or_default()
            .push(error.into());
        self
    }
}

// ============================================================================
// FormatIssue - why hex input was rejected
// ============================================================================

/// Reason a hex string could not be converted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatIssue {
    /// Digits left after stripping separators do not pair up
    #[error("odd number of hex digits ({len})")]
    OddLength { len: usize },

    /// A character that is neither a hex digit nor a separator
    ///
    /// `position` indexes the digits left after separators and `0x`
    /// prefixes are removed.
    #[error("invalid hex character {ch:?} at position {position}")]
    InvalidDigit { ch: char, position: usize },
}

// ============================================================================
// SensorError - Main error type
// ============================================================================

/// Main error type for the sensor ingestion tools
#[derive(Debug, Error)]
pub enum SensorError {
    // ======================================
    // Input Errors
    // ======================================
    #[error("Invalid format: {0}")]
    InvalidFormat(#[from] FormatIssue),

    // ======================================
    // Configuration Errors
    // ======================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid configuration: {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    // ======================================
    // Database Errors
    // ======================================
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    // ======================================
    // File & I/O Errors
    // ======================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // ======================================
    // Catch-all for other errors
    // ======================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using SensorError
pub type SensorResult<T> = Result<T, SensorError>;

/// Error category enum - used for classification and log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Database,
    Io,
    Internal,
    Unknown,
}

impl SensorError {
    /// Shortcut for an odd-length rejection
    pub fn odd_length(len: usize) -> Self {
        Self::InvalidFormat(FormatIssue::OddLength { len })
    }

    /// Shortcut for a bad-character rejection
    pub fn invalid_digit(ch: char, position: usize) -> Self {
        Self::InvalidFormat(FormatIssue::InvalidDigit { ch, position })
    }

    /// Stable error code (for JSON output and logs)
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidFormat(_) => "INVALID_FORMAT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::InvalidConfig { .. } => "INVALID_CONFIG",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Other(_) => "OTHER_ERROR",
        }
    }

    /// Error category (for classification)
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidFormat(_) => ErrorCategory::Validation,
            Self::Configuration(_) | Self::InvalidConfig { .. } => ErrorCategory::Configuration,
            Self::Database(_) => ErrorCategory::Database,
            Self::Io(_) => ErrorCategory::Io,
            Self::Serialization(_) => ErrorCategory::Internal,
            Self::Other(_) => ErrorCategory::Unknown,
        }
    }

    /// Process exit code, following the BSD `sysexits` convention
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Validation => 65,    // EX_DATAERR
            ErrorCategory::Configuration => 78, // EX_CONFIG
            ErrorCategory::Database => 69,      // EX_UNAVAILABLE
            ErrorCategory::Io => 74,            // EX_IOERR
            ErrorCategory::Internal => 70,      // EX_SOFTWARE
            ErrorCategory::Unknown => 1,
        }
    }

    /// Check if this error is retryable
    ///
    /// Malformed input never becomes valid by trying again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Database(err) => matches!(
                err,
                sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) | sqlx::Error::PoolClosed
            ),
            _ => false,
        }
    }

    /// Get log level
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;
        match self.category() {
            ErrorCategory::Database | ErrorCategory::Internal => Level::ERROR,
            ErrorCategory::Io | ErrorCategory::Configuration | ErrorCategory::Unknown => {
                Level::WARN
            },
            ErrorCategory::Validation => Level::INFO,
        }
    }

    /// Convert to ErrorInfo for JSON output
    pub fn to_error_info(&self) -> ErrorInfo {
        let mut error_info = ErrorInfo::new(self.to_string())
            .with_code(self.exit_code())
            .with_error_code(self.error_code());

        match self {
            Self::InvalidFormat(issue) => {
                error_info = error_info.with_details(issue.to_string());
            },
            Self::InvalidConfig { field, reason } => {
                error_info = error_info.add_field_error(field, reason);
            },
            _ => {},
        }

        error_info
    }
}

// Conversion traits for common error types
impl From<serde_json::Error> for SensorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<figment::Error> for SensorError {
    fn from(err: figment::Error) -> Self {
        Self::Configuration(err.to_string())
    }
}

// Helper macros for creating errors
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::SensorError::Configuration($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::SensorError::Configuration(format!($fmt, $($arg)*))
    };
}
