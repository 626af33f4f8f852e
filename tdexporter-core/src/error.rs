//! Error types with credential sanitization.
//!
//! Error messages produced here never contain passwords or full connection
//! strings. Driver failures keep the collaborator's error untouched as the
//! `source` so callers can inspect it, but the top-level message only names
//! the driver.

use crate::driver::DriverName;
use crate::validation::ConfigViolation;
use thiserror::Error;

/// Boxed error returned by external collaborators such as database drivers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for exporter connection setup.
#[derive(Debug, Error)]
pub enum TdExporterError {
    /// Generic configuration problem (unreadable file, unknown format, ...)
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Configuration failed validation; every violation is listed
    #[error("Invalid configuration: {}", format_violations(.violations))]
    InvalidConfig { violations: Vec<ConfigViolation> },

    /// The driver collaborator rejected the DSN or could not be reached
    #[error("Failed to open {driver} connection")]
    DriverOpen {
        driver: DriverName,
        #[source]
        source: BoxError,
    },

    /// I/O operation failed
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON deserialization failed
    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// TOML deserialization failed
    #[error("TOML parsing failed: {context}")]
    Toml {
        context: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Convenience type alias for Results with TdExporterError
pub type Result<T> = std::result::Result<T, TdExporterError>;

fn format_violations(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl TdExporterError {
    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Wraps a list of validation violations.
    ///
    /// Callers are expected to pass a non-empty list; an empty list still
    /// produces an error value, it just has nothing to report.
    pub fn invalid_config(violations: Vec<ConfigViolation>) -> Self {
        Self::InvalidConfig { violations }
    }

    /// Creates a driver open error, keeping the collaborator's error as-is.
    pub fn driver_open(driver: DriverName, source: BoxError) -> Self {
        Self::DriverOpen { driver, source }
    }

    /// Creates an I/O error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Returns the validation violations carried by this error, if any.
    #[must_use]
    pub fn violations(&self) -> &[ConfigViolation] {
        match self {
            Self::InvalidConfig { violations } => violations,
            _ => &[],
        }
    }
}
