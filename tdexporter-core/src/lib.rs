//! Connection setup for the TDengine telemetry exporter.
//!
//! This crate turns an exporter configuration into a validated TDengine
//! DSN and hands it to an external driver. It performs no network I/O of
//! its own; the logs, metrics and traces exporters receive an
//! [`ExportSession`] and do the writing.
//!
//! # Security Guarantees
//! - Passwords are zeroized on drop and never logged, printed or serialized
//! - DSNs are only logged in redacted form
//! - Driver errors are surfaced unmodified, without echoing the DSN
//!
//! # Architecture
//! - `params`: protocol parameters and their query-string encoding
//! - `validation`: accumulating configuration checks
//! - `dsn`: connection string construction
//! - `driver`: protocol to driver mapping and the connection factory
//!
//! # Example
//! ```rust
//! use tdexporter_core::{ExporterConfig, validation};
//!
//! let config = ExporterConfig::default();
//! assert!(validation::validate(&config.connection).is_empty());
//! assert_eq!(config.dsn("otel"), "root@ws(localhost:6041)/otel");
//! ```

pub mod config;
pub mod driver;
pub mod dsn;
pub mod error;
pub mod logging;
pub mod params;
pub mod security;
pub mod validation;

// Re-export commonly used types
pub use config::{ConnectionConfig, ExportTargets, ExporterConfig, Protocol, Signal};
pub use driver::{
    Connection, ConnectionFactory, DEFAULT_DATABASE, Driver, DriverName, ExportSession,
    driver_for,
};
pub use dsn::{build_dsn, build_redacted_dsn, resolve_database};
pub use error::{BoxError, Result, TdExporterError};
pub use logging::init_logging;
pub use params::{ProtocolParams, encode_params};
pub use security::Password;
pub use validation::{ConfigViolation, validate};
