//! Configuration types for the exporter.
//!
//! - `ConnectionConfig`: how to reach TDengine (credentials, protocol, address)
//! - `ExportTargets`: table naming and retention
//! - `ExporterConfig`: the two composed, plus file loading
//!
//! # Security
//! `ConnectionConfig` holds the password in a zeroizing container; it is
//! never serialized or printed.

mod connection;
mod exporter;
mod targets;

pub use connection::{ConnectionConfig, DEFAULT_ADDRESS, DEFAULT_USERNAME, Protocol};
pub use exporter::ExporterConfig;
pub use targets::{ExportTargets, Signal};
