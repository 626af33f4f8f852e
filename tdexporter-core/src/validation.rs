//! Structural validation of connection settings.
//!
//! Validation accumulates every violation instead of stopping at the first,
//! so a misconfigured deployment can be fixed in one pass. It never mutates
//! the configuration and never fails itself; what to do with the returned
//! violations is up to the caller.
//!
//! # Example
//! ```rust
//! use tdexporter_core::config::ConnectionConfig;
//! use tdexporter_core::validation::{ConfigViolation, validate};
//!
//! let mut config = ConnectionConfig::new("");
//! config.protocol = "ftp".to_string();
//!
//! let violations = validate(&config);
//! assert!(violations.contains(&ConfigViolation::MissingAddress));
//! assert_eq!(violations.len(), 2);
//! ```

use crate::config::ConnectionConfig;
use thiserror::Error;

/// A single problem found in a connection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigViolation {
    /// No address configured
    #[error("address must be specified")]
    MissingAddress,

    /// Address is not of the form `host:port`
    #[error("address \"{address}\" must be in host:port format")]
    MalformedAddress { address: String },

    /// Protocol is neither `ws` nor `http`
    #[error("protocol \"{protocol}\" is not supported, must be \"ws\" or \"http\"")]
    UnsupportedProtocol { protocol: String },
}

/// Checks a connection configuration and returns every violation found.
///
/// An empty result means the configuration is valid. The checks are:
/// 1. the address is non-empty;
/// 2. a non-empty address splits on `:` into exactly two non-empty segments
///    (the port is not required to be numeric);
/// 3. the protocol is `ws` or `http`.
#[must_use]
pub fn validate(config: &ConnectionConfig) -> Vec<ConfigViolation> {
    let mut violations = Vec::new();

    if config.address.is_empty() {
        violations.push(ConfigViolation::MissingAddress);
    } else if !is_host_port(&config.address) {
        violations.push(ConfigViolation::MalformedAddress {
            address: config.address.clone(),
        });
    }

    if let Err(violation) = config.protocol() {
        violations.push(violation);
    }

    tracing::debug!(
        violations = violations.len(),
        "validated connection configuration"
    );

    violations
}

fn is_host_port(address: &str) -> bool {
    let mut segments = address.split(':');
    matches!(
        (segments.next(), segments.next(), segments.next()),
        (Some(host), Some(port), None) if !host.is_empty() && !port.is_empty()
    )
}
