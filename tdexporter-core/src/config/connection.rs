//! TDengine connection configuration.
//!
//! This module provides the `ConnectionConfig` struct together with the
//! `Protocol` enum it is validated against.

use crate::params::ProtocolParams;
use crate::security::Password;
use crate::validation::ConfigViolation;
use serde::{Deserialize, Serialize};

/// Transport used to reach the TDengine endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// WebSocket transport (`ws`)
    Ws,
    /// REST transport (`http`)
    Http,
}

impl Protocol {
    /// All supported protocols.
    pub const ALL: [Self; 2] = [Self::Ws, Self::Http];

    /// Returns the configuration and DSN spelling of the protocol.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ws => "ws",
            Self::Http => "http",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for Protocol {
    type Err = ConfigViolation;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ws" => Ok(Self::Ws),
            "http" => Ok(Self::Http),
            other => Err(ConfigViolation::UnsupportedProtocol {
                protocol: other.to_string(),
            }),
        }
    }
}

/// Default TDengine address used when none is configured.
pub const DEFAULT_ADDRESS: &str = "localhost:6041";
/// Default TDengine user.
pub const DEFAULT_USERNAME: &str = "root";

/// Configuration for a TDengine connection.
///
/// `protocol` is kept as the raw configured string so that an unsupported
/// value is reported by validation alongside every other problem rather
/// than aborting deserialization. Use [`ConnectionConfig::protocol`] for the
/// typed view.
///
/// # Security
/// The password is zeroized on drop, redacted in `Debug`, skipped when
/// serializing, and omitted from `Display`.
///
/// # Example
/// ```rust
/// use tdexporter_core::config::{ConnectionConfig, Protocol};
///
/// let config = ConnectionConfig::new("127.0.0.1:6041")
///     .with_protocol(Protocol::Http)
///     .with_username("foo")
///     .with_password("bar");
///
/// assert!(tdexporter_core::validation::validate(&config).is_empty());
/// assert_eq!(config.to_string(), "ConnectionConfig(http(127.0.0.1:6041)/)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConnectionConfig {
    /// Database user
    pub username: String,
    /// Optional password; empty means none
    #[serde(skip_serializing)]
    pub password: Password,
    /// Raw protocol name, expected to be `ws` or `http`
    pub protocol: String,
    /// Endpoint in `host:port` form
    #[serde(alias = "endpoint")]
    pub address: String,
    /// Database name; may be overridden per connection
    pub database: String,
    /// Protocol-specific driver options
    #[serde(alias = "conn_params")]
    pub params: ProtocolParams,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            password: Password::default(),
            protocol: Protocol::Ws.as_str().to_string(),
            address: DEFAULT_ADDRESS.to_string(),
            database: String::new(),
            params: ProtocolParams::default(),
        }
    }
}

impl std::fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ConnectionConfig({}({})/{})",
            self.protocol, self.address, self.database
        )
        // Intentionally omit username and never include credentials
    }
}

impl ConnectionConfig {
    /// Creates a new connection config for `address` with defaults elsewhere.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }

    /// Parses the configured protocol.
    ///
    /// # Errors
    /// Returns [`ConfigViolation::UnsupportedProtocol`] for anything other
    /// than `ws` or `http`.
    #[must_use]
    pub fn protocol(&self) -> std::result::Result<Protocol, ConfigViolation> {
        self.protocol.parse()
    }

    /// Builder method to set username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Builder method to set password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<Password>) -> Self {
        self.password = password.into();
        self
    }

    /// Builder method to set protocol.
    #[must_use]
    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol.as_str().to_string();
        self
    }

    /// Builder method to set database.
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Builder method to set protocol parameters.
    #[must_use]
    pub fn with_params(mut self, params: ProtocolParams) -> Self {
        self.params = params;
        self
    }
}
