//! Protocol-specific connection parameters and their query-string encoding.
//!
//! The TDengine drivers read options from the DSN query string using their
//! own camelCase keys. Each protocol has a fixed, ordered vocabulary:
//!
//! | protocol | keys (in order)                         |
//! |----------|-----------------------------------------|
//! | `ws`     | `readTimeout`, `writeTimeout`           |
//! | `http`   | `disableCompression`, `readBufferSize`  |
//!
//! Downstream parsers are not guaranteed to be order-insensitive, so the
//! order above is part of the wire contract.

use crate::config::Protocol;
use serde::{Deserialize, Serialize};

/// Driver key for the websocket read timeout.
pub const READ_TIMEOUT_KEY: &str = "readTimeout";
/// Driver key for the websocket write timeout.
pub const WRITE_TIMEOUT_KEY: &str = "writeTimeout";
/// Driver key for the REST compression switch.
pub const DISABLE_COMPRESSION_KEY: &str = "disableCompression";
/// Driver key for the REST read buffer size.
pub const READ_BUFFER_SIZE_KEY: &str = "readBufferSize";

/// Connection options for both protocols.
///
/// Only the fields belonging to the configured protocol are encoded; the
/// others are ignored. Timeouts are opaque duration strings (`"30m"`,
/// `"10s"`) handed to the driver unchanged.
///
/// # Example
/// ```rust
/// use tdexporter_core::params::{ProtocolParams, encode_params};
///
/// let params = ProtocolParams::default()
///     .with_read_timeout("30m")
///     .with_write_timeout("10s");
///
/// assert_eq!(encode_params("ws", &params), "?readTimeout=30m&writeTimeout=10s");
/// assert_eq!(encode_params("http", &params), "?disableCompression=false");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProtocolParams {
    /// `ws` only: read timeout, omitted when unset or empty
    pub read_timeout: Option<String>,
    /// `ws` only: write timeout, omitted when unset or empty
    pub write_timeout: Option<String>,
    /// `http` only: read buffer size in bytes, 0 means unset
    pub read_buffer_size: u64,
    /// `http` only: always encoded
    pub disable_compression: bool,
}

impl ProtocolParams {
    /// Builder method to set the websocket read timeout.
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: impl Into<String>) -> Self {
        self.read_timeout = Some(timeout.into());
        self
    }

    /// Builder method to set the websocket write timeout.
    #[must_use]
    pub fn with_write_timeout(mut self, timeout: impl Into<String>) -> Self {
        self.write_timeout = Some(timeout.into());
        self
    }

    /// Builder method to set the REST read buffer size.
    #[must_use]
    pub const fn with_read_buffer_size(mut self, size: u64) -> Self {
        self.read_buffer_size = size;
        self
    }

    /// Builder method to enable/disable REST compression.
    #[must_use]
    pub const fn with_disable_compression(mut self, disable: bool) -> Self {
        self.disable_compression = disable;
        self
    }

    /// Returns the `(key, value)` pairs that apply to `protocol`, in wire order.
    #[must_use]
    pub fn pairs(&self, protocol: Protocol) -> Vec<(&'static str, String)> {
        // (key, value) where `None` means the entry is skipped.
        let entries: [(&'static str, Option<String>); 2] = match protocol {
            Protocol::Ws => [
                (READ_TIMEOUT_KEY, non_empty(self.read_timeout.as_deref())),
                (WRITE_TIMEOUT_KEY, non_empty(self.write_timeout.as_deref())),
            ],
            Protocol::Http => [
                (
                    DISABLE_COMPRESSION_KEY,
                    Some(self.disable_compression.to_string()),
                ),
                (
                    READ_BUFFER_SIZE_KEY,
                    (self.read_buffer_size != 0).then(|| self.read_buffer_size.to_string()),
                ),
            ],
        };

        entries
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key, value)))
            .collect()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Encodes the parameters for a raw protocol name into a DSN suffix.
///
/// Returns `""` when no parameter applies, otherwise `?k1=v1&k2=v2...`.
/// An unrecognized protocol also yields `""`; rejecting it is the
/// validator's job, not the encoder's.
#[must_use]
pub fn encode_params(protocol: &str, params: &ProtocolParams) -> String {
    match protocol.parse::<Protocol>() {
        Ok(protocol) => encode_pairs(&params.pairs(protocol)),
        Err(_) => String::new(),
    }
}

fn encode_pairs(pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }

    let query: Vec<String> = pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    format!("?{}", query.join("&"))
}
