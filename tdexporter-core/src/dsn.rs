//! DSN construction for the TDengine drivers.
//!
//! Grammar:
//!
//! ```text
//! username[:password]@protocol(host:port)/database[?k1=v1[&k2=v2...]]
//! ```
//!
//! Building is pure: the configuration is borrowed immutably and a database
//! override only affects the returned string.

use crate::config::ConnectionConfig;
use crate::params::encode_params;
use crate::security::REDACTED;

/// Database used when neither the caller nor the configuration names one.
pub const DEFAULT_DATABASE: &str = "otel";

/// Returns the database name a DSN will target.
///
/// A non-empty `database_override` wins; otherwise the configured database
/// is used as-is, even when empty.
#[must_use]
pub fn database_name<'a>(config: &'a ConnectionConfig, database_override: &'a str) -> &'a str {
    if database_override.is_empty() {
        &config.database
    } else {
        database_override
    }
}

/// Returns the database a connection is opened against.
///
/// Like [`database_name`], but falls back to [`DEFAULT_DATABASE`] when both
/// the override and the configured database are empty.
#[must_use]
pub fn resolve_database<'a>(config: &'a ConnectionConfig, database_override: &'a str) -> &'a str {
    match database_name(config, database_override) {
        "" => DEFAULT_DATABASE,
        name => name,
    }
}

/// Builds the DSN handed to the driver.
///
/// The result contains the plain-text password; log
/// [`build_redacted_dsn`] instead.
///
/// # Example
/// ```rust
/// use tdexporter_core::config::{ConnectionConfig, Protocol};
/// use tdexporter_core::dsn::build_dsn;
///
/// let config = ConnectionConfig::new("localhost:6041").with_protocol(Protocol::Ws);
/// assert_eq!(build_dsn(&config, "otel"), "root@ws(localhost:6041)/otel");
/// ```
#[must_use]
pub fn build_dsn(config: &ConnectionConfig, database_override: &str) -> String {
    render(config, database_override, config.password.expose_secret())
}

/// Builds the DSN with the password replaced by `****`.
///
/// A configuration without a password renders exactly like [`build_dsn`].
#[must_use]
pub fn build_redacted_dsn(config: &ConnectionConfig, database_override: &str) -> String {
    let password = if config.password.is_empty() {
        ""
    } else {
        REDACTED
    };
    render(config, database_override, password)
}

fn render(config: &ConnectionConfig, database_override: &str, password: &str) -> String {
    let mut dsn = String::new();

    dsn.push_str(&config.username);
    if !password.is_empty() {
        dsn.push(':');
        dsn.push_str(password);
    }
    dsn.push('@');
    dsn.push_str(&config.protocol);
    dsn.push('(');
    dsn.push_str(&config.address);
    dsn.push_str(")/");
    dsn.push_str(database_name(config, database_override));
    dsn.push_str(&encode_params(&config.protocol, &config.params));

    dsn
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::Protocol;
    use crate::params::ProtocolParams;

    fn http_config() -> ConnectionConfig {
        ConnectionConfig::new("127.0.0.1:6041")
            .with_username("foo")
            .with_password("bar")
            .with_protocol(Protocol::Http)
            .with_params(ProtocolParams::default().with_read_buffer_size(52_428_800))
    }

    #[test]
    fn test_build_without_password_omits_segment() {
        let config = ConnectionConfig::new("localhost:6041").with_protocol(Protocol::Ws);
        assert_eq!(build_dsn(&config, "otel"), "root@ws(localhost:6041)/otel");
    }

    #[test]
    fn test_build_http_with_params() {
        assert_eq!(
            build_dsn(&http_config(), "otel"),
            "foo:bar@http(127.0.0.1:6041)/otel?disableCompression=false&readBufferSize=52428800"
        );
    }

    #[test]
    fn test_build_ws_with_timeouts() {
        let config = ConnectionConfig::new("127.0.0.1:6041")
            .with_username("foo")
            .with_password("bar")
            .with_params(
                ProtocolParams::default()
                    .with_read_timeout("30m")
                    .with_write_timeout("10s"),
            );
        assert_eq!(
            build_dsn(&config, ""),
            "foo:bar@ws(127.0.0.1:6041)/?readTimeout=30m&writeTimeout=10s"
        );
    }

    #[test]
    fn test_build_http_disable_compression() {
        let config = ConnectionConfig::new("127.0.0.1:6041")
            .with_protocol(Protocol::Http)
            .with_params(ProtocolParams::default().with_disable_compression(true));
        assert_eq!(
            build_dsn(&config, ""),
            "root@http(127.0.0.1:6041)/?disableCompression=true"
        );
    }

    #[test]
    fn test_override_replaces_configured_database() {
        let config = http_config().with_database("configured");

        assert!(build_dsn(&config, "otel").contains(")/otel?"));
        assert!(build_dsn(&config, "").contains(")/configured?"));
        assert_eq!(config.database, "configured");
    }

    #[test]
    fn test_override_does_not_leak_between_calls() {
        let config = ConnectionConfig::default();

        assert_eq!(build_dsn(&config, "first"), "root@ws(localhost:6041)/first");
        assert_eq!(build_dsn(&config, ""), "root@ws(localhost:6041)/");
        assert_eq!(build_dsn(&config, "second"), "root@ws(localhost:6041)/second");
    }

    #[test]
    fn test_build_is_idempotent() {
        let config = http_config();
        assert_eq!(build_dsn(&config, "otel"), build_dsn(&config, "otel"));
    }

    #[test]
    fn test_unknown_protocol_renders_without_params() {
        let mut config = http_config();
        config.protocol = "ftp".to_string();
        assert_eq!(build_dsn(&config, "otel"), "foo:bar@ftp(127.0.0.1:6041)/otel");
    }

    #[test]
    fn test_redacted_dsn_masks_password() {
        let config = http_config().with_password("super_secret_password_123");
        let redacted = build_redacted_dsn(&config, "otel");

        assert!(!redacted.contains("super_secret_password_123"));
        assert_eq!(
            redacted,
            "foo:****@http(127.0.0.1:6041)/otel?disableCompression=false&readBufferSize=52428800"
        );
    }

    #[test]
    fn test_redacted_dsn_without_password_matches_plain() {
        let config = ConnectionConfig::default();
        assert_eq!(build_redacted_dsn(&config, "otel"), build_dsn(&config, "otel"));
    }

    #[test]
    fn test_database_name_resolution() {
        let config = ConnectionConfig::default().with_database("configured");
        assert_eq!(database_name(&config, ""), "configured");
        assert_eq!(database_name(&config, "override"), "override");
    }

    #[test]
    fn test_resolve_database_falls_back_to_default() {
        let unnamed = ConnectionConfig::default();
        assert_eq!(resolve_database(&unnamed, ""), DEFAULT_DATABASE);
        assert_eq!(resolve_database(&unnamed, "override"), "override");

        let named = ConnectionConfig::default().with_database("telemetry");
        assert_eq!(resolve_database(&named, ""), "telemetry");
        assert_eq!(
            build_dsn(&unnamed, resolve_database(&unnamed, "")),
            "root@ws(localhost:6041)/otel"
        );
    }
}
