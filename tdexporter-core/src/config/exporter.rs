//! Top-level exporter configuration and file loading.

use super::{ConnectionConfig, ExportTargets};
use crate::driver::{ConnectionFactory, Driver, ExportSession};
use crate::error::TdExporterError;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete exporter configuration.
///
/// Built once at startup, validated once, and read-only afterwards.
///
/// # Example
/// ```rust
/// use tdexporter_core::ExporterConfig;
///
/// let config = ExporterConfig::from_toml_str(r#"
///     [connection]
///     address = "127.0.0.1:6041"
///     protocol = "ws"
///
///     [connection.params]
///     read_timeout = "30m"
///
///     [targets]
///     ttl_days = 3
/// "#)?;
///
/// config.validate()?;
/// assert_eq!(config.dsn("otel"), "root@ws(127.0.0.1:6041)/otel?readTimeout=30m");
/// # Ok::<(), tdexporter_core::TdExporterError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExporterConfig {
    /// How to reach TDengine
    pub connection: ConnectionConfig,
    /// Where telemetry is written
    pub targets: ExportTargets,
}

impl ExporterConfig {
    /// Creates a configuration from its two parts.
    #[must_use]
    pub fn new(connection: ConnectionConfig, targets: ExportTargets) -> Self {
        Self {
            connection,
            targets,
        }
    }

    /// Loads configuration from a `.toml` or `.json` file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, has an unknown extension,
    /// or does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TdExporterError::io(format!("Failed to read {}", path.display()), e)
        })?;

        let extension = path.extension().and_then(|ext| ext.to_str());
        tracing::debug!(path = %path.display(), "loading exporter configuration");

        match extension {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(TdExporterError::configuration(format!(
                "Unsupported config file extension for {} (expected .toml or .json)",
                path.display()
            ))),
        }
    }

    /// Parses configuration from a TOML document.
    ///
    /// # Errors
    /// Returns error if the document is malformed or has unknown fields.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|source| TdExporterError::Toml {
            context: "Failed to parse exporter configuration".to_string(),
            source,
        })
    }

    /// Parses configuration from a JSON document.
    ///
    /// # Errors
    /// Returns error if the document is malformed or has unknown fields.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|source| TdExporterError::Serialization {
            context: "Failed to parse exporter configuration".to_string(),
            source,
        })
    }

    /// Validates the connection settings.
    ///
    /// # Errors
    /// Returns [`TdExporterError::InvalidConfig`] listing every violation.
    pub fn validate(&self) -> Result<()> {
        let violations = crate::validation::validate(&self.connection);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(TdExporterError::invalid_config(violations))
        }
    }

    /// Builds the DSN for `database_override` (empty = configured database).
    #[must_use]
    pub fn dsn(&self, database_override: &str) -> String {
        crate::dsn::build_dsn(&self.connection, database_override)
    }

    /// Validates, opens a connection and bundles it with the export targets.
    ///
    /// # Errors
    /// Returns [`TdExporterError::InvalidConfig`] before any driver call if
    /// validation fails, or [`TdExporterError::DriverOpen`] if the driver
    /// rejects the connection.
    pub async fn connect<D: Driver>(
        &self,
        factory: &ConnectionFactory<D>,
        database: &str,
    ) -> Result<ExportSession<D::Connection>> {
        self.validate()?;
        let connection = factory.open(&self.connection, database).await?;

        Ok(ExportSession {
            connection,
            targets: self.targets.clone(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::Protocol;

    #[test]
    fn test_default_config_dsn() {
        let config = ExporterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.dsn(""), "root@ws(localhost:6041)/");
    }

    #[test]
    fn test_load_ws_full_toml() {
        let config = ExporterConfig::from_toml_str(
            r#"
            [connection]
            address = "127.0.0.1:6041"
            protocol = "ws"
            username = "foo"
            password = "bar"

            [connection.params]
            read_timeout = "30m"
            write_timeout = "10s"

            [targets]
            logs_table_name = "logs.otel"
            metrics_table_name = "metrics.otel"
            traces_table_name = "traces.otel"
            ttl_days = 3
            "#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.connection.protocol(), Ok(Protocol::Ws));
        assert_eq!(config.targets.ttl_days, 3);
        assert_eq!(
            config.dsn(""),
            "foo:bar@ws(127.0.0.1:6041)/?readTimeout=30m&writeTimeout=10s"
        );
    }

    #[test]
    fn test_load_rest_full_json() {
        let config = ExporterConfig::from_json_str(
            r#"{
                "connection": {
                    "address": "127.0.0.1:6041",
                    "protocol": "http",
                    "username": "foo",
                    "password": "bar",
                    "params": { "read_buffer_size": 52428800, "disable_compression": false }
                }
            }"#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.targets, ExportTargets::default());
        assert_eq!(
            config.dsn(""),
            "foo:bar@http(127.0.0.1:6041)/?disableCompression=false&readBufferSize=52428800"
        );
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result = ExporterConfig::from_toml_str(
            r#"
            [connection]
            adress = "127.0.0.1:6041"
            "#,
        );
        assert!(matches!(result, Err(TdExporterError::Toml { .. })));

        let result = ExporterConfig::from_json_str(r#"{"exporter": {}}"#);
        assert!(matches!(result, Err(TdExporterError::Serialization { .. })));
    }

    #[test]
    fn test_invalid_config_reports_all_violations() {
        let config = ExporterConfig::from_toml_str(
            r#"
            [connection]
            address = ""
            protocol = "ftp"
            "#,
        )
        .unwrap();

        let error = config.validate().unwrap_err();
        assert_eq!(error.violations().len(), 2);
    }
}
