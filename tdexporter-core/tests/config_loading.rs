//! Integration tests for loading exporter configuration from disk.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use std::io::Write;
use tdexporter_core::{ExporterConfig, Protocol, Signal, TdExporterError};

fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp config file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp config file");
    file
}

#[test]
fn test_load_toml_file() {
    let file = write_config(
        ".toml",
        r#"
[connection]
address = "127.0.0.1:6041"
protocol = "ws"
username = "foo"
password = "bar"
database = "telemetry"

[connection.params]
read_timeout = "30m"

[targets]
logs_table_name = "logs.otel"
ttl_days = 3
"#,
    );

    let config = ExporterConfig::from_file(file.path()).unwrap();

    assert!(config.validate().is_ok());
    assert_eq!(config.connection.protocol(), Ok(Protocol::Ws));
    assert_eq!(config.targets.table_for(Signal::Logs), "logs.otel");
    assert_eq!(config.targets.table_for(Signal::Metrics), "otel_metrics");
    assert_eq!(
        config.dsn(""),
        "foo:bar@ws(127.0.0.1:6041)/telemetry?readTimeout=30m"
    );
}

#[test]
fn test_load_json_file() {
    let file = write_config(
        ".json",
        r#"{
  "connection": {
    "address": "127.0.0.1:6041",
    "protocol": "http",
    "params": { "disable_compression": true }
  },
  "targets": { "ttl_days": 7 }
}"#,
    );

    let config = ExporterConfig::from_file(file.path()).unwrap();

    assert_eq!(config.targets.ttl_days, 7);
    assert_eq!(
        config.dsn("otel"),
        "root@http(127.0.0.1:6041)/otel?disableCompression=true"
    );
}

#[test]
fn test_empty_toml_file_yields_defaults() {
    let file = write_config(".toml", "");

    let config = ExporterConfig::from_file(file.path()).unwrap();

    assert_eq!(config, ExporterConfig::default());
    assert_eq!(config.dsn(""), "root@ws(localhost:6041)/");
}

#[test]
fn test_unknown_extension_rejected() {
    let file = write_config(".yaml", "connection: {}");

    let result = ExporterConfig::from_file(file.path());

    assert!(matches!(result, Err(TdExporterError::Configuration { .. })));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let result = ExporterConfig::from_file(&path);

    assert!(matches!(result, Err(TdExporterError::Io { .. })));
}

#[test]
fn test_loaded_invalid_config_lists_every_violation() {
    let file = write_config(
        ".toml",
        r#"
[connection]
address = ""
protocol = "ftp"
"#,
    );

    let config = ExporterConfig::from_file(file.path()).unwrap();
    let error = config.validate().unwrap_err();
    let message = error.to_string();

    assert_eq!(error.violations().len(), 2);
    assert!(message.contains("address must be specified"));
    assert!(message.contains("\"ftp\""));
}

#[test]
fn test_password_never_serialized_back() {
    let file = write_config(
        ".toml",
        r#"
[connection]
password = "super_secret_password_123"
"#,
    );

    let config = ExporterConfig::from_file(file.path()).unwrap();
    let json = serde_json::to_string(&config).unwrap();
    let debug = format!("{config:?}");

    assert!(!json.contains("super_secret_password_123"));
    assert!(!debug.contains("super_secret_password_123"));
    assert!(config.dsn("").starts_with("root:super_secret_password_123@"));
}
