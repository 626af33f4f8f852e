//! Export target naming.
//!
//! Pure naming data: where each telemetry signal is written and how long
//! it is retained. Nothing here touches the connection.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Telemetry signal handled by one of the exporters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Log records
    Logs,
    /// Metric data points
    Metrics,
    /// Trace spans
    Traces,
}

/// Table names and retention for exported telemetry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportTargets {
    /// Table receiving log records
    #[serde(alias = "logs_super_table_name")]
    pub logs_table_name: String,
    /// Table receiving metric data points
    #[serde(alias = "metrics_super_table_name")]
    pub metrics_table_name: String,
    /// Table receiving trace spans
    #[serde(alias = "traces_super_table_name")]
    pub traces_table_name: String,
    /// Retention in days, 0 = unlimited
    pub ttl_days: u32,
}

impl Default for ExportTargets {
    fn default() -> Self {
        Self {
            logs_table_name: "otel_logs".to_string(),
            metrics_table_name: "otel_metrics".to_string(),
            traces_table_name: "otel_traces".to_string(),
            ttl_days: 0,
        }
    }
}

impl ExportTargets {
    /// Table name for the given signal.
    #[must_use]
    pub fn table_for(&self, signal: Signal) -> &str {
        match signal {
            Signal::Logs => &self.logs_table_name,
            Signal::Metrics => &self.metrics_table_name,
            Signal::Traces => &self.traces_table_name,
        }
    }

    /// Retention period, `None` when unlimited.
    #[must_use]
    pub fn retention_days(&self) -> Option<NonZeroU32> {
        NonZeroU32::new(self.ttl_days)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_export_targets_default() {
        let targets = ExportTargets::default();
        assert_eq!(targets.table_for(Signal::Logs), "otel_logs");
        assert_eq!(targets.table_for(Signal::Metrics), "otel_metrics");
        assert_eq!(targets.table_for(Signal::Traces), "otel_traces");
        assert_eq!(targets.retention_days(), None);
    }

    #[test]
    fn test_retention_days() {
        let targets = ExportTargets {
            ttl_days: 3,
            ..Default::default()
        };
        assert_eq!(targets.retention_days().map(NonZeroU32::get), Some(3));
    }

    #[test]
    fn test_super_table_aliases() {
        let targets: ExportTargets = serde_json::from_str(
            r#"{"logs_super_table_name": "logs.otel", "traces_table_name": "traces.otel"}"#,
        )
        .unwrap();

        assert_eq!(targets.logs_table_name, "logs.otel");
        assert_eq!(targets.traces_table_name, "traces.otel");
        assert_eq!(targets.metrics_table_name, "otel_metrics");
    }
}
