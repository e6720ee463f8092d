use crate::domain::alert::{Alert, AlertSeverity};
use crate::domain::ports::AlertSink;

/// Reports alerts through `tracing`, for front ends without an alert surface.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAlertSink;

impl AlertSink for TracingAlertSink {
    fn add_alert(&self, alert: Alert) {
        match alert.severity {
            AlertSeverity::Error => tracing::error!(category = %alert.category, "alert raised"),
            AlertSeverity::Warning => tracing::warn!(category = %alert.category, "alert raised"),
        }
    }
}
