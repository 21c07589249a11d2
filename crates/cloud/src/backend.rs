//! The monitoring backend seam.

use async_trait::async_trait;

use alarmctl_core::{AlarmDefinition, MetricDescriptor};

use crate::error::BackendError;

/// One page of a metric catalog listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricPage {
    pub metrics: Vec<MetricDescriptor>,
    /// Continuation token; `None` on the last page.
    pub next_token: Option<String>,
}

/// Remote monitoring API used by the provisioner.
///
/// Implementations perform exactly one remote call per method invocation
/// and never retry.
#[async_trait]
pub trait MonitoringBackend: Send + Sync {
    /// Create or overwrite the alarm named `alarm.alarm_name`.
    async fn put_metric_alarm(&self, alarm: &AlarmDefinition) -> Result<(), BackendError>;

    /// Fetch one page of the metric catalog for `namespace` / `metric_name`.
    ///
    /// Pass the previous page's `next_token` to continue a listing.
    async fn list_metrics(
        &self,
        namespace: &str,
        metric_name: &str,
        next_token: Option<&str>,
    ) -> Result<MetricPage, BackendError>;
}
