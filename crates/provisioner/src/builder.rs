//! Alarm Builder: turns an [`AlarmSpec`] into one `PutMetricAlarm` call.

use alarmctl_cloud::MonitoringBackend;
use alarmctl_core::{AlarmDefinition, AlarmSpec, InstanceTarget};

use crate::error::ProvisionError;

/// Upserts alarms for one instance against one backend.
pub struct AlarmBuilder<'a> {
    backend: &'a dyn MonitoringBackend,
    target: &'a InstanceTarget,
    notification_target: Option<&'a str>,
}

impl<'a> AlarmBuilder<'a> {
    pub fn new(
        backend: &'a dyn MonitoringBackend,
        target: &'a InstanceTarget,
        notification_target: Option<&'a str>,
    ) -> Self {
        Self {
            backend,
            target,
            notification_target,
        }
    }

    /// Create or overwrite the alarm described by `spec` and return its name.
    ///
    /// Validation happens before the remote call, so an invalid threshold
    /// never reaches the backend. Backend failures are returned as-is.
    pub async fn create_alarm(&self, spec: &AlarmSpec) -> Result<String, ProvisionError> {
        let definition = AlarmDefinition::build(spec, self.target, self.notification_target)?;

        tracing::debug!(
            alarm_name = %definition.alarm_name,
            namespace = %definition.namespace,
            metric = %definition.metric_name,
            threshold = definition.threshold,
            dimensions = definition.dimensions.len(),
            "Upserting alarm",
        );

        self.backend.put_metric_alarm(&definition).await?;

        tracing::info!(alarm_name = %definition.alarm_name, "Created alarm");
        Ok(definition.alarm_name)
    }
}
