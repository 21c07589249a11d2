//! Alarm specifications and the backend alarm-definition record.
//!
//! An [`AlarmSpec`] is what the caller asks for; an [`AlarmDefinition`] is
//! the complete upsert record with the fixed evaluation policy applied.

use serde::{Deserialize, Serialize};

use crate::alert::Severity;
use crate::dimensions::DimensionSet;
use crate::error::CoreError;
use crate::metric_names::dimensions::INSTANCE_ID;
use crate::naming::{alarm_name, InstanceTarget};
use crate::threshold_validation::validate_percent;

/// Sample period for every alarm, in seconds.
pub const PERIOD_SECS: i32 = 300;

/// Number of periods that must breach before the alarm fires.
pub const EVALUATION_PERIODS: i32 = 1;

/// Statistic applied to the metric over each period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statistic {
    Average,
}

impl Statistic {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Average => "Average",
        }
    }
}

/// How the statistic is compared against the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOperator {
    GreaterThanOrEqualToThreshold,
}

impl ComparisonOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GreaterThanOrEqualToThreshold => "GreaterThanOrEqualToThreshold",
        }
    }
}

/// A requested alarm, before the evaluation policy and identifier are applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmSpec {
    pub metric_name: String,
    /// Percentage in `[0, 100]`.
    pub threshold: f64,
    pub severity: Severity,
    /// Human-facing metric name used in the identifier (`CPU`, `Disk`, ...).
    pub metric_label: String,
    pub namespace: String,
    /// `None` means "scope to the target instance only".
    pub dimensions: Option<DimensionSet>,
}

/// Complete `PutMetricAlarm` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmDefinition {
    pub alarm_name: String,
    pub metric_name: String,
    pub namespace: String,
    pub statistic: Statistic,
    pub period_secs: i32,
    pub evaluation_periods: i32,
    pub threshold: f64,
    pub comparison_operator: ComparisonOperator,
    pub dimensions: DimensionSet,
    /// Notification targets (SNS topic ARNs). Empty means no actions.
    pub alarm_actions: Vec<String>,
}

impl AlarmDefinition {
    /// Build the upsert record for `spec` on `target`.
    ///
    /// Fails if the threshold is not a percentage. No other field is
    /// validated locally; CloudWatch rejects bad namespace/metric/dimension
    /// combinations itself.
    pub fn build(
        spec: &AlarmSpec,
        target: &InstanceTarget,
        notification_target: Option<&str>,
    ) -> Result<Self, CoreError> {
        validate_percent(spec.threshold, "threshold")?;

        let dimensions = match &spec.dimensions {
            Some(dims) => dims.clone(),
            None => DimensionSet::new().with(INSTANCE_ID, target.instance_id.as_str()),
        };

        Ok(Self {
            alarm_name: alarm_name(target, spec.severity, &spec.metric_label, spec.threshold),
            metric_name: spec.metric_name.clone(),
            namespace: spec.namespace.clone(),
            statistic: Statistic::Average,
            period_secs: PERIOD_SECS,
            evaluation_periods: EVALUATION_PERIODS,
            threshold: spec.threshold,
            comparison_operator: ComparisonOperator::GreaterThanOrEqualToThreshold,
            dimensions,
            alarm_actions: notification_target
                .map(|arn| vec![arn.to_string()])
                .unwrap_or_default(),
        })
    }
}
