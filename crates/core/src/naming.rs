//! Alarm identifier naming convention.
//!
//! CloudWatch upserts alarms by name, so the identifier is the only thing
//! that keeps a rerun from creating duplicates.

use serde::{Deserialize, Serialize};

use crate::alert::Severity;

/// The instance an alarm set is provisioned for, plus the account label
/// shown in every identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceTarget {
    pub instance_id: String,
    pub instance_name: String,
    pub account_name: String,
}

/// Generate an alarm identifier.
///
/// Convention: `{severity}_{account}_{metric_label}_Reaches_{threshold}%_{instance_name}_({instance_id})`
///
/// # Examples
///
/// ```
/// use alarmctl_core::naming::alarm_name;
/// use alarmctl_core::{InstanceTarget, Severity};
///
/// let target = InstanceTarget {
///     instance_id: "i-abc".into(),
///     instance_name: "Name".into(),
///     account_name: "ACME".into(),
/// };
/// assert_eq!(
///     alarm_name(&target, Severity::Critical, "CPU", 90.0),
///     "Critical_ACME_CPU_Reaches_90%_Name_(i-abc)",
/// );
/// ```
pub fn alarm_name(
    target: &InstanceTarget,
    severity: Severity,
    metric_label: &str,
    threshold: f64,
) -> String {
    format!(
        "{}_{}_{}_Reaches_{}%_{}_({})",
        severity.label(),
        target.account_name,
        metric_label,
        format_threshold(threshold),
        target.instance_name,
        target.instance_id,
    )
}

/// Render a threshold the way an operator typed it: `90`, not `90.0`.
pub fn format_threshold(threshold: f64) -> String {
    // f64's Display already drops a zero fraction and picks the shortest
    // round-tripping form for everything else. Adding 0.0 folds -0 into 0.
    (threshold + 0.0).to_string()
}
