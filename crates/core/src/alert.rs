//! Alarm severity levels and threshold tiers.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::naming::format_threshold;
use crate::threshold_validation::validate_percent;

/// Severity label of a provisioned alarm.
///
/// Severity only changes the label substituted into the alarm identifier.
/// Threshold ordering between tiers is a convention, not enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    Warning,
    Normal,
}

impl Severity {
    /// Display label used in alarm identifiers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Warning => "Warning",
            Self::Normal => "Normal",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Severity {
    type Err = CoreError;

    /// Parse a severity label, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "warning" => Ok(Self::Warning),
            "normal" => Ok(Self::Normal),
            other => Err(CoreError::Validation(format!(
                "Unknown severity '{other}'. Must be one of: Critical, Warning, Normal"
            ))),
        }
    }
}

/// One (threshold, severity) pair. Each tier yields one alarm per metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTier {
    pub threshold: f64,
    pub severity: Severity,
}

impl ThresholdTier {
    pub const fn new(threshold: f64, severity: Severity) -> Self {
        Self {
            threshold,
            severity,
        }
    }
}

/// Tiers applied to every metric category unless overridden.
pub const DEFAULT_TIERS: [ThresholdTier; 3] = [
    ThresholdTier::new(90.0, Severity::Critical),
    ThresholdTier::new(80.0, Severity::Warning),
    ThresholdTier::new(79.0, Severity::Normal),
];

/// Parse a tier list of the form `90:Critical,80:Warning,79:Normal`.
///
/// Entries keep their input order. Every threshold must be a percentage,
/// the list must not be empty, and no two entries may render the same
/// alarm identifier (`90:Critical` and `90.0:critical` collide).
pub fn parse_tiers(raw: &str) -> Result<Vec<ThresholdTier>, CoreError> {
    let mut tiers = Vec::new();
    let mut seen = HashSet::new();

    for entry in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (threshold, severity) = entry.split_once(':').ok_or_else(|| {
            CoreError::Validation(format!(
                "Tier '{entry}' must have the form <threshold>:<severity>"
            ))
        })?;

        let threshold: f64 = threshold.trim().parse().map_err(|_| {
            CoreError::Validation(format!(
                "Tier '{entry}' has a non-numeric threshold '{}'",
                threshold.trim()
            ))
        })?;
        validate_percent(threshold, "tier threshold")?;

        let severity: Severity = severity.parse()?;
        if !seen.insert((severity, format_threshold(threshold))) {
            return Err(CoreError::Validation(format!(
                "Tier '{entry}' duplicates an earlier {severity} tier at {}%",
                format_threshold(threshold)
            )));
        }

        tiers.push(ThresholdTier::new(threshold, severity));
    }

    if tiers.is_empty() {
        return Err(CoreError::Validation(
            "Tier list must contain at least one entry".into(),
        ));
    }

    Ok(tiers)
}
