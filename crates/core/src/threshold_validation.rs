//! Shared threshold validation helpers.
//!
//! Alarm thresholds are percentages; both the tier parser and the alarm
//! builder reject anything outside `[0, 100]` before it reaches CloudWatch.

use crate::error::CoreError;

/// Validate that a value is finite and falls within `[0.0, 100.0]`.
///
/// Returns a `CoreError::Validation` naming the field if out of range.
pub fn validate_percent(value: f64, name: &str) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::Validation(format!(
            "{name} must be a finite number, got {value}"
        )));
    }
    if !(0.0..=100.0).contains(&value) {
        return Err(CoreError::Validation(format!(
            "{name} must be between 0 and 100, got {value}"
        )));
    }
    Ok(())
}
