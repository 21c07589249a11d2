//! Domain types for CloudWatch threshold alarm provisioning.
//!
//! Pure logic -- no network access. The cloud crate talks to the
//! monitoring backend; this crate only describes what gets sent.

pub mod alarm;
pub mod alert;
pub mod category;
pub mod dimensions;
pub mod error;
pub mod metric_names;
pub mod naming;
pub mod threshold_validation;

pub use alarm::{AlarmDefinition, AlarmSpec, ComparisonOperator, Statistic};
pub use alert::{Severity, ThresholdTier};
pub use category::MetricCategory;
pub use dimensions::{Dimension, DimensionSet, MetricDescriptor};
pub use error::CoreError;
pub use naming::InstanceTarget;
