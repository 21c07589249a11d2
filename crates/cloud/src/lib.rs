//! Monitoring backend clients.
//!
//! - [`MonitoringBackend`] -- the two calls the provisioner needs
//!   (alarm upsert and paged metric listing).
//! - [`CloudWatchBackend`] -- AWS CloudWatch over `aws-sdk-cloudwatch`.
//! - [`MemoryBackend`] -- in-process backend with upsert semantics, used
//!   by tests and local runs.

pub mod backend;
pub mod cloudwatch;
pub mod error;
pub mod memory;

pub use backend::{MetricPage, MonitoringBackend};
pub use cloudwatch::CloudWatchBackend;
pub use error::BackendError;
pub use memory::MemoryBackend;
