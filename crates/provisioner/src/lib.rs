//! `alarmctl-provisioner` library crate.
//!
//! Re-exports internal modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod builder;
pub mod config;
pub mod error;
pub mod resolver;
pub mod sequence;

pub use builder::AlarmBuilder;
pub use config::{ConfigError, ProvisionConfig};
pub use error::ProvisionError;
pub use resolver::find_root_disk_dimensions;
pub use sequence::{provision, DiskDiscovery, ProvisionReport};

/// Log filter used when `RUST_LOG` is unset: info for the binary and both
/// library crates it drives.
pub const DEFAULT_LOG_FILTER: &str = "alarmctl=info,alarmctl_provisioner=info,alarmctl_cloud=info";
