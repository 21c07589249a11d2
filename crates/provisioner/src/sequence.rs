//! Orchestration sequence: CPU tiers, memory tiers, disk discovery, disk
//! tiers.
//!
//! Calls are strictly sequential. The first error aborts the run and
//! leaves already-created alarms in place; since alarms are upserted by
//! name, rerunning the whole sequence is the recovery path.

use serde::Serialize;

use alarmctl_cloud::MonitoringBackend;
use alarmctl_core::metric_names::{dimensions, ROOT_PATH, WILDCARD};
use alarmctl_core::{AlarmSpec, CoreError, DimensionSet, MetricCategory, ThresholdTier};

use crate::builder::AlarmBuilder;
use crate::config::ProvisionConfig;
use crate::error::ProvisionError;
use crate::resolver::find_root_disk_dimensions;

/// Outcome of the disk dimension lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DiskDiscovery {
    Found { device: String, fstype: String },
    NotFound,
}

/// Alarm names created by a run, per category, in creation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvisionReport {
    pub cpu_alarms: Vec<String>,
    pub memory_alarms: Vec<String>,
    pub disk_alarms: Vec<String>,
    pub disk: DiskDiscovery,
}

impl ProvisionReport {
    pub fn total(&self) -> usize {
        self.cpu_alarms.len() + self.memory_alarms.len() + self.disk_alarms.len()
    }

    pub fn alarm_names(&self) -> impl Iterator<Item = &str> {
        self.cpu_alarms
            .iter()
            .chain(&self.memory_alarms)
            .chain(&self.disk_alarms)
            .map(String::as_str)
    }
}

/// Run the full provisioning sequence for `config.target`.
pub async fn provision(
    config: &ProvisionConfig,
    backend: &dyn MonitoringBackend,
) -> Result<ProvisionReport, ProvisionError> {
    let target = &config.target;
    let builder = AlarmBuilder::new(backend, target, config.notification_target.as_deref());

    let cpu_alarms =
        create_tier_alarms(&builder, MetricCategory::Cpu, &config.tiers, None).await?;

    let memory_alarms = create_tier_alarms(
        &builder,
        MetricCategory::Memory,
        &config.tiers,
        Some(memory_dimensions(&target.instance_id)),
    )
    .await?;

    tracing::info!(instance_id = %target.instance_id, "Fetching root disk metric from CloudWatch");

    let (disk, disk_alarms) =
        match find_root_disk_dimensions(backend, &target.instance_id).await? {
            Some(discovered) => {
                let (device, fstype) = root_disk_identity(&discovered)?;
                tracing::info!(device = %device, fstype = %fstype, "Found root disk");

                let dims = disk_dimensions(&target.instance_id, &device, &fstype);
                let alarms =
                    create_tier_alarms(&builder, MetricCategory::Disk, &config.tiers, Some(dims))
                        .await?;
                (DiskDiscovery::Found { device, fstype }, alarms)
            }
            None => {
                tracing::warn!(
                    instance_id = %target.instance_id,
                    path = ROOT_PATH,
                    "No disk metrics found for root path, skipping disk alarms. Is the CloudWatch agent configured?",
                );
                (DiskDiscovery::NotFound, Vec::new())
            }
        };

    Ok(ProvisionReport {
        cpu_alarms,
        memory_alarms,
        disk_alarms,
        disk,
    })
}

/// One alarm per tier, in tier order.
async fn create_tier_alarms(
    builder: &AlarmBuilder<'_>,
    category: MetricCategory,
    tiers: &[ThresholdTier],
    dims: Option<DimensionSet>,
) -> Result<Vec<String>, ProvisionError> {
    let mut names = Vec::with_capacity(tiers.len());

    for tier in tiers {
        let spec = AlarmSpec {
            metric_name: category.metric_name().to_string(),
            threshold: tier.threshold,
            severity: tier.severity,
            metric_label: category.label().to_string(),
            namespace: category.namespace().to_string(),
            dimensions: dims.clone(),
        };
        names.push(builder.create_alarm(&spec).await?);
    }

    Ok(names)
}

/// Memory alarms match the agent's default `mem_used_percent` dimensions.
pub fn memory_dimensions(instance_id: &str) -> DimensionSet {
    DimensionSet::new()
        .with(dimensions::INSTANCE_ID, instance_id)
        .with(dimensions::IMAGE_ID, WILDCARD)
        .with(dimensions::INSTANCE_TYPE, WILDCARD)
}

/// Disk alarms pin the root mount with the discovered device and fstype.
pub fn disk_dimensions(instance_id: &str, device: &str, fstype: &str) -> DimensionSet {
    DimensionSet::new()
        .with(dimensions::INSTANCE_ID, instance_id)
        .with(dimensions::PATH, ROOT_PATH)
        .with(dimensions::DEVICE, device)
        .with(dimensions::FSTYPE, fstype)
}

/// Pull `device` and `fstype` out of a discovered dimension set.
///
/// CloudWatch only matches alarms to series with identical dimensions, so
/// a root disk metric missing either one cannot be alarmed on.
fn root_disk_identity(discovered: &DimensionSet) -> Result<(String, String), CoreError> {
    let require = |name: &str| {
        discovered.get(name).map(str::to_string).ok_or_else(|| {
            CoreError::Validation(format!(
                "Root disk metric has no '{name}' dimension; cannot build disk alarms"
            ))
        })
    };
    Ok((require(dimensions::DEVICE)?, require(dimensions::FSTYPE)?))
}
