//! The three metric categories an instance gets alarms for.

use serde::{Deserialize, Serialize};

use crate::metric_names::{
    labels, METRIC_CPU_UTILIZATION, METRIC_DISK_USED_PERCENT, METRIC_MEM_USED_PERCENT,
    NAMESPACE_CW_AGENT, NAMESPACE_EC2,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricCategory {
    Cpu,
    Memory,
    Disk,
}

impl MetricCategory {
    pub fn metric_name(self) -> &'static str {
        match self {
            Self::Cpu => METRIC_CPU_UTILIZATION,
            Self::Memory => METRIC_MEM_USED_PERCENT,
            Self::Disk => METRIC_DISK_USED_PERCENT,
        }
    }

    /// CPU is a platform metric; memory and disk need the CloudWatch agent.
    pub fn namespace(self) -> &'static str {
        match self {
            Self::Cpu => NAMESPACE_EC2,
            Self::Memory | Self::Disk => NAMESPACE_CW_AGENT,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Cpu => labels::CPU,
            Self::Memory => labels::MEMORY,
            Self::Disk => labels::DISK,
        }
    }
}
