//! Well-known CloudWatch namespaces, metric names and dimension names.
//!
//! These are the canonical identifiers used by the alarm builder, the
//! disk dimension resolver, and the CloudWatch agent on the instance.
//! Both sides must agree on them or alarms never leave INSUFFICIENT_DATA.

/// Built-in EC2 platform metrics.
pub const NAMESPACE_EC2: &str = "AWS/EC2";

/// Metrics published by the CloudWatch agent running on the instance.
pub const NAMESPACE_CW_AGENT: &str = "CWAgent";

/// EC2 CPU utilization percentage (platform metric).
pub const METRIC_CPU_UTILIZATION: &str = "CPUUtilization";

/// Memory used percentage reported by the CloudWatch agent.
pub const METRIC_MEM_USED_PERCENT: &str = "mem_used_percent";

/// Disk used percentage reported by the CloudWatch agent, one series per mount.
pub const METRIC_DISK_USED_PERCENT: &str = "disk_used_percent";

/// Human-facing labels substituted into alarm identifiers.
pub mod labels {
    pub const CPU: &str = "CPU";
    pub const MEMORY: &str = "Memory";
    pub const DISK: &str = "Disk";
}

/// Dimension names.
pub mod dimensions {
    pub const INSTANCE_ID: &str = "InstanceId";
    pub const IMAGE_ID: &str = "ImageId";
    pub const INSTANCE_TYPE: &str = "InstanceType";
    pub const PATH: &str = "path";
    pub const DEVICE: &str = "device";
    pub const FSTYPE: &str = "fstype";
}

/// Dimension value matching any value for that dimension.
pub const WILDCARD: &str = "*";

/// Mount path of the root filesystem.
pub const ROOT_PATH: &str = "/";
