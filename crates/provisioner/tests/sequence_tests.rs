//! Integration tests for the provisioning sequence.
//!
//! Runs [`provision`] against a [`MemoryBackend`] and checks the exact set
//! of alarms upserted, the disk discovery branch, and fail-fast behaviour.

use alarmctl_cloud::MemoryBackend;
use alarmctl_core::alert::DEFAULT_TIERS;
use alarmctl_core::{DimensionSet, InstanceTarget, MetricDescriptor};
use alarmctl_provisioner::{provision, DiskDiscovery, ProvisionConfig, ProvisionError};
use assert_matches::assert_matches;

const TOPIC: &str = "arn:aws:sns:us-east-1:123456789012:alarms";

fn config() -> ProvisionConfig {
    ProvisionConfig {
        target: InstanceTarget {
            instance_id: "i-abc".into(),
            instance_name: "Name".into(),
            account_name: "ACME".into(),
        },
        notification_target: Some(TOPIC.into()),
        region: None,
        tiers: DEFAULT_TIERS.to_vec(),
    }
}

fn disk_metric(instance_id: &str, path: &str, device: &str, fstype: &str) -> MetricDescriptor {
    MetricDescriptor {
        namespace: "CWAgent".into(),
        metric_name: "disk_used_percent".into(),
        dimensions: DimensionSet::new()
            .with("InstanceId", instance_id)
            .with("ImageId", "ami-123")
            .with("InstanceType", "t3.medium")
            .with("path", path)
            .with("device", device)
            .with("fstype", fstype),
    }
}

// ---------------------------------------------------------------------------
// Test: full run with a root disk metric present
// ---------------------------------------------------------------------------

#[tokio::test]
async fn creates_nine_alarms_when_root_disk_is_found() {
    let backend = MemoryBackend::new().with_metrics(vec![
        disk_metric("i-abc", "/boot", "nvme0n1p128", "vfat"),
        disk_metric("i-abc", "/", "nvme0n1p1", "xfs"),
    ]);

    let report = provision(&config(), &backend).await.unwrap();

    assert_eq!(backend.put_calls(), 9);
    assert_eq!(backend.list_calls(), 1);
    assert_eq!(report.total(), 9);
    assert_eq!(
        report.disk,
        DiskDiscovery::Found {
            device: "nvme0n1p1".into(),
            fstype: "xfs".into(),
        }
    );
    assert_eq!(
        report.cpu_alarms,
        vec![
            "Critical_ACME_CPU_Reaches_90%_Name_(i-abc)",
            "Warning_ACME_CPU_Reaches_80%_Name_(i-abc)",
            "Normal_ACME_CPU_Reaches_79%_Name_(i-abc)",
        ]
    );
    assert_eq!(
        report.disk_alarms,
        vec![
            "Critical_ACME_Disk_Reaches_90%_Name_(i-abc)",
            "Warning_ACME_Disk_Reaches_80%_Name_(i-abc)",
            "Normal_ACME_Disk_Reaches_79%_Name_(i-abc)",
        ]
    );
}

#[tokio::test]
async fn alarm_records_carry_category_dimensions() {
    let backend =
        MemoryBackend::new().with_metrics(vec![disk_metric("i-abc", "/", "xvda1", "ext4")]);

    provision(&config(), &backend).await.unwrap();

    let cpu = backend
        .alarm("Critical_ACME_CPU_Reaches_90%_Name_(i-abc)")
        .await
        .unwrap();
    assert_eq!(cpu.namespace, "AWS/EC2");
    assert_eq!(cpu.metric_name, "CPUUtilization");
    assert_eq!(cpu.dimensions, DimensionSet::new().with("InstanceId", "i-abc"));
    assert_eq!(cpu.alarm_actions, vec![TOPIC.to_string()]);

    let memory = backend
        .alarm("Warning_ACME_Memory_Reaches_80%_Name_(i-abc)")
        .await
        .unwrap();
    assert_eq!(memory.namespace, "CWAgent");
    assert_eq!(memory.metric_name, "mem_used_percent");
    assert_eq!(
        memory.dimensions,
        DimensionSet::new()
            .with("InstanceId", "i-abc")
            .with("ImageId", "*")
            .with("InstanceType", "*")
    );

    // Only the four pinned dimensions, not the agent's ImageId/InstanceType.
    let disk = backend
        .alarm("Normal_ACME_Disk_Reaches_79%_Name_(i-abc)")
        .await
        .unwrap();
    assert_eq!(disk.metric_name, "disk_used_percent");
    assert_eq!(
        disk.dimensions,
        DimensionSet::new()
            .with("InstanceId", "i-abc")
            .with("path", "/")
            .with("device", "xvda1")
            .with("fstype", "ext4")
    );
    assert_eq!(disk.threshold, 79.0);
}

// ---------------------------------------------------------------------------
// Test: discovery finds nothing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_disk_catalog_skips_disk_alarms() {
    let backend = MemoryBackend::new();

    let report = provision(&config(), &backend).await.unwrap();

    assert_eq!(backend.put_calls(), 6);
    assert_eq!(report.disk, DiskDiscovery::NotFound);
    assert!(report.disk_alarms.is_empty());
    assert_eq!(report.cpu_alarms.len(), 3);
    assert_eq!(report.memory_alarms.len(), 3);
}

#[tokio::test]
async fn non_root_or_foreign_disks_are_not_found() {
    let backend = MemoryBackend::new().with_metrics(vec![
        disk_metric("i-other", "/", "xvda1", "xfs"),
        disk_metric("i-abc", "/data", "xvdb", "ext4"),
    ]);

    let report = provision(&config(), &backend).await.unwrap();

    assert_eq!(report.disk, DiskDiscovery::NotFound);
    assert_eq!(backend.put_calls(), 6);
}

// ---------------------------------------------------------------------------
// Test: idempotence
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rerun_overwrites_without_duplicates() {
    let backend =
        MemoryBackend::new().with_metrics(vec![disk_metric("i-abc", "/", "xvda1", "xfs")]);

    let first = provision(&config(), &backend).await.unwrap();
    let second = provision(&config(), &backend).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(backend.put_calls(), 18);

    let mut names = backend.alarm_names().await;
    assert_eq!(names.len(), 9);
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 9);
}

// ---------------------------------------------------------------------------
// Test: fail-fast
// ---------------------------------------------------------------------------

#[tokio::test]
async fn backend_error_aborts_remaining_sequence() {
    let backend = MemoryBackend::new()
        .with_metrics(vec![disk_metric("i-abc", "/", "xvda1", "xfs")])
        .fail_put_for("Critical_ACME_Memory_Reaches_90%_Name_(i-abc)");

    let result = provision(&config(), &backend).await;

    assert_matches!(result, Err(ProvisionError::Backend(_)));
    // Three CPU alarms plus the failed memory call; discovery never ran.
    assert_eq!(backend.put_calls(), 4);
    assert_eq!(backend.list_calls(), 0);
    assert_eq!(backend.alarm_names().await.len(), 3);
}

#[tokio::test]
async fn listing_error_aborts_before_disk_alarms() {
    let backend = MemoryBackend::new().fail_list();

    let result = provision(&config(), &backend).await;

    assert_matches!(result, Err(ProvisionError::Backend(_)));
    assert_eq!(backend.put_calls(), 6);
    assert_eq!(backend.alarm_names().await.len(), 6);
}

#[tokio::test]
async fn root_disk_without_fstype_is_rejected() {
    let backend = MemoryBackend::new().with_metrics(vec![MetricDescriptor {
        namespace: "CWAgent".into(),
        metric_name: "disk_used_percent".into(),
        dimensions: DimensionSet::new()
            .with("InstanceId", "i-abc")
            .with("path", "/")
            .with("device", "xvda1"),
    }]);

    let result = provision(&config(), &backend).await;

    assert_matches!(result, Err(ProvisionError::Validation(_)));
    assert_eq!(backend.put_calls(), 6);
}

// ---------------------------------------------------------------------------
// Test: custom tiers and no notification target
// ---------------------------------------------------------------------------

#[tokio::test]
async fn one_call_per_configured_tier() {
    let mut config = config();
    config.tiers = alarmctl_core::alert::parse_tiers("95:Critical,85.5:Warning").unwrap();
    config.notification_target = None;
    let backend =
        MemoryBackend::new().with_metrics(vec![disk_metric("i-abc", "/", "xvda1", "xfs")]);

    let report = provision(&config, &backend).await.unwrap();

    assert_eq!(backend.put_calls(), 6);
    assert_eq!(
        report.memory_alarms,
        vec![
            "Critical_ACME_Memory_Reaches_95%_Name_(i-abc)",
            "Warning_ACME_Memory_Reaches_85.5%_Name_(i-abc)",
        ]
    );
    for alarm in backend.alarms().await {
        assert!(alarm.alarm_actions.is_empty());
    }
}
