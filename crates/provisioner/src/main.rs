//! `alarmctl` -- provision CloudWatch threshold alarms for one EC2 instance.
//!
//! Creates Critical/Warning/Normal alarms for CPU, memory and root disk
//! usage and points them at an SNS topic. Disk alarms are only created if
//! the CloudWatch agent has already reported a root filesystem metric.
//!
//! # Environment variables
//!
//! | Variable        | Required | Default | Description                              |
//! |-----------------|----------|---------|------------------------------------------|
//! | `INSTANCE_ID`   | yes      | --      | EC2 instance id, e.g. `i-0123456789abcdef0` |
//! | `INSTANCE_NAME` | yes      | --      | Display name used in alarm names         |
//! | `ACCOUNT_NAME`  | yes      | --      | Account label used in alarm names        |
//! | `SNS_TOPIC_ARN` | no       | --      | Alarm action target                      |
//! | `AWS_REGION`    | no       | SDK     | Region override                          |
//! | `ALARM_TIERS`   | no       | `90:Critical,80:Warning,79:Normal` | Threshold tiers |
//! | `LOG_FORMAT`    | no       | `text`  | `json` for JSON log lines                |

use alarmctl_cloud::CloudWatchBackend;
use alarmctl_provisioner::{provision, ProvisionConfig, DEFAULT_LOG_FILTER};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    init_tracing();

    let config = ProvisionConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    tracing::info!(
        instance_id = %config.target.instance_id,
        instance_name = %config.target.instance_name,
        account = %config.target.account_name,
        tiers = config.tiers.len(),
        notify = config.notification_target.is_some(),
        "Starting alarmctl",
    );

    let backend = CloudWatchBackend::from_env(config.region.as_deref()).await;

    match provision(&config, &backend).await {
        Ok(report) => {
            if let Ok(json) = serde_json::to_string(&report) {
                tracing::debug!(report = %json, "Provisioning report");
            }
            tracing::info!(
                cpu = report.cpu_alarms.len(),
                memory = report.memory_alarms.len(),
                disk = report.disk_alarms.len(),
                "All alarms created successfully",
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Alarm provisioning aborted; rerun after fixing the cause");
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
