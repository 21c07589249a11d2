//! Provisioning configuration loaded from environment variables.

use alarmctl_core::alert::{parse_tiers, DEFAULT_TIERS};
use alarmctl_core::{CoreError, InstanceTarget, ThresholdTier};

/// Everything a provisioning run needs besides the backend client.
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    /// Instance the alarms watch, plus the labels used in alarm names.
    pub target: InstanceTarget,
    /// SNS topic ARN attached as the alarm action, if any.
    pub notification_target: Option<String>,
    /// Explicit AWS region. `None` defers to the SDK default chain.
    pub region: Option<String>,
    /// Applied to every metric category, in order.
    pub tiers: Vec<ThresholdTier>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{var} is invalid: {source}")]
    Invalid {
        var: &'static str,
        #[source]
        source: CoreError,
    },
}

impl ProvisionConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var         | Required | Default                            |
    /// |-----------------|----------|------------------------------------|
    /// | `INSTANCE_ID`   | yes      | --                                 |
    /// | `INSTANCE_NAME` | yes      | --                                 |
    /// | `ACCOUNT_NAME`  | yes      | --                                 |
    /// | `SNS_TOPIC_ARN` | no       | no alarm actions                   |
    /// | `AWS_REGION`    | no       | SDK default chain                  |
    /// | `ALARM_TIERS`   | no       | `90:Critical,80:Warning,79:Normal` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads through `lookup`.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let target = InstanceTarget {
            instance_id: require("INSTANCE_ID")?,
            instance_name: require("INSTANCE_NAME")?,
            account_name: require("ACCOUNT_NAME")?,
        };

        let tiers = match get("ALARM_TIERS") {
            Some(raw) => parse_tiers(&raw).map_err(|source| ConfigError::Invalid {
                var: "ALARM_TIERS",
                source,
            })?,
            None => DEFAULT_TIERS.to_vec(),
        };

        Ok(Self {
            target,
            notification_target: get("SNS_TOPIC_ARN"),
            region: get("AWS_REGION"),
            tiers,
        })
    }
}
