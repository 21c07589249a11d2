//! AWS CloudWatch implementation of [`MonitoringBackend`].
//!
//! Credentials come from the SDK's default provider chain. The region is
//! taken from the caller when given, otherwise from the same chain.

use std::fmt::Debug;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_cloudwatch::config::Region;
use aws_sdk_cloudwatch::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_cloudwatch::operation::list_metrics::ListMetricsOutput;
use aws_sdk_cloudwatch::types::{self as cw, Dimension};
use aws_sdk_cloudwatch::Client;

use alarmctl_core::{
    AlarmDefinition, ComparisonOperator, DimensionSet, MetricDescriptor, Statistic,
};

use crate::backend::{MetricPage, MonitoringBackend};
use crate::error::BackendError;

const OP_PUT_METRIC_ALARM: &str = "PutMetricAlarm";
const OP_LIST_METRICS: &str = "ListMetrics";

/// CloudWatch client wrapper. Build once and share by reference.
#[derive(Debug, Clone)]
pub struct CloudWatchBackend {
    client: Client,
}

impl CloudWatchBackend {
    /// Load shared AWS config and build a client.
    ///
    /// * `region` - explicit region override; `None` defers to
    ///   `AWS_REGION`, the profile, or IMDS.
    pub async fn from_env(region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }
        let sdk_config = loader.load().await;

        tracing::debug!(
            region = ?sdk_config.region(),
            "CloudWatch client configured",
        );

        Self::new(Client::new(&sdk_config))
    }

    /// Wrap an existing client (custom endpoint, test config, ...).
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MonitoringBackend for CloudWatchBackend {
    async fn put_metric_alarm(&self, alarm: &AlarmDefinition) -> Result<(), BackendError> {
        let mut request = self
            .client
            .put_metric_alarm()
            .alarm_name(&alarm.alarm_name)
            .metric_name(&alarm.metric_name)
            .namespace(&alarm.namespace)
            .statistic(to_sdk_statistic(alarm.statistic))
            .period(alarm.period_secs)
            .evaluation_periods(alarm.evaluation_periods)
            .threshold(alarm.threshold)
            .comparison_operator(to_sdk_comparison(alarm.comparison_operator))
            .set_dimensions(Some(to_sdk_dimensions(&alarm.dimensions)));

        for action in &alarm.alarm_actions {
            request = request.alarm_actions(action);
        }

        request
            .send()
            .await
            .map_err(|e| from_sdk_error(OP_PUT_METRIC_ALARM, e))?;

        Ok(())
    }

    async fn list_metrics(
        &self,
        namespace: &str,
        metric_name: &str,
        next_token: Option<&str>,
    ) -> Result<MetricPage, BackendError> {
        let output = self
            .client
            .list_metrics()
            .namespace(namespace)
            .metric_name(metric_name)
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(|e| from_sdk_error(OP_LIST_METRICS, e))?;

        Ok(page_from_output(&output, namespace, metric_name))
    }
}

/// Map one `ListMetrics` response onto a [`MetricPage`].
///
/// Descriptors without a namespace or metric name inherit the ones the
/// listing was filtered on.
fn page_from_output(
    output: &ListMetricsOutput,
    namespace: &str,
    metric_name: &str,
) -> MetricPage {
    let metrics = output
        .metrics()
        .iter()
        .map(|metric| MetricDescriptor {
            namespace: metric.namespace().unwrap_or(namespace).to_string(),
            metric_name: metric.metric_name().unwrap_or(metric_name).to_string(),
            dimensions: from_sdk_dimensions(metric.dimensions()),
        })
        .collect();

    MetricPage {
        metrics,
        next_token: output.next_token().map(str::to_string),
    }
}

fn to_sdk_statistic(statistic: Statistic) -> cw::Statistic {
    cw::Statistic::from(statistic.as_str())
}

fn to_sdk_comparison(op: ComparisonOperator) -> cw::ComparisonOperator {
    cw::ComparisonOperator::from(op.as_str())
}

fn to_sdk_dimensions(dimensions: &DimensionSet) -> Vec<Dimension> {
    dimensions
        .iter()
        .map(|d| Dimension::builder().name(&d.name).value(&d.value).build())
        .collect()
}

/// Dimensions missing a name or value are dropped.
fn from_sdk_dimensions(dimensions: &[Dimension]) -> DimensionSet {
    dimensions
        .iter()
        .filter_map(|d| Some((d.name()?, d.value()?)))
        .collect()
}

fn from_sdk_error<E, R>(operation: &'static str, err: SdkError<E, R>) -> BackendError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: Debug,
{
    match err.code() {
        Some(code) => BackendError::Service {
            operation,
            code: code.to_string(),
            message: err.message().unwrap_or("no message").to_string(),
        },
        None => BackendError::Request {
            operation,
            message: DisplayErrorContext(&err).to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_cloudwatch::error::ErrorMetadata;
    use aws_sdk_cloudwatch::operation::put_metric_alarm::PutMetricAlarmError;
    use aws_sdk_cloudwatch::types::Metric;

    use super::*;

    fn disk_metric(device: &str) -> Metric {
        Metric::builder()
            .namespace("CWAgent")
            .metric_name("disk_used_percent")
            .dimensions(Dimension::builder().name("InstanceId").value("i-abc").build())
            .dimensions(Dimension::builder().name("path").value("/").build())
            .dimensions(Dimension::builder().name("device").value(device).build())
            .build()
    }

    #[test]
    fn page_carries_continuation_token() {
        let output = ListMetricsOutput::builder()
            .metrics(disk_metric("xvda1"))
            .metrics(disk_metric("xvdb"))
            .next_token("page-2")
            .build();

        let page = page_from_output(&output, "CWAgent", "disk_used_percent");

        assert_eq!(page.next_token.as_deref(), Some("page-2"));
        assert_eq!(page.metrics.len(), 2);
        assert_eq!(page.metrics[0].dimensions.get("device"), Some("xvda1"));
        assert_eq!(page.metrics[1].dimensions.get("path"), Some("/"));
    }

    #[test]
    fn last_page_has_no_token() {
        let output = ListMetricsOutput::builder().build();

        let page = page_from_output(&output, "CWAgent", "disk_used_percent");

        assert_eq!(page, MetricPage::default());
    }

    #[test]
    fn missing_namespace_and_name_fall_back_to_filter() {
        let output = ListMetricsOutput::builder()
            .metrics(
                Metric::builder()
                    .dimensions(Dimension::builder().name("InstanceId").value("i-abc").build())
                    .build(),
            )
            .build();

        let page = page_from_output(&output, "CWAgent", "disk_used_percent");

        assert_eq!(page.metrics[0].namespace, "CWAgent");
        assert_eq!(page.metrics[0].metric_name, "disk_used_percent");
    }

    #[test]
    fn service_error_keeps_code_and_message() {
        let source = PutMetricAlarmError::generic(
            ErrorMetadata::builder()
                .code("ResourceNotFound")
                .message("topic does not exist")
                .build(),
        );
        let err = from_sdk_error(OP_PUT_METRIC_ALARM, SdkError::service_error(source, ()));

        assert_eq!(err.code(), Some("ResourceNotFound"));
        assert_eq!(err.operation(), "PutMetricAlarm");
        assert_eq!(
            err.to_string(),
            "PutMetricAlarm rejected (ResourceNotFound): topic does not exist"
        );
    }

    #[test]
    fn error_without_code_is_a_request_failure() {
        let err = from_sdk_error(
            OP_LIST_METRICS,
            SdkError::<PutMetricAlarmError, ()>::construction_failure("no region configured"),
        );

        assert_eq!(err.code(), None);
        assert!(err.to_string().starts_with("ListMetrics request failed"));
    }

    #[test]
    fn dimensions_are_converted_in_order() {
        let set = DimensionSet::new()
            .with("InstanceId", "i-abc")
            .with("path", "/")
            .with("device", "xvda1")
            .with("fstype", "xfs");

        let sdk = to_sdk_dimensions(&set);
        let pairs: Vec<_> = sdk
            .iter()
            .filter_map(|d| Some((d.name()?, d.value()?)))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("InstanceId", "i-abc"),
                ("path", "/"),
                ("device", "xvda1"),
                ("fstype", "xfs"),
            ]
        );
    }

    #[test]
    fn sdk_dimensions_without_value_are_dropped() {
        let sdk = vec![
            Dimension::builder().name("InstanceId").value("i-abc").build(),
            Dimension::builder().name("device").build(),
        ];
        let set = from_sdk_dimensions(&sdk);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("InstanceId"), Some("i-abc"));
    }

    #[test]
    fn policy_enums_map_to_sdk() {
        assert_eq!(
            to_sdk_statistic(Statistic::Average),
            cw::Statistic::Average
        );
        assert_eq!(
            to_sdk_comparison(ComparisonOperator::GreaterThanOrEqualToThreshold),
            cw::ComparisonOperator::GreaterThanOrEqualToThreshold
        );
    }
}
