//! Disk Dimension Resolver.
//!
//! The CloudWatch agent tags `disk_used_percent` with `device` and `fstype`
//! values that are only known on the instance. An alarm must repeat them
//! exactly, so they are read back from the metric catalog.

use alarmctl_cloud::{BackendError, MonitoringBackend};
use alarmctl_core::metric_names::{
    dimensions::{INSTANCE_ID, PATH},
    METRIC_DISK_USED_PERCENT, NAMESPACE_CW_AGENT, ROOT_PATH,
};
use alarmctl_core::{DimensionSet, MetricDescriptor};

/// Find the full dimension set of the root filesystem's disk metric for
/// `instance_id`, or `None` if the agent never reported one.
///
/// Pages are requested in order until a match turns up or the listing is
/// exhausted. Within the listing the first match wins; duplicate root
/// entries (e.g. after an agent restart with a new device name) resolve to
/// whichever CloudWatch lists first.
pub async fn find_root_disk_dimensions(
    backend: &dyn MonitoringBackend,
    instance_id: &str,
) -> Result<Option<DimensionSet>, BackendError> {
    let mut next_token: Option<String> = None;
    let mut pages = 0usize;
    let mut scanned = 0usize;

    loop {
        let page = backend
            .list_metrics(
                NAMESPACE_CW_AGENT,
                METRIC_DISK_USED_PERCENT,
                next_token.as_deref(),
            )
            .await?;
        pages += 1;
        scanned += page.metrics.len();

        if let Some(dimensions) = find_root_disk(&page.metrics, instance_id) {
            tracing::debug!(pages, scanned, "Root disk metric found");
            return Ok(Some(dimensions.clone()));
        }

        match page.next_token {
            Some(token) => next_token = Some(token),
            None => {
                tracing::debug!(pages, scanned, "Disk metric listing exhausted");
                return Ok(None);
            }
        }
    }
}

/// Linear scan for the first descriptor on `instance_id` mounted at `/`.
pub fn find_root_disk<'m>(
    metrics: &'m [MetricDescriptor],
    instance_id: &str,
) -> Option<&'m DimensionSet> {
    metrics
        .iter()
        .map(|m| &m.dimensions)
        .find(|dims| {
            dims.get(INSTANCE_ID) == Some(instance_id) && dims.get(PATH) == Some(ROOT_PATH)
        })
}
