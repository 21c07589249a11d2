//! In-process [`MonitoringBackend`] test double.
//!
//! Alarms are upserted by name exactly like CloudWatch does, the metric
//! catalog is served in fixed-size pages, and every call is counted so
//! tests can assert on the number of remote round-trips. Failure injection
//! (`fail_put_for`, `fail_list`) is only compiled for this crate's tests
//! or with the `test-util` feature.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use alarmctl_core::{AlarmDefinition, MetricDescriptor};

use crate::backend::{MetricPage, MonitoringBackend};
use crate::error::BackendError;

/// Default number of descriptors per listing page (CloudWatch uses 500).
const DEFAULT_PAGE_SIZE: usize = 500;

pub struct MemoryBackend {
    alarms: Mutex<Vec<AlarmDefinition>>,
    catalog: Vec<MetricDescriptor>,
    page_size: usize,
    put_calls: AtomicUsize,
    list_calls: AtomicUsize,
    fail_put_for: Option<String>,
    fail_list: bool,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            alarms: Mutex::new(Vec::new()),
            catalog: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            put_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
            fail_put_for: None,
            fail_list: false,
        }
    }

    /// Seed the metric catalog. Listing order is the order given here.
    pub fn with_metrics(mut self, metrics: Vec<MetricDescriptor>) -> Self {
        self.catalog = metrics;
        self
    }

    /// Serve the catalog `page_size` descriptors at a time (minimum 1).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Reject the upsert of the alarm with this exact name.
    #[cfg(any(test, feature = "test-util"))]
    pub fn fail_put_for(mut self, alarm_name: impl Into<String>) -> Self {
        self.fail_put_for = Some(alarm_name.into());
        self
    }

    /// Reject every listing call.
    #[cfg(any(test, feature = "test-util"))]
    pub fn fail_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    /// Number of `put_metric_alarm` calls, failed ones included.
    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::Relaxed)
    }

    /// Number of `list_metrics` calls (one per page), failed ones included.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::Relaxed)
    }

    /// Current alarm records, in first-creation order.
    pub async fn alarms(&self) -> Vec<AlarmDefinition> {
        self.alarms.lock().await.clone()
    }

    pub async fn alarm_names(&self) -> Vec<String> {
        self.alarms
            .lock()
            .await
            .iter()
            .map(|a| a.alarm_name.clone())
            .collect()
    }

    pub async fn alarm(&self, alarm_name: &str) -> Option<AlarmDefinition> {
        self.alarms
            .lock()
            .await
            .iter()
            .find(|a| a.alarm_name == alarm_name)
            .cloned()
    }
}

#[async_trait]
impl MonitoringBackend for MemoryBackend {
    async fn put_metric_alarm(&self, alarm: &AlarmDefinition) -> Result<(), BackendError> {
        self.put_calls.fetch_add(1, Ordering::Relaxed);

        if self.fail_put_for.as_deref() == Some(alarm.alarm_name.as_str()) {
            return Err(BackendError::Service {
                operation: "PutMetricAlarm",
                code: "ValidationError".into(),
                message: format!("rejected alarm {}", alarm.alarm_name),
            });
        }

        let mut alarms = self.alarms.lock().await;
        match alarms.iter_mut().find(|a| a.alarm_name == alarm.alarm_name) {
            Some(existing) => *existing = alarm.clone(),
            None => alarms.push(alarm.clone()),
        }
        Ok(())
    }

    async fn list_metrics(
        &self,
        namespace: &str,
        metric_name: &str,
        next_token: Option<&str>,
    ) -> Result<MetricPage, BackendError> {
        self.list_calls.fetch_add(1, Ordering::Relaxed);

        if self.fail_list {
            return Err(BackendError::Request {
                operation: "ListMetrics",
                message: "connection refused".into(),
            });
        }

        let offset = match next_token {
            Some(token) => token.parse::<usize>().map_err(|_| BackendError::Service {
                operation: "ListMetrics",
                code: "InvalidNextToken".into(),
                message: format!("unknown continuation token '{token}'"),
            })?,
            None => 0,
        };

        let matching: Vec<&MetricDescriptor> = self
            .catalog
            .iter()
            .filter(|m| m.namespace == namespace && m.metric_name == metric_name)
            .collect();

        let end = (offset + self.page_size).min(matching.len());
        let metrics = matching
            .get(offset..end)
            .unwrap_or_default()
            .iter()
            .map(|m| (*m).clone())
            .collect();
        let next_token = (end < matching.len()).then(|| end.to_string());

        Ok(MetricPage {
            metrics,
            next_token,
        })
    }
}
