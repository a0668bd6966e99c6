use metrics::histogram;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use std::time::Instant;

pub mod http;
pub mod notifications;

pub static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder and register the metrics for the application
pub fn register_metrics() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    METRICS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("Metrics handle already set"))?;

    http::register_metrics();
    notifications::register_metrics();

    Ok(())
}

/// Records its lifetime into a histogram when dropped
pub struct Timer {
    metric_name: &'static str,
    start_time: Instant,
    labels: Vec<(String, String)>,
}

impl Timer {
    /// Create a new timer
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            metric_name,
            start_time: Instant::now(),
            labels: Vec::new(),
        }
    }

    /// Add a label to the timer
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.push((key.into(), value.into()));
        self
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let duration = self.start_time.elapsed().as_secs_f64();

        if self.labels.is_empty() {
            histogram!(self.metric_name).record(duration);
        } else {
            let labels: Vec<_> = self
                .labels
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();

            histogram!(self.metric_name, &labels).record(duration);
        }
    }
}
