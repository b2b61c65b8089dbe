//! Metrics collection and exposition.
//!
//! # Metrics
//! - `api_foo_requests_total` (counter): requests matched to the primary
//!   endpoint since process start
//!
//! # Design Decisions
//! - Counters are atomics owned by the Prometheus recorder; increments take no
//!   lock
//! - The counter handle is registered against the registry's own recorder, so
//!   it works whether or not the recorder is installed globally

use metrics::Counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle, PrometheusRecorder};

use crate::config::MetricsConfig;
use crate::observability::TelemetryError;

/// Content type of the Prometheus text exposition format.
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Prometheus registry backing the scrape endpoint.
pub struct MetricsRegistry {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        Self { recorder, handle }
    }

    /// Register (or look up) the primary endpoint request counter.
    pub fn register_request_counter(&self, config: &MetricsConfig) -> RequestCounter {
        let name = config.request_counter.clone();
        let help = config.request_counter_help.clone();
        metrics::with_local_recorder(&self.recorder, move || {
            metrics::describe_counter!(name.clone(), help);
            RequestCounter {
                inner: metrics::counter!(name),
            }
        })
    }

    /// Handle used by the metrics listener to render the registry.
    pub fn handle(&self) -> PrometheusHandle {
        self.handle.clone()
    }

    /// Install this registry as the process-wide recorder.
    ///
    /// Counters registered beforehand keep working; later `metrics::counter!`
    /// calls anywhere in the process land in the same registry.
    pub fn install(self) -> Result<PrometheusHandle, TelemetryError> {
        let handle = self.handle;
        metrics::set_global_recorder(self.recorder).map_err(|_| TelemetryError::RecorderInstall)?;
        tracing::debug!("Prometheus recorder installed");
        Ok(handle)
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Monotonic count of requests served by the primary endpoint.
#[derive(Clone)]
pub struct RequestCounter {
    inner: Counter,
}

impl RequestCounter {
    pub fn increment(&self) {
        self.inner.increment(1);
    }
}
