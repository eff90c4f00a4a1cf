//! # Metrics Collection Module
//!
//! Prometheus export for cascade and compose activity, served at `GET /metrics`.
//!
//! ## Metrics Tracked
//!
//! **Counters:**
//! - `herald_backend_attempts_total{backend, outcome}` - One per backend attempt
//! - `herald_compose_total{source}` - Compose results by source (generated/template)
//! - `herald_cascade_aborts_total` - Cascades stopped by a fatal failure
//!
//! **Histograms:**
//! - `herald_backend_latency_seconds{backend}` - Duration of a single attempt

pub mod handler;

pub use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use std::time::Instant;

/// Owns the Prometheus handle and the server start time.
pub struct MetricsCollector {
    start_time: Instant,
    prometheus_handle: PrometheusHandle,
}

impl MetricsCollector {
    pub fn new(start_time: Instant, prometheus_handle: PrometheusHandle) -> Self {
        Self {
            start_time,
            prometheus_handle,
        }
    }

    /// Seconds since the server started.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Render Prometheus metrics in text format.
    pub fn render_metrics(&self) -> String {
        self.prometheus_handle.render()
    }
}

/// Initialize the global Prometheus recorder.
///
/// Latency buckets span a fast cached reply up to a slow model timing out.
pub fn setup_metrics() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    use metrics_exporter_prometheus::Matcher;

    let latency_buckets = &[0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("herald_backend_latency_seconds".to_string()),
            latency_buckets,
        )?
        .install_recorder()?;

    Ok(handle)
}

/// Install the global recorder, or fall back to a detached handle when one
/// is already installed (tests build many app states in one process).
pub fn setup_metrics_or_detached() -> PrometheusHandle {
    setup_metrics().unwrap_or_else(|e| {
        tracing::debug!("Metrics already initialized, creating new handle: {}", e);
        PrometheusBuilder::new().build_recorder().handle()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_uptime_starts_near_zero() {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let collector = MetricsCollector::new(Instant::now(), handle);
        assert!(collector.uptime_seconds() < 1);
    }

    #[test]
    fn test_detached_handle_renders() {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let collector = MetricsCollector::new(Instant::now(), handle);
        // Nothing recorded on a detached recorder
        assert!(!collector.render_metrics().contains("herald_compose_total"));
    }
}
