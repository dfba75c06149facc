//! Prometheus metrics implementation.
//!
//! Delegates to the sibling `counters.rs` and `recorder.rs` helpers, which
//! talk to the global `metrics` crate registry. A single global
//! `PrometheusHandle` renders everything that has been recorded.

use crate::domain::Metrics;
use std::time::Instant;

/// Prometheus-based metrics implementation.
///
/// Holds no state of its own: metrics are registered on first use through the
/// `counter!()` and `histogram!()` macros, and rendering goes through the
/// handle stored in `recorder.rs`.
pub struct PrometheusMetrics {
    // Empty - uses global metrics registry pattern
}

impl PrometheusMetrics {
    pub fn new() -> Self {
        tracing::info!("Creating Prometheus metrics");
        PrometheusMetrics {}
    }
}

impl Metrics for PrometheusMetrics {
    fn render(&self) -> String {
        super::render_metrics()
    }

    fn record_visit(&self) {
        tracing::debug!("Recording visitor count increment");
        super::increment_visits();
    }

    fn record_invocation(&self, start: Instant, method: &str, path: &str, status: u16) {
        tracing::debug!("Recording invocation {} {} -> {}", method, path, status);
        super::track_invocation(start, status);
    }
}
