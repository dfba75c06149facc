use crate::domain::Metrics;
use std::time::Instant;

/// No-op metrics implementation for local runs and tests.
#[derive(Default)]
pub struct NoopMetrics;

impl NoopMetrics {
    pub fn new() -> Self {
        NoopMetrics
    }
}

impl Metrics for NoopMetrics {
    // ---
    fn render(&self) -> String {
        String::new()
    }
    fn record_visit(&self) {}
    fn record_invocation(&self, _: Instant, _: &str, _: &str, _: u16) {}
}
