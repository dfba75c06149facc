use metrics::{counter, histogram};
use std::time::Instant;

/// Increment a counter for successful visitor count updates.
pub fn increment_visits() {
    counter!("visitor_count_increments_total").increment(1);
}

/// Count an invocation by its response status and track its latency.
pub fn track_invocation(start: Instant, status: u16) {
    counter!("visitor_invocations_total", "status" => status.to_string()).increment(1);
    histogram!("visitor_invocation_duration_seconds").record(start.elapsed());
}
