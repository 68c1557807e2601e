//! `metrics` facade hooks for collection passes.
//!
//! Nothing is exported unless the embedding process installs a recorder.

use std::time::Duration;

const COLLECT_TOTAL: &str = "gg_status_collect_total";
const COLLECT_DURATION_MS: &str = "gg_status_collect_duration_ms";
const COLLECT_VARS: &str = "gg_status_collect_vars";

/// Record a successful pass and the number of variables it produced.
pub fn record_collect_success(elapsed: Duration, vars: usize) {
    metrics::counter!(COLLECT_TOTAL, "outcome" => "ok").increment(1);
    metrics::histogram!(COLLECT_DURATION_MS).record(elapsed.as_secs_f64() * 1000.0);
    metrics::gauge!(COLLECT_VARS).set(vars as f64);
}

/// Record an aborted pass.
pub fn record_collect_failure(elapsed: Duration) {
    metrics::counter!(COLLECT_TOTAL, "outcome" => "error").increment(1);
    metrics::histogram!(COLLECT_DURATION_MS).record(elapsed.as_secs_f64() * 1000.0);
}
