//! Telemetry for the status registry.
//!
//! Structured logging, collection spans, metrics facade hooks, and a
//! value store that reports its contents as status variables.

mod logging;
mod metrics;
mod spans;
mod store;

pub use logging::{init_logging, LogConfig, LogError, LogFormat};
pub use metrics::{record_collect_failure, record_collect_success};
pub use spans::{CollectSpan, SpanExt};
pub use store::{HistogramSummary, MetricsSnapshot, MetricsStore};
