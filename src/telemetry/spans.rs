//! Span utilities for collection passes.

use tracing::{info_span, Span};

/// Extension trait for adding context to spans.
pub trait SpanExt {
    /// Record the result of an operation into the span.
    fn record_result<T, E>(&self, result: &Result<T, E>)
    where
        E: std::fmt::Display;
}

impl SpanExt for Span {
    fn record_result<T, E>(&self, result: &Result<T, E>)
    where
        E: std::fmt::Display,
    {
        match result {
            Ok(_) => {
                self.record("status", "ok");
            }
            Err(e) => {
                self.record("status", "error");
                self.record("error.message", e.to_string().as_str());
            }
        }
    }
}

/// Factory for collection pass spans.
pub struct CollectSpan;

impl CollectSpan {
    /// Fields:
    /// - `pass`: sequence number of the pass within its registry
    /// - `status`, `error.message`: filled by `SpanExt::record_result`
    /// - `latency_ms`, `vars`: filled when the pass completes
    pub fn new(pass: u64) -> Span {
        info_span!(
            "status_collect",
            pass,
            status = tracing::field::Empty,
            error.message = tracing::field::Empty,
            latency_ms = tracing::field::Empty,
            vars = tracing::field::Empty,
        )
    }
}
