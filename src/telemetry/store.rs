//! Thread-safe value store exposed as a statistics provider.
//!
//! Components that only need to bump a counter or set a gauge write into a
//! shared [`MetricsStore`]; the store reports everything it holds as status
//! variables when the registry collects.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::status::{BoxError, ScopeFlag, Statistics, VarValue};

/// Snapshot of all stored values at a point in time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub counters: HashMap<String, u64>,
    pub gauges: HashMap<String, f64>,
    pub histograms: HashMap<String, HistogramSummary>,
}

/// Summary statistics for a histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramSummary {
    pub count: u64,
    pub sum: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for HistogramSummary {
    fn default() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            min: 0.0,
            max: 0.0,
        }
    }
}

impl HistogramSummary {
    fn record(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.count += 1;
        self.sum += value;
    }
}

/// Counters, gauges and histograms keyed by status variable name.
///
/// Every name reports with [`ScopeFlag::DEFAULT`] unless given another scope
/// through [`set_scope`](Self::set_scope).
pub struct MetricsStore {
    name: String,
    counters: RwLock<HashMap<String, AtomicU64>>,
    /// f64 bits stored as u64
    gauges: RwLock<HashMap<String, AtomicU64>>,
    histograms: Mutex<HashMap<String, HistogramSummary>>,
    scopes: RwLock<HashMap<String, ScopeFlag>>,
}

impl MetricsStore {
    pub fn new() -> Self {
        Self::named("metrics_store")
    }

    /// Create a store whose provider name is `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            counters: RwLock::new(HashMap::new()),
            gauges: RwLock::new(HashMap::new()),
            histograms: Mutex::new(HashMap::new()),
            scopes: RwLock::new(HashMap::new()),
        }
    }

    /// Increment a counter by the given value, creating it at zero if absent.
    pub fn increment_counter(&self, name: &str, value: u64) {
        if let Some(counter) = self.counters.read().get(name) {
            counter.fetch_add(value, Ordering::Relaxed);
            return;
        }

        self.counters
            .write()
            .entry(name.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(value, Ordering::Relaxed);
    }

    /// Set a gauge to the given value.
    pub fn set_gauge(&self, name: &str, value: f64) {
        if let Some(gauge) = self.gauges.read().get(name) {
            gauge.store(value.to_bits(), Ordering::Relaxed);
            return;
        }

        self.gauges
            .write()
            .entry(name.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .store(value.to_bits(), Ordering::Relaxed);
    }

    /// Record a histogram observation.
    pub fn record_histogram(&self, name: &str, value: f64) {
        self.histograms
            .lock()
            .entry(name.to_string())
            .or_default()
            .record(value);
    }

    /// Override the scope reported for `name`.
    pub fn set_scope(&self, name: &str, scope: ScopeFlag) {
        self.scopes.write().insert(name.to_string(), scope);
    }

    /// Take a snapshot of all values.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            counters: self
                .counters
                .read()
                .iter()
                .map(|(k, v)| (k.clone(), v.load(Ordering::Relaxed)))
                .collect(),
            gauges: self
                .gauges
                .read()
                .iter()
                .map(|(k, v)| (k.clone(), f64::from_bits(v.load(Ordering::Relaxed))))
                .collect(),
            histograms: self.histograms.lock().clone(),
        }
    }
}

impl Default for MetricsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Statistics for MetricsStore {
    fn provider_name(&self) -> &str {
        &self.name
    }

    fn scope(&self, name: &str) -> ScopeFlag {
        self.scopes
            .read()
            .get(name)
            .copied()
            .unwrap_or(ScopeFlag::DEFAULT)
    }

    fn stats(&self) -> Result<HashMap<String, VarValue>, BoxError> {
        let snapshot = self.snapshot();
        let mut vars = HashMap::with_capacity(
            snapshot.counters.len() + snapshot.gauges.len() + snapshot.histograms.len(),
        );
        vars.extend(snapshot.counters.into_iter().map(|(k, v)| (k, VarValue::UInt(v))));
        vars.extend(snapshot.gauges.into_iter().map(|(k, v)| (k, VarValue::Float(v))));
        for (name, summary) in snapshot.histograms {
            vars.insert(name, VarValue::Structured(serde_json::to_value(summary)?));
        }
        Ok(vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_accumulates() {
        let store = MetricsStore::new();
        store.increment_counter("Questions", 1);
        store.increment_counter("Questions", 4);
        assert_eq!(store.snapshot().counters["Questions"], 5);
    }

    #[test]
    fn test_gauge_overwrites() {
        let store = MetricsStore::new();
        store.set_gauge("Threads_running", 3.0);
        store.set_gauge("Threads_running", 1.0);
        assert_eq!(store.snapshot().gauges["Threads_running"], 1.0);
    }

    #[test]
    fn test_histogram_summary() {
        let store = MetricsStore::new();
        for v in [4.0, 1.0, 7.0] {
            store.record_histogram("Query_time_ms", v);
        }
        let summary = store.snapshot().histograms["Query_time_ms"];
        assert_eq!(summary.count, 3);
        assert_eq!(summary.sum, 12.0);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 7.0);
    }

    #[test]
    fn test_stats_reports_typed_values() {
        let store = MetricsStore::new();
        store.increment_counter("Connections", 2);
        store.set_gauge("Load", 0.5);
        store.record_histogram("Latency", 10.0);

        let vars = store.stats().unwrap();
        assert_eq!(vars["Connections"], VarValue::UInt(2));
        assert_eq!(vars["Load"], VarValue::Float(0.5));
        assert_eq!(
            vars["Latency"],
            VarValue::Structured(serde_json::json!({
                "count": 1, "sum": 10.0, "min": 10.0, "max": 10.0
            }))
        );
    }

    #[test]
    fn test_scope_override() {
        let store = MetricsStore::named("server");
        store.set_scope("Uptime", ScopeFlag::GLOBAL);
        assert_eq!(store.scope("Uptime"), ScopeFlag::GLOBAL);
        assert_eq!(store.scope("Other"), ScopeFlag::DEFAULT);
        assert_eq!(store.provider_name(), "server");
    }
}
