//! Registry of statistics providers and the cached status snapshot.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};

use super::defaults::{DefaultStatusSource, NoDefaultStatus};
use super::error::CollectionError;
use super::provider::Statistics;
use super::value::StatusValue;
use crate::telemetry::{self, CollectSpan, SpanExt};

/// Status variables keyed by name.
pub type StatusVars = HashMap<String, StatusValue>;

/// Registry configuration.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Providers slower than this are logged at warn level.
    pub slow_provider_threshold: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            slow_provider_threshold: Duration::from_secs(1),
        }
    }
}

/// Append-only list of statistics providers plus the snapshot of the last
/// successful collection pass.
///
/// The registry is an ordinary value: build one at startup, register the
/// providers, then share it (usually behind an `Arc`) with whatever serves
/// status queries.
pub struct StatisticsRegistry {
    providers: RwLock<Vec<Arc<dyn Statistics>>>,
    default_source: Arc<dyn DefaultStatusSource>,
    /// Lower-cased name -> provider value. `None` until the first pass succeeds.
    cache: RwLock<Option<Arc<StatusVars>>>,
    collect_lock: Mutex<()>,
    passes: AtomicU64,
    config: RegistryConfig,
}

impl StatisticsRegistry {
    /// Create an empty registry with no default status source.
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_default_source(config, Arc::new(NoDefaultStatus))
    }

    pub fn with_default_source(
        config: RegistryConfig,
        default_source: Arc<dyn DefaultStatusSource>,
    ) -> Self {
        Self {
            providers: RwLock::new(Vec::new()),
            default_source,
            cache: RwLock::new(None),
            collect_lock: Mutex::new(()),
            passes: AtomicU64::new(0),
            config,
        }
    }

    /// Append a provider.
    ///
    /// Registering the same provider twice is allowed; its values are then
    /// produced twice per pass.
    pub fn register(&self, provider: Arc<dyn Statistics>) {
        let name = provider.provider_name().to_string();
        let mut providers = self.providers.write();
        providers.push(provider);
        tracing::debug!(provider = %name, position = providers.len(), "registered statistics provider");
    }

    pub fn provider_count(&self) -> usize {
        self.providers.read().len()
    }

    /// Provider names in registration order.
    pub fn provider_names(&self) -> Vec<String> {
        self.providers
            .read()
            .iter()
            .map(|p| p.provider_name().to_string())
            .collect()
    }

    /// Collect every provider's variables into one map.
    ///
    /// Providers are merged in registration order, so a later provider
    /// overrides an earlier one reporting the same name. Every name known
    /// to the default status source is then reserved with an empty
    /// placeholder, replacing any provider value for that name.
    ///
    /// The first failing source aborts the pass. The cached snapshot used by
    /// [`lookup`](Self::lookup) is only replaced when the pass succeeds.
    pub fn collect(&self) -> Result<StatusVars, CollectionError> {
        let _serial = self.collect_lock.lock();
        let pass = self.passes.fetch_add(1, Ordering::Relaxed) + 1;

        let span = CollectSpan::new(pass);
        let _enter = span.enter();
        let started = Instant::now();

        let result = self.run_pass();
        let elapsed = started.elapsed();
        span.record("latency_ms", elapsed.as_millis() as u64);
        span.record_result(&result);

        match result {
            Ok((cache, vars)) => {
                span.record("vars", vars.len() as u64);
                telemetry::record_collect_success(elapsed, vars.len());
                *self.cache.write() = Some(Arc::new(cache));
                Ok(vars)
            }
            Err(e) => {
                telemetry::record_collect_failure(elapsed);
                tracing::warn!(pass, error = %e, "status collection aborted");
                Err(e)
            }
        }
    }

    /// Returns `(cache, result)`. The cache holds provider values only.
    fn run_pass(&self) -> Result<(StatusVars, StatusVars), CollectionError> {
        let providers = self.providers.read().clone();
        let mut cache = StatusVars::new();
        let mut vars = StatusVars::new();

        for provider in &providers {
            let started = Instant::now();
            let values = provider
                .stats()
                .map_err(|source| CollectionError::Provider {
                    provider: provider.provider_name().to_string(),
                    source,
                })?;
            self.check_latency(provider.as_ref(), started.elapsed());

            // Sorted so names differing only in case resolve the same way
            // every pass: the byte-wise last spelling owns the cache entry.
            let values: BTreeMap<String, _> = values.into_iter().collect();
            for (name, value) in values {
                let status = StatusValue {
                    scope: provider.scope(&name),
                    value,
                };
                cache.insert(name.to_lowercase(), status.clone());
                vars.insert(name, status);
            }
        }

        let defaults = self
            .default_source
            .default_status_vars()
            .map_err(|source| CollectionError::DefaultSource { source })?;
        for name in defaults.into_keys() {
            // Callers read the real value from the status table.
            vars.insert(name, StatusValue::placeholder());
        }

        Ok((cache, vars))
    }

    fn check_latency(&self, provider: &dyn Statistics, elapsed: Duration) {
        if elapsed >= self.config.slow_provider_threshold {
            tracing::warn!(
                provider = %provider.provider_name(),
                elapsed_ms = elapsed.as_millis() as u64,
                threshold_ms = self.config.slow_provider_threshold.as_millis() as u64,
                "slow statistics provider"
            );
        }
    }

    /// Look up a variable in the last successful pass, ignoring case.
    ///
    /// Returns `None` when the name is unknown or nothing has been collected.
    pub fn lookup(&self, name: &str) -> Option<StatusValue> {
        let cache = self.cache.read();
        cache.as_ref()?.get(&name.to_lowercase()).cloned()
    }

    /// The cached snapshot from the last successful pass, keyed by lower-cased name.
    pub fn snapshot(&self) -> Option<Arc<StatusVars>> {
        self.cache.read().clone()
    }

    pub fn has_snapshot(&self) -> bool {
        self.cache.read().is_some()
    }

    /// Number of collection passes attempted, successful or not.
    pub fn passes(&self) -> u64 {
        self.passes.load(Ordering::Relaxed)
    }
}

impl Default for StatisticsRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}
