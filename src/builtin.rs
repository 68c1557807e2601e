//! Providers every process registers.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::status::{BoxError, ScopeFlag, Statistics, StatisticsRegistry, VarValue};
use crate::telemetry::MetricsStore;

pub const UPTIME: &str = "Uptime";
pub const SERVER_START_TIME: &str = "Server_start_time";

/// Reports process uptime and start time.
pub struct UptimeStats {
    started: Instant,
    started_at: DateTime<Utc>,
}

impl UptimeStats {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            started_at: Utc::now(),
        }
    }
}

impl Default for UptimeStats {
    fn default() -> Self {
        Self::new()
    }
}

impl Statistics for UptimeStats {
    fn provider_name(&self) -> &str {
        "uptime"
    }

    fn scope(&self, name: &str) -> ScopeFlag {
        if name == UPTIME {
            ScopeFlag::GLOBAL
        } else {
            ScopeFlag::DEFAULT
        }
    }

    fn stats(&self) -> Result<HashMap<String, VarValue>, BoxError> {
        let mut vars = HashMap::with_capacity(2);
        vars.insert(UPTIME.to_string(), VarValue::UInt(self.started.elapsed().as_secs()));
        vars.insert(
            SERVER_START_TIME.to_string(),
            VarValue::Text(self.started_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        Ok(vars)
    }
}

/// Register the builtin providers and return the shared value store.
pub fn install_builtin(registry: &StatisticsRegistry) -> Arc<MetricsStore> {
    let store = Arc::new(MetricsStore::named("process"));
    registry.register(Arc::new(UptimeStats::new()));
    registry.register(store.clone());
    store
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uptime_scopes() {
        let uptime = UptimeStats::new();
        assert_eq!(uptime.scope(UPTIME), ScopeFlag::GLOBAL);
        assert_eq!(uptime.scope(SERVER_START_TIME), ScopeFlag::DEFAULT);
    }

    #[test]
    fn test_uptime_reports_both_vars() {
        let vars = UptimeStats::new().stats().unwrap();
        assert!(vars[UPTIME].as_u64().is_some());
        let start = vars[SERVER_START_TIME].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(start).is_ok());
    }

    #[test]
    fn test_install_builtin_registers_two_providers() {
        let registry = StatisticsRegistry::default();
        let store = install_builtin(&registry);
        assert_eq!(registry.provider_names(), vec!["uptime", "process"]);

        store.increment_counter("Questions", 1);
        let vars = registry.collect().unwrap();
        assert_eq!(vars["Questions"].value, VarValue::UInt(1));
        assert_eq!(registry.lookup("uptime").unwrap().scope, ScopeFlag::GLOBAL);
    }
}
