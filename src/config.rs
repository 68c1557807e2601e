//! Configuration loading from environment variables.
//!
//! All values are read from `GG_STATUS_*` environment variables with
//! sensible defaults. Invalid values fall back to defaults without crashing.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `GG_STATUS_LOG_LEVEL` | warn | Log filter directive |
//! | `GG_STATUS_LOG_FORMAT` | pretty | `pretty` or `json` |
//! | `GG_STATUS_LOG_FILE` | (stderr) | Write logs to this file |
//! | `GG_STATUS_SLOW_PROVIDER_MS` | 1000 | Warn when a provider takes longer (ms) |
//! | `GG_STATUS_DEFAULTS_FILE` | (none) | TOML status table for default variables |

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::status::{
    DefaultStatusSource, FileDefaultStatus, NoDefaultStatus, RegistryConfig, StatisticsRegistry,
};
use crate::telemetry::{LogConfig, LogFormat};

pub const DEFAULT_LOG_LEVEL: &str = "warn";
pub const DEFAULT_SLOW_PROVIDER_MS: u64 = 1000;

/// All configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub log_level: String,
    pub log_format: LogFormat,
    pub log_file: Option<PathBuf>,
    pub slow_provider_threshold: Duration,
    pub defaults_file: Option<PathBuf>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: LogFormat::default(),
            log_file: None,
            slow_provider_threshold: Duration::from_millis(DEFAULT_SLOW_PROVIDER_MS),
            defaults_file: None,
        }
    }
}

/// Parse a `u64` env var, returning `default` on missing or invalid.
fn parse_u64(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(val) => val.parse::<u64>().unwrap_or(default),
        Err(_) => default,
    }
}

/// Read a non-empty path env var.
fn parse_path(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

/// Load all configuration from environment variables.
pub fn load() -> EnvConfig {
    let log_level = std::env::var("GG_STATUS_LOG_LEVEL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
    let log_format = std::env::var("GG_STATUS_LOG_FORMAT")
        .ok()
        .and_then(|v| v.parse::<LogFormat>().ok())
        .unwrap_or_default();
    let slow_ms = parse_u64("GG_STATUS_SLOW_PROVIDER_MS", DEFAULT_SLOW_PROVIDER_MS).max(1);

    EnvConfig {
        log_level,
        log_format,
        log_file: parse_path("GG_STATUS_LOG_FILE"),
        slow_provider_threshold: Duration::from_millis(slow_ms),
        defaults_file: parse_path("GG_STATUS_DEFAULTS_FILE"),
    }
}

impl EnvConfig {
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            format: self.log_format,
            level: self.log_level.clone(),
            output_path: self.log_file.clone(),
        }
    }

    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            slow_provider_threshold: self.slow_provider_threshold,
        }
    }

    /// The status table backing default variables, or the no-op source.
    pub fn default_source(&self) -> Arc<dyn DefaultStatusSource> {
        match &self.defaults_file {
            Some(path) => Arc::new(FileDefaultStatus::new(path.clone())),
            None => Arc::new(NoDefaultStatus),
        }
    }

    /// Build an empty registry wired to this configuration.
    pub fn build_registry(&self) -> StatisticsRegistry {
        StatisticsRegistry::with_default_source(self.registry_config(), self.default_source())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Serialize env-mutating tests to avoid cross-test pollution.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_KEYS: &[&str] = &[
        "GG_STATUS_LOG_LEVEL",
        "GG_STATUS_LOG_FORMAT",
        "GG_STATUS_LOG_FILE",
        "GG_STATUS_SLOW_PROVIDER_MS",
        "GG_STATUS_DEFAULTS_FILE",
    ];

    fn clear_env_vars() {
        for k in ENV_KEYS {
            std::env::remove_var(k);
        }
    }

    #[test]
    fn test_defaults_are_sensible() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env_vars();
        let cfg = load();
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.log_format, LogFormat::Pretty);
        assert!(cfg.log_file.is_none());
        assert_eq!(cfg.slow_provider_threshold, Duration::from_millis(1000));
        assert!(cfg.defaults_file.is_none());
    }

    #[test]
    fn test_env_vars_override_defaults() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env_vars();
        std::env::set_var("GG_STATUS_LOG_LEVEL", "gg_status=debug");
        std::env::set_var("GG_STATUS_LOG_FORMAT", "JSON");
        std::env::set_var("GG_STATUS_SLOW_PROVIDER_MS", "250");
        std::env::set_var("GG_STATUS_DEFAULTS_FILE", "/etc/gg/status.toml");
        let cfg = load();
        assert_eq!(cfg.log_level, "gg_status=debug");
        assert_eq!(cfg.log_format, LogFormat::Json);
        assert_eq!(cfg.slow_provider_threshold, Duration::from_millis(250));
        assert_eq!(cfg.defaults_file, Some(PathBuf::from("/etc/gg/status.toml")));
        clear_env_vars();
    }

    #[test]
    fn test_invalid_env_falls_back_to_default() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env_vars();
        std::env::set_var("GG_STATUS_LOG_FORMAT", "xml");
        std::env::set_var("GG_STATUS_SLOW_PROVIDER_MS", "soon");
        std::env::set_var("GG_STATUS_DEFAULTS_FILE", "  ");
        let cfg = load();
        assert_eq!(cfg.log_format, LogFormat::Pretty);
        assert_eq!(cfg.slow_provider_threshold, Duration::from_millis(1000));
        assert!(cfg.defaults_file.is_none());
        clear_env_vars();
    }

    #[test]
    fn test_slow_threshold_floor() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env_vars();
        std::env::set_var("GG_STATUS_SLOW_PROVIDER_MS", "0");
        let cfg = load();
        assert_eq!(cfg.slow_provider_threshold, Duration::from_millis(1));
        clear_env_vars();
    }

    #[test]
    fn test_derived_configs() {
        let cfg = EnvConfig {
            log_file: Some(PathBuf::from("/tmp/status.log")),
            ..EnvConfig::default()
        };
        let log = cfg.log_config();
        assert_eq!(log.level, "warn");
        assert_eq!(log.output_path, Some(PathBuf::from("/tmp/status.log")));
        assert_eq!(
            cfg.registry_config().slow_provider_threshold,
            Duration::from_millis(1000)
        );
        assert_eq!(cfg.build_registry().provider_count(), 0);
    }
}
