// Copyright 2024-2026 GG-CORE Contributors
// SPDX-License-Identifier: Apache-2.0

//! Config CLI subcommands: show, defaults.

use crate::config::{self, EnvConfig};
use crate::telemetry::LogFormat;

/// Print effective config as key-value pairs to stdout.
pub fn run_show() {
    print!("{}", format_config(&config::load()));
}

/// Print default config values (no env overrides) to stdout.
pub fn run_defaults() {
    print!("{}", format_config(&EnvConfig::default()));
}

/// Key-value lines in `GG_STATUS_*=value` form. Unset paths print empty.
pub fn format_config(cfg: &EnvConfig) -> String {
    let format = match cfg.log_format {
        LogFormat::Json => "json",
        LogFormat::Pretty => "pretty",
    };
    let path = |p: &Option<std::path::PathBuf>| {
        p.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    };

    format!(
        "GG_STATUS_LOG_LEVEL={}\n\
         GG_STATUS_LOG_FORMAT={}\n\
         GG_STATUS_LOG_FILE={}\n\
         GG_STATUS_SLOW_PROVIDER_MS={}\n\
         GG_STATUS_DEFAULTS_FILE={}\n",
        cfg.log_level,
        format,
        path(&cfg.log_file),
        cfg.slow_provider_threshold.as_millis(),
        path(&cfg.defaults_file),
    )
}
