// Copyright 2024-2026 GG-CORE Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI module for gg-status commands.
//!
//! ## Usage
//!
//! ```bash
//! gg-status show           # Collect and print all status variables
//! gg-status show --json    # Same, as JSON
//! gg-status get Uptime     # Collect and print one variable
//! gg-status config show    # Effective configuration
//! ```

pub mod config_cmd;
pub mod status_cmd;

pub use status_cmd::{render_json, render_table, run_get, run_show};

/// Exit code for malformed command lines.
pub const EXIT_USAGE: u8 = 2;

/// First argument that is not a `--flag`.
pub fn positional_arg(args: &[String]) -> Option<&str> {
    args.iter().map(|a| a.as_str()).find(|a| !a.starts_with("--"))
}
