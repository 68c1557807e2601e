//! gg-status entry point.
//!
//! Builds a registry from `GG_STATUS_*` configuration, registers the builtin
//! providers, and runs one subcommand.
//!
//! ## CLI Subcommands
//!
//! - `gg-status` or `gg-status show [--json]` - Print all status variables
//! - `gg-status get <name> [--json]` - Print one status variable
//! - `gg-status config show|defaults` - Print configuration

use std::process::ExitCode;

use gg_status::builtin::install_builtin;
use gg_status::cli::{config_cmd, positional_arg, run_get, run_show, EXIT_USAGE};
use gg_status::config as gg_config;
use gg_status::telemetry::init_logging;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("show");
    let json = args.iter().skip(1).any(|a| a == "--json");

    match command {
        "show" | "" | "--json" => {
            let code = run_with_registry(|registry| run_show(registry, json));
            ExitCode::from(code as u8)
        }
        "get" => {
            let Some(name) = positional_arg(args.get(2..).unwrap_or(&[])) else {
                eprintln!("Missing variable name");
                print_command_help("get");
                return ExitCode::from(EXIT_USAGE);
            };
            let code = run_with_registry(|registry| run_get(registry, name, json));
            ExitCode::from(code as u8)
        }
        "config" => {
            let subcommand = args.get(2).map(|s| s.as_str()).unwrap_or("show");
            match subcommand {
                "show" => {
                    config_cmd::run_show();
                    ExitCode::SUCCESS
                }
                "defaults" => {
                    config_cmd::run_defaults();
                    ExitCode::SUCCESS
                }
                _ => {
                    eprintln!("Unknown config subcommand: {}", subcommand);
                    print_command_help("config");
                    ExitCode::from(EXIT_USAGE)
                }
            }
        }
        "help" | "--help" | "-h" => {
            if let Some(subcommand) = args.get(2) {
                print_command_help(subcommand);
            } else {
                print_usage();
            }
            ExitCode::SUCCESS
        }
        "version" | "--version" | "-V" => {
            println!("gg-status {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            ExitCode::from(EXIT_USAGE)
        }
    }
}

/// Load config, initialize logging, build the registry with builtin
/// providers, then hand it to `run`.
fn run_with_registry<F>(run: F) -> i32
where
    F: FnOnce(&gg_status::StatisticsRegistry) -> i32,
{
    let config = gg_config::load();
    if let Err(e) = init_logging(&config.log_config()) {
        eprintln!("Logging disabled: {}", e);
    }

    let registry = config.build_registry();
    let store = install_builtin(&registry);
    store.increment_counter("Cli_invocations", 1);
    tracing::debug!(providers = registry.provider_count(), "registry ready");

    run(&registry)
}

fn print_usage() {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        "gg-status - Status variable registry v{}

USAGE:
    gg-status [COMMAND] [OPTIONS]

COMMANDS:
    show         Collect and print all status variables (default)
    get          Collect and print one status variable
    config       Show configuration (show, defaults)
    version      Show version information
    help         Show this help message

OPTIONS:
    --json       Output in JSON format (show, get)

ENVIRONMENT:
    GG_STATUS_LOG_LEVEL          Log filter (default: warn)
    GG_STATUS_LOG_FORMAT         pretty or json (default: pretty)
    GG_STATUS_LOG_FILE           Log file path (default: stderr)
    GG_STATUS_SLOW_PROVIDER_MS   Slow provider warning threshold (default: 1000)
    GG_STATUS_DEFAULTS_FILE      TOML status table for default variables

EXIT CODES:
    0  Success
    1  Collection failure or unknown variable
    2  Usage error
",
        version
    );
}

/// Print detailed help for a specific command.
fn print_command_help(command: &str) {
    match command {
        "show" => {
            eprintln!(
                "gg-status show - Print all status variables

USAGE:
    gg-status show [--json]

DESCRIPTION:
    Runs one collection pass over every registered provider and prints
    the merged variables sorted by name. Variables reserved by the
    default status table print with an empty value and scope NONE.
"
            );
        }
        "get" => {
            eprintln!(
                "gg-status get - Print one status variable

USAGE:
    gg-status get <NAME> [--json]

DESCRIPTION:
    Runs one collection pass, then looks NAME up ignoring case.

EXIT CODES:
    0  Variable found
    1  Collection failed or variable unknown
    2  NAME missing
"
            );
        }
        "config" => {
            eprintln!(
                "gg-status config - Show configuration

USAGE:
    gg-status config show       Effective values from the environment
    gg-status config defaults   Built-in defaults
"
            );
        }
        _ => {
            eprintln!("No help available for '{}'", command);
            print_usage();
        }
    }
}
