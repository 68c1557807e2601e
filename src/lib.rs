//! GG-STATUS: status variable registry.
//!
//! Components report runtime statistics through the [`status::Statistics`]
//! trait. A [`status::StatisticsRegistry`] merges every registered provider
//! into one scope-tagged snapshot on demand and serves case-insensitive
//! point lookups from the last successful pass.
//!
//! # Collection model
//!
//! - Pull-based and synchronous: nothing is collected until `collect()` runs.
//! - All-or-nothing: the first failing provider aborts the pass and the
//!   previous snapshot stays in place.
//! - Registration order is precedence order: later providers override
//!   earlier ones on name collisions.
//! - Names known to the default status source (the global status table) are
//!   reserved with empty placeholders in the collected result.

pub mod builtin;
pub mod cli;
pub mod config;
pub mod status;
pub mod telemetry;

pub use status::{
    CollectionError, ScopeFlag, Statistics, StatisticsRegistry, StatusValue, StatusVars, VarValue,
};
