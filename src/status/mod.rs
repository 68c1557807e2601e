//! Status variable registry.
//!
//! Providers implementing [`Statistics`] register with a
//! [`StatisticsRegistry`]. A collection pass merges their variables into one
//! scope-tagged map and caches it for point lookups by name.

mod defaults;
mod error;
mod provider;
mod registry;
mod scope;
mod value;

pub use defaults::{
    DefaultSourceError, DefaultStatusSource, FileDefaultStatus, NoDefaultStatus,
    TableDefaultStatus,
};
pub use error::CollectionError;
pub use provider::{BoxError, Statistics};
pub use registry::{RegistryConfig, StatisticsRegistry, StatusVars};
pub use scope::ScopeFlag;
pub use value::{StatusValue, VarValue};
