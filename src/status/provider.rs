//! The statistics provider seam.

use std::collections::HashMap;

use super::scope::ScopeFlag;
use super::value::VarValue;

/// Error type returned by providers and default-variable sources.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A component that reports status variables.
///
/// Providers are registered once and live for the lifetime of the registry.
/// `stats` is called on every collection pass and may block; the registry
/// does not bound how long it takes.
pub trait Statistics: Send + Sync {
    /// Name used in logs and error context.
    fn provider_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Scope of the variable `name` reported by this provider.
    fn scope(&self, _name: &str) -> ScopeFlag {
        ScopeFlag::DEFAULT
    }

    /// Compute the current values of this provider's variables.
    fn stats(&self) -> Result<HashMap<String, VarValue>, BoxError>;
}
