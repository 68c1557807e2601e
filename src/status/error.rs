//! Collection error types.

use thiserror::Error;

use super::provider::BoxError;

/// A collection pass aborted because one of its sources failed.
///
/// No partial snapshot is published when this is returned.
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("Statistics provider '{provider}' failed: {source}")]
    Provider {
        provider: String,
        #[source]
        source: BoxError,
    },

    #[error("Default status source failed: {source}")]
    DefaultSource {
        #[source]
        source: BoxError,
    },
}

impl CollectionError {
    /// Name of the failing provider, if a provider caused the failure.
    pub fn provider(&self) -> Option<&str> {
        match self {
            Self::Provider { provider, .. } => Some(provider),
            Self::DefaultSource { .. } => None,
        }
    }
}
