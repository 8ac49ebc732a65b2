//! Registry-specific errors

use thiserror::Error;

/// Errors raised by registry mutations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// `completed` carries metrics and can only be reached through `set_metrics`
    #[error("Model '{id}' cannot be marked completed without metrics")]
    MetricsRequired { id: String },
}

impl RegistryError {
    pub fn metrics_required(id: impl Into<String>) -> Self {
        Self::MetricsRequired { id: id.into() }
    }
}
