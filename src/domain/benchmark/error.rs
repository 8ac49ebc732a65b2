use thiserror::Error;

/// Errors produced while synthesizing benchmark metrics
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    /// Fault injected by the mock benchmark
    #[error("Simulated benchmark failure: {message}")]
    Simulated { message: String },

    #[error("Benchmark failed: {message}")]
    Failed { message: String },
}

impl SynthesisError {
    pub fn simulated(message: impl Into<String>) -> Self {
        Self::Simulated {
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}
