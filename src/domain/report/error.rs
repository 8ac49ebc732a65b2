use thiserror::Error;

/// Errors raised while building or encoding a report
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// The model has no metrics yet
    #[error("Model '{model}' has not completed benchmarking")]
    IncompleteData { model: String },

    #[error("At least {required} completed model(s) must be selected, found {found}")]
    EmptySelection { required: usize, found: usize },

    #[error("Failed to encode report: {message}")]
    Encoding { message: String },
}

impl ReportError {
    pub fn incomplete_data(model: impl Into<String>) -> Self {
        Self::IncompleteData {
            model: model.into(),
        }
    }

    pub fn empty_selection(required: usize, found: usize) -> Self {
        Self::EmptySelection { required, found }
    }

    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }
}
