//! Change notifications published by the registry

use serde::Serialize;

use crate::domain::model::{ModelId, ModelStatus};

/// A mutation that was applied to the registry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegistryEvent {
    ModelRegistered { id: ModelId, name: String },
    StatusChanged { id: ModelId, status: ModelStatus },
    MetricsRecorded { id: ModelId },
    ModelRemoved { id: ModelId },
    SelectionChanged { selected: usize },
}

impl RegistryEvent {
    /// Event name used for server-sent events
    pub fn name(&self) -> &'static str {
        match self {
            Self::ModelRegistered { .. } => "model_registered",
            Self::StatusChanged { .. } => "status_changed",
            Self::MetricsRecorded { .. } => "metrics_recorded",
            Self::ModelRemoved { .. } => "model_removed",
            Self::SelectionChanged { .. } => "selection_changed",
        }
    }
}
