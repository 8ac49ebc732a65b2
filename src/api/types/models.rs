//! Request and response types for the model registry endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    format_file_size, format_upload_age, ModelRecord, RegistryStats, SortDirection, SortField,
};

/// Register a model file by name and size
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterModelRequest {
    pub name: String,
    /// Size in bytes
    pub size: u64,
}

/// Query parameters for listing models
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelsQuery {
    pub sort: Option<SortField>,
    pub direction: Option<SortDirection>,
}

/// A model record as shown on the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct ModelView {
    #[serde(flatten)]
    pub record: ModelRecord,
    pub selected: bool,
    pub size_display: String,
    pub uploaded_ago: String,
}

impl ModelView {
    pub fn new(record: ModelRecord, selected: bool, now: DateTime<Utc>) -> Self {
        Self {
            size_display: format_file_size(record.size()),
            uploaded_ago: format_upload_age(record.uploaded_at(), now),
            selected,
            record,
        }
    }
}

/// List response in the `{ "object": "list", "data": [...] }` shape
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T> {
    pub object: &'static str,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            object: "list",
            data,
        }
    }
}

/// Selection state after a selection change
#[derive(Debug, Clone, Serialize)]
pub struct SelectionResponse {
    pub id: String,
    pub selected: bool,
}

/// Registry counters
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub object: &'static str,
    #[serde(flatten)]
    pub stats: RegistryStats,
}

impl From<RegistryStats> for StatsResponse {
    fn from(stats: RegistryStats) -> Self {
        Self {
            object: "stats",
            stats,
        }
    }
}
