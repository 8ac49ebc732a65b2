//! Model store trait

use std::fmt::Debug;

use async_trait::async_trait;
use tokio::sync::broadcast;

use super::{RegistryError, RegistryEvent, RegistryStats, SortDirection, SortField};
use crate::domain::model::{BenchmarkMetrics, ModelFormat, ModelId, ModelRecord, ModelStatus};

/// Shared access to the model registry.
///
/// Each call is applied atomically and publishes a [`RegistryEvent`] when it
/// changed something. Operations on unknown ids are no-ops returning `false`.
#[async_trait]
pub trait ModelStore: Send + Sync + Debug {
    /// Register a new model in the `uploading` state
    async fn register(&self, name: &str, file_type: ModelFormat, size: u64) -> ModelRecord;

    async fn get(&self, id: &ModelId) -> Option<ModelRecord>;

    /// All records in insertion order
    async fn list(&self) -> Vec<ModelRecord>;

    async fn list_sorted(&self, field: SortField, direction: SortDirection) -> Vec<ModelRecord>;

    async fn set_status(
        &self,
        id: &ModelId,
        status: ModelStatus,
        error: Option<String>,
    ) -> Result<bool, RegistryError>;

    /// Attach metrics and mark the record completed
    async fn set_metrics(&self, id: &ModelId, metrics: BenchmarkMetrics) -> bool;

    async fn remove(&self, id: &ModelId) -> bool;

    /// Returns whether `id` is selected after the toggle
    async fn toggle_selection(&self, id: &ModelId) -> bool;

    async fn select_all(&self);

    async fn clear_selection(&self);

    async fn is_selected(&self, id: &ModelId) -> bool;

    /// Selected records in insertion order
    async fn selected(&self) -> Vec<ModelRecord>;

    async fn stats(&self) -> RegistryStats;

    /// Receive every event published after this call
    fn subscribe(&self) -> broadcast::Receiver<RegistryEvent>;
}
