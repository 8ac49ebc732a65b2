//! In-memory model store implementation

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use crate::domain::model::{BenchmarkMetrics, ModelFormat, ModelId, ModelRecord, ModelStatus};
use crate::domain::registry::{
    ModelRegistry, ModelStore, RegistryError, RegistryEvent, RegistryStats, SortDirection,
    SortField,
};

/// Events buffered per subscriber before it starts lagging
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// In-memory implementation of ModelStore.
///
/// Every operation takes the lock once, so concurrent callers never observe a
/// half-applied update. Events are sent before the lock is released and so
/// arrive in the order the changes were applied.
#[derive(Debug, Clone)]
pub struct InMemoryModelStore {
    registry: Arc<RwLock<ModelRegistry>>,
    events: broadcast::Sender<RegistryEvent>,
}

impl InMemoryModelStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            registry: Arc::new(RwLock::new(ModelRegistry::new())),
            events,
        }
    }

    fn publish(&self, event: RegistryEvent) {
        debug!(event = event.name(), "Publishing registry event");
        // No receivers is fine
        let _ = self.events.send(event);
    }
}

impl Default for InMemoryModelStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelStore for InMemoryModelStore {
    async fn register(&self, name: &str, file_type: ModelFormat, size: u64) -> ModelRecord {
        let mut registry = self.registry.write().await;
        let record = registry.register(name, file_type, size).clone();

        self.publish(RegistryEvent::ModelRegistered {
            id: record.id().clone(),
            name: record.name().to_string(),
        });

        record
    }

    async fn get(&self, id: &ModelId) -> Option<ModelRecord> {
        let registry = self.registry.read().await;
        registry.get(id).cloned()
    }

    async fn list(&self) -> Vec<ModelRecord> {
        let registry = self.registry.read().await;
        registry.records().to_vec()
    }

    async fn list_sorted(&self, field: SortField, direction: SortDirection) -> Vec<ModelRecord> {
        let registry = self.registry.read().await;
        registry
            .sorted(field, direction)
            .into_iter()
            .cloned()
            .collect()
    }

    async fn set_status(
        &self,
        id: &ModelId,
        status: ModelStatus,
        error: Option<String>,
    ) -> Result<bool, RegistryError> {
        let mut registry = self.registry.write().await;
        let applied = registry.set_status(id, status, error)?;

        if applied {
            self.publish(RegistryEvent::StatusChanged {
                id: id.clone(),
                status,
            });
        }

        Ok(applied)
    }

    async fn set_metrics(&self, id: &ModelId, metrics: BenchmarkMetrics) -> bool {
        let mut registry = self.registry.write().await;
        let applied = registry.set_metrics(id, metrics);

        if applied {
            self.publish(RegistryEvent::MetricsRecorded { id: id.clone() });
        }

        applied
    }

    async fn remove(&self, id: &ModelId) -> bool {
        let mut registry = self.registry.write().await;
        let removed = registry.remove(id);

        if removed {
            self.publish(RegistryEvent::ModelRemoved { id: id.clone() });
        }

        removed
    }

    async fn toggle_selection(&self, id: &ModelId) -> bool {
        let mut registry = self.registry.write().await;
        let now_selected = registry.toggle_selection(id);

        self.publish(RegistryEvent::SelectionChanged {
            selected: registry.selected().len(),
        });
        now_selected
    }

    async fn select_all(&self) {
        let mut registry = self.registry.write().await;
        registry.select_all();

        self.publish(RegistryEvent::SelectionChanged {
            selected: registry.len(),
        });
    }

    async fn clear_selection(&self) {
        let mut registry = self.registry.write().await;
        registry.clear_selection();
        self.publish(RegistryEvent::SelectionChanged { selected: 0 });
    }

    async fn is_selected(&self, id: &ModelId) -> bool {
        self.registry.read().await.is_selected(id)
    }

    async fn selected(&self) -> Vec<ModelRecord> {
        let registry = self.registry.read().await;
        registry.selected().into_iter().cloned().collect()
    }

    async fn stats(&self) -> RegistryStats {
        self.registry.read().await.stats()
    }

    fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.events.subscribe()
    }
}
