//! Model service - registry queries and selection management

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument};

use crate::domain::registry::{
    ModelStore, RegistryEvent, RegistryStats, SortDirection, SortField,
};
use crate::domain::{DomainError, ModelId, ModelRecord};

/// Trait for model service (for dynamic dispatch in AppState)
#[async_trait]
pub trait ModelServiceTrait: Send + Sync + Debug {
    async fn list(&self, field: SortField, direction: SortDirection) -> Vec<ModelRecord>;

    async fn get(&self, id: &str) -> Result<Option<ModelRecord>, DomainError>;

    /// Get a model by ID, returning an error if not found
    async fn get_required(&self, id: &str) -> Result<ModelRecord, DomainError>;

    /// Remove a model. Returns false if it did not exist.
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;

    /// Toggle selection of an existing model; returns whether it is now selected
    async fn toggle_selection(&self, id: &str) -> Result<bool, DomainError>;

    async fn is_selected(&self, id: &str) -> Result<bool, DomainError>;

    async fn select_all(&self) -> Vec<ModelRecord>;

    async fn clear_selection(&self);

    async fn selected(&self) -> Vec<ModelRecord>;

    async fn stats(&self) -> RegistryStats;

    fn subscribe(&self) -> broadcast::Receiver<RegistryEvent>;
}

/// Model service over a shared [`ModelStore`]
#[derive(Debug)]
pub struct ModelService<S: ModelStore> {
    store: Arc<S>,
}

impl<S: ModelStore> ModelService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

pub(crate) fn parse_model_id(id: &str) -> Result<ModelId, DomainError> {
    ModelId::new(id)
}

pub(crate) fn model_not_found(id: &str) -> DomainError {
    DomainError::not_found(format!("Model '{}' not found", id))
}

#[async_trait]
impl<S: ModelStore> ModelServiceTrait for ModelService<S> {
    #[instrument(skip(self))]
    async fn list(&self, field: SortField, direction: SortDirection) -> Vec<ModelRecord> {
        self.store.list_sorted(field, direction).await
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> Result<Option<ModelRecord>, DomainError> {
        let model_id = parse_model_id(id)?;
        Ok(self.store.get(&model_id).await)
    }

    async fn get_required(&self, id: &str) -> Result<ModelRecord, DomainError> {
        self.get(id).await?.ok_or_else(|| model_not_found(id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let model_id = parse_model_id(id)?;
        let removed = self.store.remove(&model_id).await;

        if removed {
            info!(model_id = %id, "Removed model");
        }

        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn toggle_selection(&self, id: &str) -> Result<bool, DomainError> {
        let model_id = parse_model_id(id)?;

        if self.store.get(&model_id).await.is_none() {
            return Err(model_not_found(id));
        }

        let selected = self.store.toggle_selection(&model_id).await;
        debug!(model_id = %id, selected, "Toggled model selection");

        Ok(selected)
    }

    async fn is_selected(&self, id: &str) -> Result<bool, DomainError> {
        let model_id = parse_model_id(id)?;
        Ok(self.store.is_selected(&model_id).await)
    }

    #[instrument(skip(self))]
    async fn select_all(&self) -> Vec<ModelRecord> {
        self.store.select_all().await;
        self.store.selected().await
    }

    #[instrument(skip(self))]
    async fn clear_selection(&self) {
        self.store.clear_selection().await;
    }

    async fn selected(&self) -> Vec<ModelRecord> {
        self.store.selected().await
    }

    async fn stats(&self) -> RegistryStats {
        self.store.stats().await
    }

    fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.store.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModelFormat;
    use crate::infrastructure::registry::InMemoryModelStore;

    fn service() -> (Arc<InMemoryModelStore>, ModelService<InMemoryModelStore>) {
        let store = Arc::new(InMemoryModelStore::new());
        (store.clone(), ModelService::new(store))
    }

    #[tokio::test]
    async fn test_get_unknown_and_invalid_ids() {
        let (_, service) = service();

        assert!(service.get(ModelId::generate().as_str()).await.unwrap().is_none());
        assert!(matches!(
            service.get_required(ModelId::generate().as_str()).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.get("not a model id").await,
            Err(DomainError::InvalidId { .. })
        ));
    }

    #[tokio::test]
    async fn test_toggle_unknown_model_is_not_found() {
        let (store, service) = service();

        let result = service.toggle_selection(ModelId::generate().as_str()).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert!(store.selected().await.is_empty());
    }

    #[tokio::test]
    async fn test_selection_flow() {
        let (store, service) = service();
        let a = store.register("a.pt", ModelFormat::Pt, 1).await;
        store.register("b.pt", ModelFormat::Pt, 2).await;

        assert!(service.toggle_selection(a.id().as_str()).await.unwrap());
        assert!(service.is_selected(a.id().as_str()).await.unwrap());
        assert_eq!(service.selected().await.len(), 1);

        assert_eq!(service.select_all().await.len(), 2);
        assert_eq!(service.stats().await.selected, 2);

        service.clear_selection().await;
        assert!(service.selected().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let (store, service) = service();
        let a = store.register("a.pt", ModelFormat::Pt, 1).await;

        assert!(service.delete(a.id().as_str()).await.unwrap());
        assert!(!service.delete(a.id().as_str()).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_defaults_to_newest_first() {
        let (store, service) = service();
        store.register("old.pt", ModelFormat::Pt, 1).await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        store.register("new.pt", ModelFormat::Pt, 1).await;

        let records = service
            .list(SortField::default(), SortDirection::default())
            .await;

        assert_eq!(records[0].name(), "new.pt");
        assert_eq!(records[1].name(), "old.pt");
    }
}
