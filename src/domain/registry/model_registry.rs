//! In-process model registry state machine

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::RegistryError;
use crate::domain::model::{BenchmarkMetrics, ModelFormat, ModelId, ModelRecord, ModelStatus};

/// Column a model listing can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    FileType,
    Size,
    #[default]
    UploadedAt,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Record counts shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RegistryStats {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
    /// Records that are uploading or benchmarking
    pub in_progress: usize,
    pub selected: usize,
}

/// Ordered collection of model records plus the current selection.
///
/// Records keep insertion order and are never reordered by mutations.
/// Every operation on an unknown id is a no-op reported as `false`.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    records: Vec<ModelRecord>,
    selection: HashSet<ModelId>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new model in the `uploading` state and return it
    pub fn register(
        &mut self,
        name: impl Into<String>,
        file_type: ModelFormat,
        size: u64,
    ) -> &ModelRecord {
        let mut id = ModelId::generate();
        while self.position(&id).is_some() {
            id = ModelId::generate();
        }

        self.records
            .push(ModelRecord::with_id(id, name, file_type, size));
        &self.records[self.records.len() - 1]
    }

    /// Overwrite a record's status.
    ///
    /// A supplied error is kept only for `failed`; without one a prior error
    /// stays. `completed` is rejected because it requires metrics.
    pub fn set_status(
        &mut self,
        id: &ModelId,
        status: ModelStatus,
        error: Option<String>,
    ) -> Result<bool, RegistryError> {
        if status == ModelStatus::Completed {
            return Err(RegistryError::metrics_required(id.as_str()));
        }

        match self.get_mut(id) {
            Some(record) => {
                record.apply_status(status, error);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Attach metrics and force the record to `completed`
    pub fn set_metrics(&mut self, id: &ModelId, metrics: BenchmarkMetrics) -> bool {
        match self.get_mut(id) {
            Some(record) => {
                record.complete(metrics);
                true
            }
            None => false,
        }
    }

    /// Delete a record and drop it from the selection
    pub fn remove(&mut self, id: &ModelId) -> bool {
        self.selection.remove(id);

        match self.position(id) {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }

    /// Flip selection membership of `id`; returns whether it is now selected.
    /// The id is not checked against live records.
    pub fn toggle_selection(&mut self, id: &ModelId) -> bool {
        if self.selection.remove(id) {
            false
        } else {
            self.selection.insert(id.clone());
            true
        }
    }

    pub fn select_all(&mut self) {
        self.selection = self.records.iter().map(|r| r.id().clone()).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&self, id: &ModelId) -> bool {
        self.selection.contains(id)
    }

    /// Selected records in insertion order
    pub fn selected(&self) -> Vec<&ModelRecord> {
        self.records
            .iter()
            .filter(|record| self.selection.contains(record.id()))
            .collect()
    }

    pub fn get(&self, id: &ModelId) -> Option<&ModelRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// All records in insertion order
    pub fn records(&self) -> &[ModelRecord] {
        &self.records
    }

    /// Records ordered for display. The sort is stable so equal keys keep
    /// insertion order in both directions.
    pub fn sorted(&self, field: SortField, direction: SortDirection) -> Vec<&ModelRecord> {
        let mut records: Vec<&ModelRecord> = self.records.iter().collect();

        records.sort_by(|a, b| {
            let ordering = compare_by(a, b, field);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        records
    }

    pub fn stats(&self) -> RegistryStats {
        let mut stats = RegistryStats {
            total: self.records.len(),
            ..Default::default()
        };

        for record in &self.records {
            match record.status() {
                ModelStatus::Completed => stats.completed += 1,
                ModelStatus::Failed => stats.failed += 1,
                status if status.is_in_progress() => stats.in_progress += 1,
                _ => {}
            }

            if self.selection.contains(record.id()) {
                stats.selected += 1;
            }
        }

        stats
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: &ModelId) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    fn get_mut(&mut self, id: &ModelId) -> Option<&mut ModelRecord> {
        self.records.iter_mut().find(|record| record.id() == id)
    }
}

fn compare_by(a: &ModelRecord, b: &ModelRecord, field: SortField) -> Ordering {
    match field {
        SortField::UploadedAt => a.uploaded_at().cmp(&b.uploaded_at()),
        SortField::Size => a.size().cmp(&b.size()),
        SortField::Name => compare_text(a.name(), b.name()),
        SortField::FileType => compare_text(&a.file_type().to_string(), &b.file_type().to_string()),
        SortField::Status => compare_text(&a.status().to_string(), &b.status().to_string()),
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn metrics(accuracy: f64) -> BenchmarkMetrics {
        BenchmarkMetrics {
            accuracy,
            inference_time: 20.0,
            memory_usage: 100.0,
            parameters: 1.0,
            flops: 2.0,
        }
    }

    fn register(registry: &mut ModelRegistry, name: &str, size: u64) -> ModelId {
        registry
            .register(name, ModelFormat::from_filename(name), size)
            .id()
            .clone()
    }

    /// Metrics present iff completed, error only when failed
    fn assert_invariants(registry: &ModelRegistry) {
        for record in registry.records() {
            assert_eq!(record.metrics().is_some(), record.is_completed());
            if record.error().is_some() {
                assert_eq!(record.status(), ModelStatus::Failed);
            }
        }
    }

    #[test]
    fn test_register_assigns_unique_ids() {
        let mut registry = ModelRegistry::new();
        let mut ids = HashSet::new();

        for i in 0..50 {
            let id = register(&mut registry, &format!("model_{}.pt", i), 1024);
            assert!(ids.insert(id));
        }

        assert_eq!(registry.len(), 50);
    }

    #[test]
    fn test_register_starts_uploading() {
        let mut registry = ModelRegistry::new();
        let record = registry.register("net.onnx", ModelFormat::Onnx, 2048);

        assert_eq!(record.status(), ModelStatus::Uploading);
        assert!(record.metrics().is_none());
        assert_eq!(record.file_type(), ModelFormat::Onnx);
    }

    #[test]
    fn test_lifecycle_to_completed() {
        let mut registry = ModelRegistry::new();
        let id = register(&mut registry, "net.onnx", 1024);

        assert!(registry.set_status(&id, ModelStatus::Uploaded, None).unwrap());
        assert!(registry.set_status(&id, ModelStatus::Benchmarking, None).unwrap());
        assert!(registry.set_metrics(&id, metrics(0.9)));

        let record = registry.get(&id).unwrap();
        assert_eq!(record.status(), ModelStatus::Completed);
        assert_eq!(record.metrics(), Some(&metrics(0.9)));
        assert_invariants(&registry);
    }

    #[test]
    fn test_set_metrics_forces_completed_from_any_status() {
        for status in [
            ModelStatus::Uploading,
            ModelStatus::Uploaded,
            ModelStatus::Benchmarking,
            ModelStatus::Failed,
        ] {
            let mut registry = ModelRegistry::new();
            let id = register(&mut registry, "net.onnx", 1024);
            registry
                .set_status(&id, status, Some("error".to_string()))
                .unwrap();

            assert!(registry.set_metrics(&id, metrics(0.9)));

            let record = registry.get(&id).unwrap();
            assert_eq!(record.status(), ModelStatus::Completed);
            assert!(record.error().is_none());
        }
    }

    #[test]
    fn test_set_status_completed_is_rejected() {
        let mut registry = ModelRegistry::new();
        let id = register(&mut registry, "net.onnx", 1024);

        let result = registry.set_status(&id, ModelStatus::Completed, None);
        assert!(matches!(result, Err(RegistryError::MetricsRequired { .. })));
        assert_eq!(registry.get(&id).unwrap().status(), ModelStatus::Uploading);
    }

    #[test]
    fn test_failure_attaches_error() {
        let mut registry = ModelRegistry::new();
        let id = register(&mut registry, "net.onnx", 1024);

        registry.set_status(&id, ModelStatus::Benchmarking, None).unwrap();
        registry
            .set_status(&id, ModelStatus::Failed, Some("out of memory".to_string()))
            .unwrap();

        let record = registry.get(&id).unwrap();
        assert_eq!(record.status(), ModelStatus::Failed);
        assert_eq!(record.error(), Some("out of memory"));
        assert!(record.metrics().is_none());
    }

    #[test]
    fn test_invariants_hold_across_transition_sequences() {
        let statuses = [
            ModelStatus::Uploading,
            ModelStatus::Uploaded,
            ModelStatus::Benchmarking,
            ModelStatus::Failed,
        ];

        let mut registry = ModelRegistry::new();
        let id = register(&mut registry, "net.onnx", 1024);

        for first in statuses {
            for second in statuses {
                registry.set_metrics(&id, metrics(0.91));
                assert_invariants(&registry);
                registry
                    .set_status(&id, first, Some("first".to_string()))
                    .unwrap();
                assert_invariants(&registry);
                registry.set_status(&id, second, None).unwrap();
                assert_invariants(&registry);
            }
        }
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut registry = ModelRegistry::new();
        register(&mut registry, "net.onnx", 1024);
        let unknown = ModelId::generate();

        assert!(!registry.set_status(&unknown, ModelStatus::Uploaded, None).unwrap());
        assert!(!registry.set_metrics(&unknown, metrics(0.9)));
        assert!(!registry.remove(&unknown));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_purges_selection() {
        let mut registry = ModelRegistry::new();
        let a = register(&mut registry, "a.pt", 1);
        let b = register(&mut registry, "b.pt", 2);

        registry.select_all();
        assert!(registry.remove(&a));

        let selected: Vec<&ModelId> = registry.selected().iter().map(|r| r.id()).collect();
        assert_eq!(selected, vec![&b]);
        assert!(!registry.is_selected(&a));
    }

    #[test]
    fn test_select_all_returns_insertion_order() {
        let mut registry = ModelRegistry::new();
        let ids: Vec<ModelId> = ["c.pt", "a.pt", "b.pt"]
            .iter()
            .map(|name| register(&mut registry, name, 1))
            .collect();

        registry.select_all();

        let selected: Vec<ModelId> = registry.selected().iter().map(|r| r.id().clone()).collect();
        assert_eq!(selected, ids);
    }

    #[test]
    fn test_selected_follows_insertion_not_toggle_order() {
        let mut registry = ModelRegistry::new();
        let a = register(&mut registry, "a.pt", 1);
        let b = register(&mut registry, "b.pt", 1);

        registry.toggle_selection(&b);
        registry.toggle_selection(&a);

        let selected: Vec<ModelId> = registry.selected().iter().map(|r| r.id().clone()).collect();
        assert_eq!(selected, vec![a, b]);
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut registry = ModelRegistry::new();
        let a = register(&mut registry, "a.pt", 1);

        assert!(registry.toggle_selection(&a));
        assert!(!registry.toggle_selection(&a));
        assert!(!registry.is_selected(&a));

        registry.select_all();
        registry.toggle_selection(&a);
        registry.toggle_selection(&a);
        assert!(registry.is_selected(&a));
    }

    #[test]
    fn test_toggle_unknown_id_has_no_effect_on_selected() {
        let mut registry = ModelRegistry::new();
        register(&mut registry, "a.pt", 1);

        assert!(registry.toggle_selection(&ModelId::generate()));
        assert!(registry.selected().is_empty());
        assert_eq!(registry.stats().selected, 0);
    }

    #[test]
    fn test_clear_selection_is_idempotent() {
        let mut registry = ModelRegistry::new();
        register(&mut registry, "a.pt", 1);
        registry.select_all();

        registry.clear_selection();
        assert!(registry.selected().is_empty());
        registry.clear_selection();
        assert!(registry.selected().is_empty());
    }

    #[test]
    fn test_mutations_keep_insertion_order() {
        let mut registry = ModelRegistry::new();
        let a = register(&mut registry, "a.pt", 1);
        let b = register(&mut registry, "b.pt", 1);
        let c = register(&mut registry, "c.pt", 1);

        registry.set_metrics(&b, metrics(0.9));
        registry.set_status(&a, ModelStatus::Failed, None).unwrap();

        let ids: Vec<&ModelId> = registry.records().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![&a, &b, &c]);
    }

    #[test]
    fn test_sorted_by_size_and_name() {
        let mut registry = ModelRegistry::new();
        register(&mut registry, "beta.pt", 300);
        register(&mut registry, "Alpha.pt", 100);
        register(&mut registry, "gamma.pt", 200);

        let by_size: Vec<u64> = registry
            .sorted(SortField::Size, SortDirection::Asc)
            .iter()
            .map(|r| r.size())
            .collect();
        assert_eq!(by_size, vec![100, 200, 300]);

        let by_name: Vec<&str> = registry
            .sorted(SortField::Name, SortDirection::Desc)
            .iter()
            .map(|r| r.name())
            .collect();
        assert_eq!(by_name, vec!["gamma.pt", "beta.pt", "Alpha.pt"]);
    }

    #[test]
    fn test_sorted_by_upload_time_defaults_newest_first() {
        let mut registry = ModelRegistry::new();
        let old = register(&mut registry, "old.pt", 1);
        let new = register(&mut registry, "new.pt", 1);

        let now = Utc::now();
        registry.get_mut(&old).unwrap().set_uploaded_at(now - Duration::hours(2));
        registry.get_mut(&new).unwrap().set_uploaded_at(now);

        let sorted = registry.sorted(SortField::default(), SortDirection::default());
        assert_eq!(sorted[0].id(), &new);
        assert_eq!(sorted[1].id(), &old);
    }

    #[test]
    fn test_stats() {
        let mut registry = ModelRegistry::new();
        let a = register(&mut registry, "a.pt", 1);
        let b = register(&mut registry, "b.pt", 1);
        let c = register(&mut registry, "c.pt", 1);
        let d = register(&mut registry, "d.pt", 1);

        registry.set_metrics(&a, metrics(0.9));
        registry.set_status(&b, ModelStatus::Failed, None).unwrap();
        registry.set_status(&c, ModelStatus::Uploaded, None).unwrap();
        registry.toggle_selection(&d);

        let stats = registry.stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.selected, 1);
    }
}
