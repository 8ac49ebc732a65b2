//! Report service - looks up models and renders their reports

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{info, instrument};

use super::model_service::{model_not_found, parse_model_id};
use crate::config::ReportsConfig;
use crate::domain::registry::ModelStore;
use crate::domain::report::{DocumentEncoder, ReportError, ReportRenderer};
use crate::domain::{report_file_name, DomainError, COMPARISON_REPORT_FILE_NAME};
use crate::infrastructure::observability::record_report_generated;

/// Kind of generated report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Single,
    Comparison,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Single => "single",
            ReportKind::Comparison => "comparison",
        }
    }
}

/// A rendered report ready to be served or written to disk
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub kind: ReportKind,
    pub file_name: String,
    pub content_type: &'static str,
    pub content: Bytes,
}

/// Report service configuration
#[derive(Debug, Clone)]
pub struct ReportServiceConfig {
    /// Completed models a comparison needs
    pub min_comparison_models: usize,
}

impl Default for ReportServiceConfig {
    fn default() -> Self {
        Self {
            min_comparison_models: 2,
        }
    }
}

impl From<&ReportsConfig> for ReportServiceConfig {
    fn from(config: &ReportsConfig) -> Self {
        Self {
            min_comparison_models: config.min_comparison_models,
        }
    }
}

/// Trait for report service (for dynamic dispatch in AppState)
#[async_trait]
pub trait ReportServiceTrait: Send + Sync + Debug {
    /// Render the report of one completed model
    async fn single_report(&self, id: &str) -> Result<RenderedReport, DomainError>;

    /// Render a comparison of the selected models that completed
    async fn comparison_report(&self) -> Result<RenderedReport, DomainError>;
}

/// Report service implementation
#[derive(Debug)]
pub struct ReportService<S: ModelStore, E: DocumentEncoder> {
    store: Arc<S>,
    renderer: ReportRenderer<E>,
    config: ReportServiceConfig,
}

impl<S: ModelStore, E: DocumentEncoder> ReportService<S, E> {
    pub fn new(store: Arc<S>, encoder: E) -> Self {
        Self::with_config(store, encoder, ReportServiceConfig::default())
    }

    pub fn with_config(store: Arc<S>, encoder: E, config: ReportServiceConfig) -> Self {
        Self {
            store,
            renderer: ReportRenderer::new(encoder),
            config,
        }
    }

    fn finish(&self, kind: ReportKind, file_name: String, content: Vec<u8>) -> RenderedReport {
        record_report_generated(kind.as_str());
        info!(
            kind = kind.as_str(),
            file_name = %file_name,
            bytes = content.len(),
            "Generated report"
        );

        RenderedReport {
            kind,
            file_name,
            content_type: self.renderer.content_type(),
            content: Bytes::from(content),
        }
    }
}

#[async_trait]
impl<S: ModelStore, E: DocumentEncoder> ReportServiceTrait for ReportService<S, E> {
    #[instrument(skip(self))]
    async fn single_report(&self, id: &str) -> Result<RenderedReport, DomainError> {
        let model_id = parse_model_id(id)?;
        let record = self
            .store
            .get(&model_id)
            .await
            .ok_or_else(|| model_not_found(id))?;

        let content = self.renderer.render_single(&record)?;

        Ok(self.finish(ReportKind::Single, report_file_name(record.name()), content))
    }

    #[instrument(skip(self))]
    async fn comparison_report(&self) -> Result<RenderedReport, DomainError> {
        let completed: Vec<_> = self
            .store
            .selected()
            .await
            .into_iter()
            .filter(|record| record.is_completed())
            .collect();

        let required = self.config.min_comparison_models;
        if completed.len() < required {
            return Err(ReportError::empty_selection(required, completed.len()).into());
        }

        let content = self.renderer.render_comparison(&completed)?;

        Ok(self.finish(
            ReportKind::Comparison,
            COMPARISON_REPORT_FILE_NAME.to_string(),
            content,
        ))
    }
}
