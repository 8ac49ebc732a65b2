//! Report rendering: layout followed by document encoding

use std::fmt::Debug;

use chrono::{DateTime, Utc};

#[cfg(test)]
use mockall::automock;

use super::comparison::layout_comparison_report;
use super::error::ReportError;
use super::layout::ReportLayout;
use super::single::layout_single_report;
use crate::domain::model::ModelRecord;

/// Turns a laid-out report into document bytes
#[cfg_attr(test, automock)]
pub trait DocumentEncoder: Send + Sync + Debug {
    fn encode(&self, layout: &ReportLayout) -> Result<Vec<u8>, ReportError>;

    /// MIME type of the produced document
    fn content_type(&self) -> &'static str;
}

/// Renders single and comparison reports through a [`DocumentEncoder`]
#[derive(Debug, Clone)]
pub struct ReportRenderer<E> {
    encoder: E,
}

impl<E: DocumentEncoder> ReportRenderer<E> {
    pub fn new(encoder: E) -> Self {
        Self { encoder }
    }

    pub fn content_type(&self) -> &'static str {
        self.encoder.content_type()
    }

    pub fn render_single(&self, record: &ModelRecord) -> Result<Vec<u8>, ReportError> {
        self.render_single_at(record, Utc::now())
    }

    pub fn render_single_at(
        &self,
        record: &ModelRecord,
        generated_at: DateTime<Utc>,
    ) -> Result<Vec<u8>, ReportError> {
        let layout = layout_single_report(record, generated_at)?;
        self.encoder.encode(&layout)
    }

    pub fn render_comparison(&self, records: &[ModelRecord]) -> Result<Vec<u8>, ReportError> {
        self.render_comparison_at(records, Utc::now())
    }

    pub fn render_comparison_at(
        &self,
        records: &[ModelRecord],
        generated_at: DateTime<Utc>,
    ) -> Result<Vec<u8>, ReportError> {
        let layout = layout_comparison_report(records, generated_at)?;
        self.encoder.encode(&layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BenchmarkMetrics, ModelFormat};

    fn completed(name: &str) -> ModelRecord {
        let mut record = ModelRecord::new(name, ModelFormat::Pt, 4096);
        record.complete(BenchmarkMetrics {
            accuracy: 0.9,
            inference_time: 20.0,
            memory_usage: 80.0,
            parameters: 1.0,
            flops: 2.0,
        });
        record
    }

    #[test]
    fn test_render_single_encodes_layout() {
        let mut encoder = MockDocumentEncoder::new();
        encoder
            .expect_encode()
            .withf(|layout| layout.contains_text("Model Name: net.pt"))
            .times(1)
            .returning(|_| Ok(b"%PDF-fake".to_vec()));

        let renderer = ReportRenderer::new(encoder);
        let bytes = renderer.render_single(&completed("net.pt")).unwrap();

        assert_eq!(bytes, b"%PDF-fake");
    }

    #[test]
    fn test_render_single_incomplete_skips_encoder() {
        let mut encoder = MockDocumentEncoder::new();
        encoder.expect_encode().never();

        let renderer = ReportRenderer::new(encoder);
        let record = ModelRecord::new("net.pt", ModelFormat::Pt, 4096);

        assert_eq!(
            renderer.render_single(&record).unwrap_err(),
            ReportError::incomplete_data("net.pt")
        );
    }

    #[test]
    fn test_render_comparison_empty() {
        let mut encoder = MockDocumentEncoder::new();
        encoder.expect_encode().never();

        let renderer = ReportRenderer::new(encoder);
        let err = renderer.render_comparison(&[]).unwrap_err();

        assert!(matches!(err, ReportError::EmptySelection { .. }));
    }

    #[test]
    fn test_encoder_error_propagates() {
        let mut encoder = MockDocumentEncoder::new();
        encoder
            .expect_encode()
            .returning(|_| Err(ReportError::encoding("disk full")));

        let renderer = ReportRenderer::new(encoder);
        let err = renderer
            .render_comparison(&[completed("a.pt"), completed("b.pt")])
            .unwrap_err();

        assert_eq!(err, ReportError::encoding("disk full"));
    }
}
