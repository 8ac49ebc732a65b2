//! Model record entity and related types

use std::fmt;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::metrics::BenchmarkMetrics;
use crate::domain::error::DomainError;

/// Regex pattern for valid model IDs: model-{uuid}
static ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^model-[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12}$")
        .expect("model id pattern is valid")
});

/// Maximum length for model IDs
pub const MAX_ID_LENGTH: usize = 42; // "model-" + 36 char UUID

/// Extensions offered by the file intake. Only the ones with a matching
/// `ModelFormat` variant are classified, the rest degrade to `Other`.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pt", "pth", "h5", "onnx", "pb", "tflite"];

/// Validated model record identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModelId(String);

impl ModelId {
    /// Create a validated model ID
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        validate_model_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh model ID
    pub fn generate() -> Self {
        Self(format!("model-{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ModelId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ModelId> for String {
    fn from(id: ModelId) -> Self {
        id.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ModelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validate a model ID string
pub fn validate_model_id(id: &str) -> Result<(), DomainError> {
    if id.is_empty() {
        return Err(DomainError::invalid_id("Model ID cannot be empty"));
    }

    if id.len() > MAX_ID_LENGTH {
        return Err(DomainError::invalid_id(format!(
            "Model ID exceeds maximum length of {} characters",
            MAX_ID_LENGTH
        )));
    }

    if !ID_PATTERN.is_match(id) {
        return Err(DomainError::invalid_id(format!(
            "Invalid model ID '{}': must be in format model-{{uuid}}",
            id
        )));
    }

    Ok(())
}

/// Declared model file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    /// PyTorch
    Pt,
    /// Keras
    H5,
    Onnx,
    /// TensorFlow
    Pb,
    /// TensorFlow Lite
    Tflite,
    Other,
}

impl ModelFormat {
    /// Classify a filename by its last extension.
    ///
    /// Unknown extensions are accepted and classified as `Other`.
    pub fn from_filename(filename: &str) -> Self {
        let extension = filename.rsplit('.').next().unwrap_or_default();
        Self::from_extension(extension)
    }

    pub fn from_extension(extension: &str) -> Self {
        match extension.to_lowercase().as_str() {
            "pt" => Self::Pt,
            "h5" => Self::H5,
            "onnx" => Self::Onnx,
            "pb" => Self::Pb,
            "tflite" => Self::Tflite,
            _ => Self::Other,
        }
    }

    /// Uppercase label used in reports
    pub fn label(&self) -> String {
        self.to_string().to_uppercase()
    }

    pub fn all() -> [ModelFormat; 6] {
        [
            Self::Pt,
            Self::H5,
            Self::Onnx,
            Self::Pb,
            Self::Tflite,
            Self::Other,
        ]
    }
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pt => write!(f, "pt"),
            Self::H5 => write!(f, "h5"),
            Self::Onnx => write!(f, "onnx"),
            Self::Pb => write!(f, "pb"),
            Self::Tflite => write!(f, "tflite"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Whether the intake lists this filename's extension as a model file
pub fn is_accepted_extension(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ACCEPTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Lifecycle state of a model record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModelStatus {
    /// File is being received
    #[default]
    Uploading,

    /// File received, waiting for the benchmark to start
    Uploaded,

    /// Benchmark is running
    Benchmarking,

    /// Benchmark finished and metrics are attached
    Completed,

    /// Benchmark failed with an error
    Failed,
}

impl ModelStatus {
    /// Check if this status represents a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Statuses counted as "in progress" on the dashboard
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::Uploading | Self::Benchmarking)
    }

    /// Check if the pipeline may move from this status to `target`
    pub fn can_transition_to(&self, target: ModelStatus) -> bool {
        matches!(
            (self, target),
            (Self::Uploading, Self::Uploaded)
                | (Self::Uploaded, Self::Benchmarking)
                | (Self::Benchmarking, Self::Completed)
                | (Self::Benchmarking, Self::Failed)
        )
    }
}

impl fmt::Display for ModelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uploading => write!(f, "uploading"),
            Self::Uploaded => write!(f, "uploaded"),
            Self::Benchmarking => write!(f, "benchmarking"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// A registered model file and its benchmark state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    id: ModelId,

    /// Original filename
    name: String,

    file_type: ModelFormat,

    /// Size in bytes
    size: u64,

    uploaded_at: DateTime<Utc>,

    /// Present only once the benchmark completed
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<BenchmarkMetrics>,

    status: ModelStatus,

    /// Present only when the benchmark failed
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ModelRecord {
    /// Create a new record in the `uploading` state
    pub fn new(name: impl Into<String>, file_type: ModelFormat, size: u64) -> Self {
        Self::with_id(ModelId::generate(), name, file_type, size)
    }

    /// Create record with specific ID (for testing)
    pub fn with_id(id: ModelId, name: impl Into<String>, file_type: ModelFormat, size: u64) -> Self {
        Self {
            id,
            name: name.into(),
            file_type,
            size,
            uploaded_at: Utc::now(),
            metrics: None,
            status: ModelStatus::Uploading,
            error: None,
        }
    }

    // Getters

    pub fn id(&self) -> &ModelId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_type(&self) -> ModelFormat {
        self.file_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }

    pub fn metrics(&self) -> Option<&BenchmarkMetrics> {
        self.metrics.as_ref()
    }

    pub fn status(&self) -> ModelStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_completed(&self) -> bool {
        self.status == ModelStatus::Completed
    }

    /// Overwrite the status. Leaving `completed` drops the metrics and any
    /// status other than `failed` drops the error. `completed` itself is
    /// only reachable through [`ModelRecord::complete`].
    pub(crate) fn apply_status(&mut self, status: ModelStatus, error: Option<String>) {
        debug_assert_ne!(status, ModelStatus::Completed);

        self.status = status;
        self.metrics = None;

        if status == ModelStatus::Failed {
            if let Some(error) = error {
                self.error = Some(error);
            }
        } else {
            self.error = None;
        }
    }

    /// Attach metrics and mark the record completed
    pub(crate) fn complete(&mut self, metrics: BenchmarkMetrics) {
        self.metrics = Some(metrics);
        self.status = ModelStatus::Completed;
        self.error = None;
    }

    #[cfg(test)]
    pub(crate) fn set_uploaded_at(&mut self, uploaded_at: DateTime<Utc>) {
        self.uploaded_at = uploaded_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metrics() -> BenchmarkMetrics {
        BenchmarkMetrics {
            accuracy: 0.92,
            inference_time: 21.5,
            memory_usage: 120.0,
            parameters: 1.4,
            flops: 3.2,
        }
    }

    #[test]
    fn test_model_id_generate() {
        let id = ModelId::generate();
        assert!(id.as_str().starts_with("model-"));
        assert_eq!(id.as_str().len(), MAX_ID_LENGTH);
    }

    #[test]
    fn test_model_id_valid() {
        assert!(ModelId::new("model-12345678-1234-1234-1234-123456789abc").is_ok());
    }

    #[test]
    fn test_model_id_invalid() {
        assert!(ModelId::new("").is_err());
        assert!(ModelId::new("invalid").is_err());
        assert!(ModelId::new("model-invalid").is_err());
        assert!(ModelId::new("op-12345678-1234-1234-1234-123456789abc").is_err());
    }

    #[test]
    fn test_model_id_serialization() {
        let id = ModelId::generate();
        let json = serde_json::to_string(&id).unwrap();
        assert!(json.starts_with("\"model-"));

        let deserialized: ModelId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_format_from_filename() {
        assert_eq!(ModelFormat::from_filename("resnet.pt"), ModelFormat::Pt);
        assert_eq!(ModelFormat::from_filename("keras_model.H5"), ModelFormat::H5);
        assert_eq!(ModelFormat::from_filename("net.onnx"), ModelFormat::Onnx);
        assert_eq!(ModelFormat::from_filename("graph.pb"), ModelFormat::Pb);
        assert_eq!(ModelFormat::from_filename("mobile.tflite"), ModelFormat::Tflite);
        assert_eq!(ModelFormat::from_filename("archive.tar.onnx"), ModelFormat::Onnx);
    }

    #[test]
    fn test_format_unknown_degrades_to_other() {
        assert_eq!(ModelFormat::from_filename("weights.pth"), ModelFormat::Other);
        assert_eq!(ModelFormat::from_filename("weights.bin"), ModelFormat::Other);
        assert_eq!(ModelFormat::from_filename("no_extension"), ModelFormat::Other);
        assert_eq!(ModelFormat::from_filename(""), ModelFormat::Other);
    }

    #[test]
    fn test_format_label() {
        assert_eq!(ModelFormat::Tflite.label(), "TFLITE");
        assert_eq!(ModelFormat::Other.label(), "OTHER");
    }

    #[test]
    fn test_accepted_extensions() {
        assert!(is_accepted_extension("model.pth"));
        assert!(is_accepted_extension("model.ONNX"));
        assert!(!is_accepted_extension("model.bin"));
        assert!(!is_accepted_extension("model"));
    }

    #[test]
    fn test_status_transitions() {
        assert!(ModelStatus::Uploading.can_transition_to(ModelStatus::Uploaded));
        assert!(ModelStatus::Uploaded.can_transition_to(ModelStatus::Benchmarking));
        assert!(ModelStatus::Benchmarking.can_transition_to(ModelStatus::Completed));
        assert!(ModelStatus::Benchmarking.can_transition_to(ModelStatus::Failed));

        assert!(!ModelStatus::Uploading.can_transition_to(ModelStatus::Completed));
        assert!(!ModelStatus::Uploaded.can_transition_to(ModelStatus::Failed));
        assert!(!ModelStatus::Completed.can_transition_to(ModelStatus::Benchmarking));
        assert!(!ModelStatus::Failed.can_transition_to(ModelStatus::Uploading));
    }

    #[test]
    fn test_status_in_progress() {
        assert!(ModelStatus::Uploading.is_in_progress());
        assert!(ModelStatus::Benchmarking.is_in_progress());
        assert!(!ModelStatus::Uploaded.is_in_progress());
        assert!(!ModelStatus::Completed.is_in_progress());
        assert!(ModelStatus::Failed.is_terminal());
    }

    #[test]
    fn test_new_record() {
        let record = ModelRecord::new("net.onnx", ModelFormat::Onnx, 1024);

        assert_eq!(record.status(), ModelStatus::Uploading);
        assert!(record.metrics().is_none());
        assert!(record.error().is_none());
        assert_eq!(record.name(), "net.onnx");
        assert_eq!(record.size(), 1024);
    }

    #[test]
    fn test_leaving_completed_drops_metrics() {
        let mut record = ModelRecord::new("net.onnx", ModelFormat::Onnx, 1024);
        record.complete(sample_metrics());
        assert!(record.metrics().is_some());

        record.apply_status(ModelStatus::Failed, Some("late failure".to_string()));
        assert!(record.metrics().is_none());
        assert_eq!(record.error(), Some("late failure"));
    }

    #[test]
    fn test_failed_keeps_prior_error_without_new_one() {
        let mut record = ModelRecord::new("net.onnx", ModelFormat::Onnx, 1024);
        record.apply_status(ModelStatus::Failed, Some("boom".to_string()));
        record.apply_status(ModelStatus::Failed, None);

        assert_eq!(record.error(), Some("boom"));
    }

    #[test]
    fn test_non_failed_status_clears_error() {
        let mut record = ModelRecord::new("net.onnx", ModelFormat::Onnx, 1024);
        record.apply_status(ModelStatus::Failed, Some("boom".to_string()));
        record.apply_status(ModelStatus::Benchmarking, Some("ignored".to_string()));

        assert!(record.error().is_none());
    }

    #[test]
    fn test_record_serialization() {
        let record = ModelRecord::new("net.onnx", ModelFormat::Onnx, 1024);
        let json = serde_json::to_string(&record).unwrap();

        assert!(json.contains("\"status\":\"uploading\""));
        assert!(json.contains("\"file_type\":\"onnx\""));
        assert!(!json.contains("metrics"));
        assert!(!json.contains("error"));
    }
}
