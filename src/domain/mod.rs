//! Domain layer - Core business logic and entities

pub mod benchmark;
pub mod error;
pub mod model;
pub mod registry;
pub mod report;

pub use benchmark::{compute_metrics, BaseDraws, MetricSynthesizer, SynthesisError};
pub use error::DomainError;
pub use model::{
    format_file_size, format_upload_age, report_file_name, validate_model_id, BenchmarkMetrics,
    ModelFormat, ModelId, ModelRecord, ModelStatus, COMPARISON_REPORT_FILE_NAME,
};
pub use registry::{
    ModelRegistry, ModelStore, RegistryError, RegistryEvent, RegistryStats, SortDirection,
    SortField,
};
pub use report::{
    ComparisonSummary, DocumentEncoder, Recommendation, ReportError, ReportLayout, ReportRenderer,
};
