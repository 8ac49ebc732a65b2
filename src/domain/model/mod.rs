//! Model domain - Registered model files and their benchmark metrics

mod display;
mod entity;
mod metrics;

pub use display::{
    format_file_size, format_upload_age, report_file_name, COMPARISON_REPORT_FILE_NAME,
};
pub use entity::{
    is_accepted_extension, validate_model_id, ModelFormat, ModelId, ModelRecord, ModelStatus,
    ACCEPTED_EXTENSIONS, MAX_ID_LENGTH,
};
pub use metrics::BenchmarkMetrics;
