//! Infrastructure services

mod benchmark_service;
mod model_service;
mod report_service;

pub use benchmark_service::{
    BenchmarkJob, BenchmarkService, BenchmarkServiceConfig, BenchmarkServiceTrait,
};
pub use model_service::{ModelService, ModelServiceTrait};
pub use report_service::{
    RenderedReport, ReportKind, ReportService, ReportServiceConfig, ReportServiceTrait,
};
