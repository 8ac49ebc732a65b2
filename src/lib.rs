//! PMP Model Bench
//!
//! Backend for a model benchmarking dashboard:
//! - An in-process model registry with status tracking and selection
//! - A mock benchmark pipeline producing synthetic metrics
//! - PDF reports for single models and side-by-side comparisons
//!
//! Served over HTTP (`serve`) or driven from the command line (`bench`).

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::benchmark::MetricSynthesizer;
use infrastructure::benchmark::{RandomMetricSynthesizer, SynthesizerConfig};
use infrastructure::registry::InMemoryModelStore;
use infrastructure::report::PdfEncoder;
use infrastructure::services::{
    BenchmarkService, BenchmarkServiceConfig, ModelService, ReportService, ReportServiceConfig,
};
use tracing::info;

/// Create the application state with default configuration
pub fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default())
}

/// Create the application state with custom configuration.
///
/// All services share one registry so uploads, selection and reports see the
/// same models.
pub fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    config.validate()?;

    let store = Arc::new(InMemoryModelStore::new());
    let synthesizer: Arc<dyn MetricSynthesizer> = Arc::new(RandomMetricSynthesizer::new(
        SynthesizerConfig::from(&config.benchmark),
    ));

    let model_service = Arc::new(ModelService::new(store.clone()));
    let benchmark_service = Arc::new(BenchmarkService::with_config(
        store.clone(),
        synthesizer,
        BenchmarkServiceConfig::from(&config.benchmark),
    ));
    let report_service = Arc::new(ReportService::with_config(
        store,
        PdfEncoder::new(),
        ReportServiceConfig::from(&config.reports),
    ));

    info!(
        upload_delay_ms = config.benchmark.upload_delay_ms,
        failure_rate = config.benchmark.failure_rate,
        "Application state initialized"
    );

    Ok(AppState::new(model_service, benchmark_service, report_service))
}
