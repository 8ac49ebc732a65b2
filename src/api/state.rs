//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::services::{
    BenchmarkServiceTrait, ModelServiceTrait, ReportServiceTrait,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone, Debug)]
pub struct AppState {
    pub model_service: Arc<dyn ModelServiceTrait>,
    pub benchmark_service: Arc<dyn BenchmarkServiceTrait>,
    pub report_service: Arc<dyn ReportServiceTrait>,
}

impl AppState {
    pub fn new(
        model_service: Arc<dyn ModelServiceTrait>,
        benchmark_service: Arc<dyn BenchmarkServiceTrait>,
        report_service: Arc<dyn ReportServiceTrait>,
    ) -> Self {
        Self {
            model_service,
            benchmark_service,
            report_service,
        }
    }
}
