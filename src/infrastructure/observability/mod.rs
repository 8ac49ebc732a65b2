//! Observability infrastructure - Prometheus metrics

mod metrics;

pub use metrics::{
    create_metrics_router, init_metrics, record_benchmark, record_http_request,
    record_model_registered, record_report_generated, PrometheusMetrics,
};
