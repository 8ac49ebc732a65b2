//! Single-model performance report

use chrono::{DateTime, Utc};

use super::error::ReportError;
use super::layout::{
    approx_text_width, Color, Column, LayoutBuilder, ReportLayout, TextStyle, MARGIN_MM,
    PAGE_WIDTH_MM,
};
use crate::domain::model::{format_file_size, BenchmarkMetrics, ModelRecord};

pub const SINGLE_REPORT_TITLE: &str = "AI Model Benchmark Report";
pub const SINGLE_REPORT_FOOTER: &str = "AI Model Benchmarking Tool - Performance Report";

/// Bars are drawn at this many millimetres per normalized unit
pub const BAR_SCALE_MM: f64 = 1.5;

/// Normalized bar values never exceed this
pub const BAR_MAX: f64 = 100.0;

const BAR_X_MM: f64 = 60.0;
const BAR_HEIGHT_MM: f64 = 10.0;
const BAR_SPACING_MM: f64 = 20.0;
const RECOMMENDATIONS_Y_MM: f64 = 230.0;
const RECOMMENDATION_LINE_MM: f64 = 8.0;

pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

const INFERENCE_TIME_THRESHOLD_MS: f64 = 50.0;
const MEMORY_USAGE_THRESHOLD_MB: f64 = 200.0;
const ACCURACY_THRESHOLD: f64 = 0.90;

/// Advice derived from a model's metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Quantization,
    Pruning,
    ArchitectureReview,
    Optimal,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::Quantization => "Consider model quantization to reduce inference time",
            Recommendation::Pruning => "Model pruning could reduce memory footprint",
            Recommendation::ArchitectureReview => {
                "Evaluate model architecture for improved accuracy"
            }
            Recommendation::Optimal => "Model performance is within optimal parameters",
        }
    }
}

/// Every recommendation that applies, or [`Recommendation::Optimal`] alone
pub fn recommendations(metrics: &BenchmarkMetrics) -> Vec<Recommendation> {
    let mut advice = Vec::new();

    if metrics.inference_time > INFERENCE_TIME_THRESHOLD_MS {
        advice.push(Recommendation::Quantization);
    }
    if metrics.memory_usage > MEMORY_USAGE_THRESHOLD_MB {
        advice.push(Recommendation::Pruning);
    }
    if metrics.accuracy < ACCURACY_THRESHOLD {
        advice.push(Recommendation::ArchitectureReview);
    }

    if advice.is_empty() {
        advice.push(Recommendation::Optimal);
    }

    advice
}

/// One bar of the visualization section
#[derive(Debug, Clone, PartialEq)]
pub struct MetricBar {
    pub label: &'static str,
    /// Position on a 0-100 scale
    pub normalized: f64,
    pub value_text: String,
    pub color: Color,
}

impl MetricBar {
    pub fn width(&self) -> f64 {
        self.normalized * BAR_SCALE_MM
    }
}

/// Accuracy as a percentage, inference over 0-100 ms and memory over
/// 0-1000 MB, each capped at 100
pub fn metric_bars(metrics: &BenchmarkMetrics) -> [MetricBar; 3] {
    let accuracy = metrics.accuracy_percent();

    [
        MetricBar {
            label: "Accuracy",
            normalized: accuracy.min(BAR_MAX),
            value_text: format!("{:.2}%", accuracy),
            color: Color::BLUE,
        },
        MetricBar {
            label: "Inference",
            normalized: metrics.inference_time.min(BAR_MAX),
            value_text: format!("{:.2}ms", metrics.inference_time),
            color: Color::GREEN,
        },
        MetricBar {
            label: "Memory",
            normalized: (metrics.memory_usage / 10.0).min(BAR_MAX),
            value_text: format!("{:.2}MB", metrics.memory_usage),
            color: Color::RED,
        },
    ]
}

fn metrics_rows(metrics: &BenchmarkMetrics) -> Vec<Vec<String>> {
    let row = |name: &str, value: f64, unit: &str, description: &str| {
        vec![
            name.to_string(),
            format!("{:.2}", value),
            unit.to_string(),
            description.to_string(),
        ]
    };

    vec![
        row("Accuracy", metrics.accuracy_percent(), "%", "Model prediction accuracy"),
        row("Inference Time", metrics.inference_time, "ms", "Average inference latency"),
        row("Memory Usage", metrics.memory_usage, "MB", "GPU memory consumption"),
        row("Parameters", metrics.parameters, "M", "Total model parameters"),
        row("FLOPS", metrics.flops, "B", "Floating point ops per second"),
    ]
}

/// Value labels sit right of their bar but never past the right margin
fn value_label_x(bar: &MetricBar) -> f64 {
    let right_edge =
        PAGE_WIDTH_MM - MARGIN_MM - approx_text_width(&bar.value_text, TextStyle::BODY.size);
    (BAR_X_MM + bar.width() + 5.0).min(right_edge)
}

/// Lay out the performance report of one completed model
pub fn layout_single_report(
    record: &ModelRecord,
    generated_at: DateTime<Utc>,
) -> Result<ReportLayout, ReportError> {
    let metrics = record
        .metrics()
        .ok_or_else(|| ReportError::incomplete_data(record.name()))?;

    let mut builder = LayoutBuilder::new(SINGLE_REPORT_TITLE);
    builder.centered_text(SINGLE_REPORT_TITLE, 20.0, TextStyle::TITLE);

    builder.text("Model Information", MARGIN_MM, 40.0, TextStyle::HEADING);
    builder
        .text(format!("Model Name: {}", record.name()), MARGIN_MM, 50.0, TextStyle::BODY)
        .text(
            format!("Model Type: {}", record.file_type().label()),
            MARGIN_MM,
            58.0,
            TextStyle::BODY,
        )
        .text(
            format!("Model Size: {}", format_file_size(record.size())),
            MARGIN_MM,
            66.0,
            TextStyle::BODY,
        )
        .text(
            format!("Report Generated: {}", generated_at.format(TIMESTAMP_FORMAT)),
            MARGIN_MM,
            74.0,
            TextStyle::BODY,
        );

    builder.text("Key Performance Metrics", MARGIN_MM, 90.0, TextStyle::HEADING);
    let columns = [
        Column {
            header: "Metric",
            width: 35.0,
        },
        Column {
            header: "Value",
            width: 25.0,
        },
        Column {
            header: "Unit",
            width: 20.0,
        },
        Column {
            header: "Description",
            width: 90.0,
        },
    ];
    let table_end = builder.table(95.0, &columns, &metrics_rows(metrics)) + 15.0;

    builder.text("Performance Visualization", MARGIN_MM, table_end, TextStyle::HEADING);
    builder.text(
        "Comparative performance across key metrics:",
        MARGIN_MM,
        table_end + 10.0,
        TextStyle::BODY,
    );

    let mut bar_y = table_end + 20.0;
    for bar in metric_bars(metrics) {
        let label_y = bar_y + 7.0;
        let value_x = value_label_x(&bar);
        builder
            .rect(BAR_X_MM, bar_y, bar.width(), BAR_HEIGHT_MM, bar.color)
            .text(bar.label, MARGIN_MM, label_y, TextStyle::BODY)
            .text(bar.value_text.clone(), value_x, label_y, TextStyle::BODY);
        bar_y += BAR_SPACING_MM;
    }

    let last_bar_bottom = bar_y - BAR_SPACING_MM + BAR_HEIGHT_MM;
    let advice = recommendations(metrics);
    let section_height = RECOMMENDATION_LINE_MM * (advice.len() as f64 + 1.0);
    let heading_y = builder.reserve(
        RECOMMENDATIONS_Y_MM.max(last_bar_bottom + 2.0),
        section_height,
    );

    builder.text("Recommendations", MARGIN_MM, heading_y, TextStyle::SUBHEADING);
    for (index, item) in advice.iter().enumerate() {
        let y = heading_y + 10.0 + index as f64 * RECOMMENDATION_LINE_MM;
        builder.text(format!("\u{2022} {}", item.message()), MARGIN_MM, y, TextStyle::DETAIL);
    }

    Ok(builder.finish_with_footer(SINGLE_REPORT_FOOTER))
}
