//! Multi-model comparison report

use chrono::{DateTime, Utc};

use super::error::ReportError;
use super::layout::{Column, LayoutBuilder, ReportLayout, TextStyle, MARGIN_MM};
use super::single::TIMESTAMP_FORMAT;
use crate::domain::model::{BenchmarkMetrics, ModelRecord};

pub const COMPARISON_REPORT_TITLE: &str = "AI Model Comparison Report";
pub const COMPARISON_REPORT_FOOTER: &str = "AI Model Benchmarking Tool - Comparison Report";

/// A record paired with its metrics
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    pub record: &'a ModelRecord,
    pub metrics: &'a BenchmarkMetrics,
}

/// Best record per category. Ties go to the earliest record.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonSummary<'a> {
    pub best_accuracy: Entry<'a>,
    pub fastest_inference: Entry<'a>,
    pub lowest_memory: Entry<'a>,
}

impl<'a> ComparisonSummary<'a> {
    /// Fails on an empty input or on any record without metrics
    pub fn from_records(records: &'a [ModelRecord]) -> Result<Self, ReportError> {
        let entries = entries(records)?;
        let first = *entries
            .first()
            .ok_or_else(|| ReportError::empty_selection(1, 0))?;

        let mut summary = Self {
            best_accuracy: first,
            fastest_inference: first,
            lowest_memory: first,
        };

        for entry in entries.into_iter().skip(1) {
            if entry.metrics.accuracy > summary.best_accuracy.metrics.accuracy {
                summary.best_accuracy = entry;
            }
            if entry.metrics.inference_time < summary.fastest_inference.metrics.inference_time {
                summary.fastest_inference = entry;
            }
            if entry.metrics.memory_usage < summary.lowest_memory.metrics.memory_usage {
                summary.lowest_memory = entry;
            }
        }

        Ok(summary)
    }
}

fn entries(records: &[ModelRecord]) -> Result<Vec<Entry<'_>>, ReportError> {
    records
        .iter()
        .map(|record| {
            record
                .metrics()
                .map(|metrics| Entry { record, metrics })
                .ok_or_else(|| ReportError::incomplete_data(record.name()))
        })
        .collect()
}

fn comparison_row(entry: &Entry<'_>) -> Vec<String> {
    vec![
        entry.record.name().to_string(),
        entry.record.file_type().label(),
        format!("{:.2}%", entry.metrics.accuracy_percent()),
        format!("{:.2}ms", entry.metrics.inference_time),
        format!("{:.2}MB", entry.metrics.memory_usage),
    ]
}

/// Lay out a side-by-side report of completed models, in input order
pub fn layout_comparison_report(
    records: &[ModelRecord],
    generated_at: DateTime<Utc>,
) -> Result<ReportLayout, ReportError> {
    let summary = ComparisonSummary::from_records(records)?;
    let rows: Vec<Vec<String>> = entries(records)?.iter().map(comparison_row).collect();

    let mut builder = LayoutBuilder::new(COMPARISON_REPORT_TITLE);
    builder.centered_text(COMPARISON_REPORT_TITLE, 20.0, TextStyle::TITLE);

    builder
        .text("Comparison Overview", MARGIN_MM, 40.0, TextStyle::HEADING)
        .text(
            format!("Models Compared: {}", records.len()),
            MARGIN_MM,
            50.0,
            TextStyle::BODY,
        )
        .text(
            format!("Report Generated: {}", generated_at.format(TIMESTAMP_FORMAT)),
            MARGIN_MM,
            58.0,
            TextStyle::BODY,
        );

    let columns = [
        Column {
            header: "Model Name",
            width: 55.0,
        },
        Column {
            header: "Type",
            width: 20.0,
        },
        Column {
            header: "Accuracy",
            width: 30.0,
        },
        Column {
            header: "Inference Time",
            width: 35.0,
        },
        Column {
            header: "Memory Usage",
            width: 30.0,
        },
    ];
    let table_end = builder.table(70.0, &columns, &rows) + 20.0;

    let y = builder.reserve(table_end, 40.0);
    builder
        .text("Performance Summary", MARGIN_MM, y, TextStyle::HEADING)
        .text(
            "Best performing models by category:",
            MARGIN_MM,
            y + 10.0,
            TextStyle::BODY,
        )
        .text(
            format!(
                "\u{2022} Best Accuracy: {} ({:.2}%)",
                summary.best_accuracy.record.name(),
                summary.best_accuracy.metrics.accuracy_percent()
            ),
            MARGIN_MM,
            y + 20.0,
            TextStyle::BODY,
        )
        .text(
            format!(
                "\u{2022} Fastest Inference: {} ({:.2}ms)",
                summary.fastest_inference.record.name(),
                summary.fastest_inference.metrics.inference_time
            ),
            MARGIN_MM,
            y + 30.0,
            TextStyle::BODY,
        )
        .text(
            format!(
                "\u{2022} Lowest Memory: {} ({:.2}MB)",
                summary.lowest_memory.record.name(),
                summary.lowest_memory.metrics.memory_usage
            ),
            MARGIN_MM,
            y + 40.0,
            TextStyle::BODY,
        );

    Ok(builder.finish_with_footer(COMPARISON_REPORT_FOOTER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ModelFormat;
    use chrono::TimeZone;

    fn completed(name: &str, accuracy: f64, inference_time: f64, memory_usage: f64) -> ModelRecord {
        let mut record = ModelRecord::new(name, ModelFormat::from_filename(name), 2048);
        record.complete(BenchmarkMetrics {
            accuracy,
            inference_time,
            memory_usage,
            parameters: 1.0,
            flops: 2.0,
        });
        record
    }

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_selection() {
        let err = layout_comparison_report(&[], generated_at()).unwrap_err();
        assert!(matches!(err, ReportError::EmptySelection { .. }));
    }

    #[test]
    fn test_record_without_metrics() {
        let records = vec![
            completed("a.pt", 0.9, 20.0, 100.0),
            ModelRecord::new("pending.h5", ModelFormat::H5, 1024),
        ];

        let err = layout_comparison_report(&records, generated_at()).unwrap_err();
        assert_eq!(err, ReportError::incomplete_data("pending.h5"));
    }

    #[test]
    fn test_summary_categories_are_independent() {
        let records = vec![
            completed("a.pt", 0.91, 12.0, 300.0),
            completed("b.onnx", 0.95, 40.0, 250.0),
            completed("c.h5", 0.93, 25.0, 90.0),
        ];

        let summary = ComparisonSummary::from_records(&records).unwrap();
        assert_eq!(summary.best_accuracy.record.name(), "b.onnx");
        assert_eq!(summary.fastest_inference.record.name(), "a.pt");
        assert_eq!(summary.lowest_memory.record.name(), "c.h5");
    }

    #[test]
    fn test_summary_ties_go_to_first_record() {
        let records = vec![
            completed("first.pt", 0.92, 20.0, 100.0),
            completed("second.pt", 0.92, 20.0, 100.0),
        ];

        let summary = ComparisonSummary::from_records(&records).unwrap();
        assert_eq!(summary.best_accuracy.record.name(), "first.pt");
        assert_eq!(summary.fastest_inference.record.name(), "first.pt");
        assert_eq!(summary.lowest_memory.record.name(), "first.pt");
    }

    #[test]
    fn test_single_record_comparison() {
        let records = vec![completed("only.tflite", 0.88, 30.0, 60.0)];
        let layout = layout_comparison_report(&records, generated_at()).unwrap();

        assert!(layout.contains_text("Models Compared: 1"));
        assert!(layout.contains_text("Best Accuracy: only.tflite (88.00%)"));
    }

    #[test]
    fn test_layout_rows_and_summary() {
        let records = vec![
            completed("a.pt", 0.91, 12.5, 300.0),
            completed("b.onnx", 0.95, 40.0, 250.0),
        ];
        let layout = layout_comparison_report(&records, generated_at()).unwrap();

        assert_eq!(layout.title, COMPARISON_REPORT_TITLE);
        assert!(layout.contains_text("Models Compared: 2"));
        assert!(layout.contains_text("Report Generated: 2024-03-01 09:00:00 UTC"));
        assert!(layout.contains_text("ONNX"));
        assert!(layout.contains_text("12.50ms"));
        assert!(layout.contains_text("Fastest Inference: a.pt (12.50ms)"));
        assert!(layout.contains_text("Lowest Memory: b.onnx (250.00MB)"));
        assert!(layout.contains_text(COMPARISON_REPORT_FOOTER));
    }

    #[test]
    fn test_many_models_paginate() {
        let records: Vec<ModelRecord> = (0..40)
            .map(|i| completed(&format!("model-{i}.pt"), 0.9, 20.0, 100.0))
            .collect();

        let layout = layout_comparison_report(&records, generated_at()).unwrap();
        assert!(layout.page_count() >= 2);
        assert!(layout.contains_text("model-39.pt"));
        assert!(layout.contains_text("Performance Summary"));
    }
}
