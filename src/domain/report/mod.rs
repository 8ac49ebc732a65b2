//! Report domain - Layout and rendering of benchmark reports

mod comparison;
mod error;
pub mod layout;
mod renderer;
mod single;

#[cfg(test)]
pub use renderer::MockDocumentEncoder;

pub use comparison::{
    layout_comparison_report, ComparisonSummary, Entry, COMPARISON_REPORT_FOOTER,
    COMPARISON_REPORT_TITLE,
};
pub use error::ReportError;
pub use layout::ReportLayout;
pub use renderer::{DocumentEncoder, ReportRenderer};
pub use single::{
    layout_single_report, metric_bars, recommendations, MetricBar, Recommendation,
    SINGLE_REPORT_FOOTER, SINGLE_REPORT_TITLE,
};
