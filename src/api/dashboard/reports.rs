//! Report download handlers

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::infrastructure::services::RenderedReport;

/// Bytes allowed unescaped in an RFC 5987 `filename*` value
fn is_attr_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || b"!#$&+-.^_`|~".contains(&byte)
}

/// Build a `Content-Disposition` value for any report file name.
///
/// The quoted `filename` only carries printable ASCII, with `"` and `\` escaped
/// and everything else replaced by `_`. When the name had to be altered the
/// exact name follows as an RFC 6266 `filename*` parameter.
fn content_disposition(file_name: &str) -> String {
    let mut fallback = String::with_capacity(file_name.len());
    let mut altered = false;

    for c in file_name.chars() {
        match c {
            '"' | '\\' => {
                fallback.push('\\');
                fallback.push(c);
                altered = true;
            }
            ' '..='~' => fallback.push(c),
            _ => {
                fallback.push('_');
                altered = true;
            }
        }
    }

    let mut value = format!("attachment; filename=\"{}\"", fallback);
    if altered {
        value.push_str("; filename*=UTF-8''");
        for byte in file_name.bytes() {
            if is_attr_char(byte) {
                value.push(byte as char);
            } else {
                value.push_str(&format!("%{:02X}", byte));
            }
        }
    }

    value
}

/// Serve a rendered report as a download
fn attachment(report: RenderedReport) -> Result<Response, ApiError> {
    let disposition = HeaderValue::from_str(&content_disposition(&report.file_name))
        .map_err(|e| ApiError::internal(format!("Invalid report file name: {}", e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(report.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.content,
    )
        .into_response())
}

/// GET /api/models/{model_id}/report
pub async fn single_report(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
) -> Result<Response, ApiError> {
    let report = state
        .report_service
        .single_report(&model_id)
        .await
        .map_err(ApiError::from)?;

    attachment(report)
}

/// GET /api/reports/comparison
pub async fn comparison_report(State(state): State<AppState>) -> Result<Response, ApiError> {
    let report = state
        .report_service
        .comparison_report()
        .await
        .map_err(ApiError::from)?;

    attachment(report)
}
