//! Human-readable formatting for model records

use chrono::{DateTime, Utc};

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Format a byte count with binary units and at most two decimals,
/// e.g. `1536` -> `"1.5 KB"`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{} {}", trim_decimals(value), SIZE_UNITS[unit])
}

fn trim_decimals(value: f64) -> String {
    let fixed = format!("{:.2}", value);

    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

/// Relative age of an upload, e.g. `"5 minutes ago"`.
///
/// Buckets round to the nearest minute the way most "time ago" helpers do;
/// timestamps in the future count as just now.
pub fn format_upload_age(uploaded_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - uploaded_at).num_seconds().max(0);
    let minutes = (seconds + 30) / 60;

    let distance = if seconds < 30 {
        "less than a minute".to_string()
    } else if minutes < 2 {
        "1 minute".to_string()
    } else if minutes < 45 {
        format!("{} minutes", minutes)
    } else if minutes < 90 {
        "about 1 hour".to_string()
    } else if minutes < 1440 {
        format!("about {} hours", (minutes + 30) / 60)
    } else if minutes < 2520 {
        "1 day".to_string()
    } else if minutes < 43_200 {
        format!("{} days", (minutes + 720) / 1440)
    } else if minutes < 86_400 {
        "about 1 month".to_string()
    } else if minutes < 525_600 {
        format!("{} months", (minutes + 21_600) / 43_200)
    } else {
        let years = minutes / 525_600;
        if years == 1 {
            "about 1 year".to_string()
        } else {
            format!("about {} years", years)
        }
    };

    format!("{} ago", distance)
}

/// Download name for a single-model report: the original filename with its
/// last extension stripped, plus `_report.pdf`.
pub fn report_file_name(model_name: &str) -> String {
    let stem = match model_name.rfind('.') {
        Some(pos) => {
            let extension = &model_name[pos + 1..];
            if extension.is_empty() || extension.contains('/') {
                model_name
            } else {
                &model_name[..pos]
            }
        }
        None => model_name,
    };

    format!("{}_report.pdf", stem)
}

/// Download name for a comparison report
pub const COMPARISON_REPORT_FILE_NAME: &str = "model_comparison_report.pdf";

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(10_485_760), "10 MB");
        assert_eq!(format_file_size(1_288_490_189), "1.2 GB");
    }

    #[test]
    fn test_format_file_size_caps_at_gigabytes() {
        assert_eq!(format_file_size(2 * 1024 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn test_format_upload_age() {
        let now = Utc::now();

        assert_eq!(format_upload_age(now, now), "less than a minute ago");
        assert_eq!(format_upload_age(now - Duration::seconds(70), now), "1 minute ago");
        assert_eq!(format_upload_age(now - Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(format_upload_age(now - Duration::minutes(60), now), "about 1 hour ago");
        assert_eq!(format_upload_age(now - Duration::hours(5), now), "about 5 hours ago");
        assert_eq!(format_upload_age(now - Duration::hours(30), now), "1 day ago");
        assert_eq!(format_upload_age(now - Duration::days(3), now), "3 days ago");
        assert_eq!(format_upload_age(now - Duration::days(45), now), "about 1 month ago");
        assert_eq!(format_upload_age(now - Duration::days(400), now), "about 1 year ago");
    }

    #[test]
    fn test_format_upload_age_future_is_now() {
        let now = Utc::now();
        assert_eq!(
            format_upload_age(now + Duration::minutes(3), now),
            "less than a minute ago"
        );
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(report_file_name("resnet50.onnx"), "resnet50_report.pdf");
        assert_eq!(report_file_name("archive.tar.pt"), "archive.tar_report.pdf");
        assert_eq!(report_file_name("no_extension"), "no_extension_report.pdf");
        assert_eq!(report_file_name("trailing."), "trailing._report.pdf");
    }
}
