use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

use crate::messages::Locale;
use crate::types::AnalysisStatus;

/// Shown wherever the server has not provided a value.
pub const PLACEHOLDER: &str = "-";

const SIZE_UNITS: &[&str] = &["Bytes", "KB", "MB", "GB"];

/// Human-readable byte count, e.g. "1.5 KB", "10 MB".
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut exp = 0;
    let mut scale = 1u64;
    while exp + 1 < SIZE_UNITS.len() && bytes >= scale * 1024 {
        scale *= 1024;
        exp += 1;
    }
    let value = bytes as f64 / scale as f64;
    format!("{} {}", trim_decimals(value), SIZE_UNITS[exp])
}

/// Two decimals, trailing zeros dropped.
fn trim_decimals(value: f64) -> String {
    let s = format!("{value:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Render a server timestamp as day/month/year hour:minute in the viewer's
/// time zone.
///
/// Accepts RFC 3339 and the naive ISO form the backend emits; anything else
/// is returned unchanged.
pub fn format_date(timestamp: &str, locale: Locale) -> String {
    format_date_in(timestamp, locale, &Local)
}

/// [`format_date`] against an explicit zone. Zoned timestamps are converted
/// into `tz`; naive ones are already wall-clock time and shown as sent.
pub fn format_date_in<Tz>(timestamp: &str, locale: Locale, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let pattern = match locale {
        Locale::PtBr => "%d/%m/%Y %H:%M",
        Locale::En => "%Y-%m-%d %H:%M",
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return dt.with_timezone(tz).format(pattern).to_string();
    }
    for naive in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, naive) {
            return dt.format(pattern).to_string();
        }
    }
    timestamp.to_string()
}

pub fn format_bpm(bpm: Option<f64>) -> String {
    match bpm {
        Some(b) => format!("{}", b.round() as i64),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn format_lufs(lufs: Option<f64>) -> String {
    match lufs {
        Some(l) => format!("{l:.2} LUFS"),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn format_key(key: Option<&str>) -> String {
    match key {
        Some(k) if !k.is_empty() => k.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Statistics averages: two decimals or the placeholder.
pub fn format_average(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => PLACEHOLDER.to_string(),
    }
}

/// CSS class for a status badge.
pub fn status_class(status: AnalysisStatus) -> &'static str {
    match status {
        AnalysisStatus::Pending => "badge badge-pending",
        AnalysisStatus::Processing => "badge badge-processing",
        AnalysisStatus::Completed => "badge badge-completed",
        AnalysisStatus::Failed => "badge badge-failed",
    }
}
