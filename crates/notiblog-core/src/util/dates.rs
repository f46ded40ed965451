//! Date labels for post metadata.
//!
//! Remote records carry dates as ISO 8601 strings, either a bare date
//! (`2024-03-15`) or a full timestamp with offset
//! (`2024-03-15T14:30:00.000+09:00`). These helpers parse both and produce
//! the Korean-style labels the blog displays. Missing or unparseable input
//! always yields [`UNKNOWN_DATE`] instead of an error.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};

/// Label shown when a date is missing or cannot be parsed.
pub const UNKNOWN_DATE: &str = "미상";

const WEEKDAYS: [&str; 7] = ["월", "화", "수", "목", "금", "토", "일"];

/// Parse an ISO 8601 date or timestamp.
///
/// Timestamps keep the wall-clock time of their own offset.
pub fn parse_date(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Format as `2024년 3월 15일`.
///
/// ```
/// use notiblog_core::util::dates::format_date;
///
/// assert_eq!(format_date(Some("2024-03-15")), "2024년 3월 15일");
/// assert_eq!(format_date(None), "미상");
/// ```
pub fn format_date(input: Option<&str>) -> String {
    match input.and_then(parse_date) {
        Some(dt) => date_label(&dt),
        None => UNKNOWN_DATE.to_string(),
    }
}

/// Format as `2024년 3월 15일 금요일`.
pub fn format_date_detailed(input: Option<&str>) -> String {
    match input.and_then(parse_date) {
        Some(dt) => {
            let weekday = WEEKDAYS[dt.weekday().num_days_from_monday() as usize];
            format!("{} {weekday}요일", date_label(&dt))
        }
        None => UNKNOWN_DATE.to_string(),
    }
}

/// Format as `2024년 3월 15일 오후 2:30`.
pub fn format_date_time(input: Option<&str>) -> String {
    match input.and_then(parse_date) {
        Some(dt) => {
            let (is_pm, hour) = dt.hour12();
            let meridiem = if is_pm { "오후" } else { "오전" };
            format!(
                "{} {meridiem} {hour}:{:02}",
                date_label(&dt),
                dt.minute()
            )
        }
        None => UNKNOWN_DATE.to_string(),
    }
}

/// Describe how long ago `input` was, relative to `now`.
///
/// Buckets: `오늘`, `어제`, `N일 전` (under a week), `N주 전` (under 30
/// days), `N개월 전` (under a year, 30-day months), `N년 전`. Dates in the
/// future count as today.
///
/// ```
/// use chrono::NaiveDate;
/// use notiblog_core::util::dates::format_relative_time;
///
/// let now = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// assert_eq!(format_relative_time(Some("2024-03-19"), now), "어제");
/// assert_eq!(format_relative_time(Some("2024-03-06"), now), "2주 전");
/// ```
pub fn format_relative_time(input: Option<&str>, now: NaiveDateTime) -> String {
    let Some(then) = input.and_then(parse_date) else {
        return UNKNOWN_DATE.to_string();
    };

    let days = (now - then).num_days().max(0);
    match days {
        0 => "오늘".to_string(),
        1 => "어제".to_string(),
        d if d < 7 => format!("{d}일 전"),
        d if d < 30 => format!("{}주 전", d / 7),
        d if d < 365 => format!("{}개월 전", d / 30),
        d => format!("{}년 전", d / 365),
    }
}

fn date_label(dt: &NaiveDateTime) -> String {
    format!("{}년 {}월 {}일", dt.year(), dt.month(), dt.day())
}
