//! Reusable formatting utilities for CLI output
//!
//! Timestamps from the platform come in two flavours: Unix seconds (agents)
//! and Unix milliseconds (networks). Both are rendered in local time.

use chrono::{DateTime, Local, TimeZone, Utc};

/// Date of a Unix timestamp (seconds) in local time, `YYYY-MM-DD`.
///
/// A missing timestamp is rendered as the epoch, like the web console does
/// for agents that never reported.
pub fn format_epoch_date(seconds: Option<i64>) -> String {
    match Local.timestamp_opt(seconds.unwrap_or(0), 0) {
        chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d").to_string(),
        chrono::LocalResult::Ambiguous(dt, _) => dt.format("%Y-%m-%d").to_string(),
        chrono::LocalResult::None => "N/A".to_string(),
    }
}

/// Format a Unix timestamp (milliseconds) as local date/time.
///
/// Returns "N/A" if the timestamp is missing or zero.
///
/// # Example output
/// `2025-01-15 14:30`
pub fn format_millis_local(millis: Option<i64>) -> String {
    let millis = millis.unwrap_or(0);
    if millis == 0 {
        return "N/A".to_string();
    }

    match Utc.timestamp_millis_opt(millis) {
        chrono::LocalResult::Single(dt) => dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        _ => "N/A".to_string(),
    }
}

/// Compact timestamp used in report file names, e.g. `20221011185200`.
pub fn file_stamp(now: DateTime<Local>) -> String {
    now.format("%Y%m%d%H%M%S").to_string()
}

/// "yes" / "no" for optional flags.
pub fn yes_no(flag: Option<bool>) -> &'static str {
    if flag.unwrap_or(false) { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_epoch_date() {
        let noon = Local.with_ymd_and_hms(2022, 10, 11, 12, 0, 0).unwrap();
        assert_eq!(format_epoch_date(Some(noon.timestamp())), "2022-10-11");
    }

    #[test]
    fn test_format_epoch_date_missing_is_epoch() {
        let expected = Local
            .timestamp_opt(0, 0)
            .unwrap()
            .format("%Y-%m-%d")
            .to_string();
        assert_eq!(format_epoch_date(None), expected);
    }

    #[test]
    fn test_format_millis_local() {
        assert_eq!(format_millis_local(None), "N/A");
        assert_eq!(format_millis_local(Some(0)), "N/A");

        let dt = Local.with_ymd_and_hms(2025, 1, 15, 14, 30, 0).unwrap();
        assert_eq!(
            format_millis_local(Some(dt.timestamp_millis())),
            "2025-01-15 14:30"
        );
    }

    #[test]
    fn test_file_stamp() {
        let dt = Local.with_ymd_and_hms(2022, 10, 11, 18, 52, 7).unwrap();
        assert_eq!(file_stamp(dt), "20221011185207");
    }

    #[test]
    fn test_yes_no() {
        assert_eq!(yes_no(Some(true)), "yes");
        assert_eq!(yes_no(None), "no");
    }
}
