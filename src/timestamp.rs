//! Wall-clock timestamps for markers and note files.
//!
//! Uses `web-time` so the same code runs on native and WASM. Times are UTC.

use web_time::{SystemTime, UNIX_EPOCH};

/// Seconds since the Unix epoch, now.
fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Current time as ISO 8601 (`YYYY-MM-DDTHH:MM:SSZ`), used in note headers.
pub fn now_iso8601() -> String {
    format_iso8601(now_secs())
}

/// Current time as `YYYY-MM-DD HH:MM:SS`, used for marker create/update times.
pub fn now_display() -> String {
    format_display(now_secs())
}

pub fn format_iso8601(secs: u64) -> String {
    let (year, month, day, hours, mins, secs) = split(secs);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year, month, day, hours, mins, secs
    )
}

pub fn format_display(secs: u64) -> String {
    let (year, month, day, hours, mins, secs) = split(secs);
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        year, month, day, hours, mins, secs
    )
}

fn split(secs: u64) -> (u32, u32, u32, u64, u64, u64) {
    let days_since_epoch = secs / 86400;
    let secs_today = secs % 86400;
    let (year, month, day) = days_to_ymd(days_since_epoch);
    (
        year,
        month,
        day,
        secs_today / 3600,
        (secs_today % 3600) / 60,
        secs_today % 60,
    )
}

/// Civil date for a day count since 1970-01-01 (proleptic Gregorian).
///
/// Counts in 400-year eras starting on 0000-03-01, so the leap day is the
/// last day of each shifted year and months follow a fixed 153-day pattern.
fn days_to_ymd(days: u64) -> (u32, u32, u32) {
    let shifted = days + 719_468;
    let era = shifted / 146_097;
    let day_of_era = shifted % 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    // March-based month index, 0..=11
    let mp = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = era * 400 + year_of_era + u64::from(month <= 2);
    (year as u32, month as u32, day as u32)
}
