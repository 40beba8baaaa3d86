//! Date handling for crash timestamps and build identities
//!
//! Two textual date shapes appear in a fatal error log: the crash time in
//! ctime form ("Tue Aug  4 09:18:23 2020") and the vm_info build stamp
//! ("Apr 14 2020 14:55:17"). Malformed fields parse to None; the record
//! keeps its raw line either way.

use chrono::{NaiveDate, NaiveDateTime};

/// Parse a ctime-style crash timestamp, e.g. "Tue Aug  4 09:18:23 2020".
/// Trailing timezone abbreviations are tolerated and ignored.
pub fn parse_crash_time(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();

    // Take the leading "Www Mmm dd HH:MM:SS yyyy" portion; anything after the
    // year (timezone name, elapsed-time tail) is not part of the timestamp.
    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    if fields.len() < 5 {
        return None;
    }
    let candidate = fields[..5].join(" ");

    NaiveDateTime::parse_from_str(&candidate, "%a %b %d %H:%M:%S %Y").ok()
}

/// Parse a vm_info build stamp: "Apr 14 2020 14:55:17", "Sep 19 2023", or
/// the ISO form some builds emit ("2023-10-14T01:03:36Z").
pub fn parse_build_timestamp(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%b %d %Y %H:%M:%S") {
        return Some(dt);
    }

    if let Ok(d) = NaiveDate::parse_from_str(trimmed, "%b %d %Y") {
        return d.and_hms_opt(0, 0, 0);
    }

    NaiveDateTime::parse_from_str(trimmed.trim_end_matches('Z'), "%Y-%m-%dT%H:%M:%S").ok()
}

/// Whole-day difference between two calendar dates, time-of-day ignored.
/// The result is signed; callers interpret the sign.
pub fn day_diff(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}
