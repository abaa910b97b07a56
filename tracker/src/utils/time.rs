//! Timestamp helpers
//!
//! Orders carry wall-clock stamps in the fixed `HH:mm DD/MM/YYYY` form.
//! Stamps are plain strings in the records; everything that needs to
//! compare or bucket them goes through the helpers here.

use chrono::{Local, NaiveDate};
use std::cmp::Ordering;

/// Stamp layout written on every mutation
const STAMP_FORMAT: &str = "%H:%M %d/%m/%Y";

/// Current wall-clock stamp, `HH:mm DD/MM/YYYY`
pub fn now_stamp() -> String {
    Local::now().format(STAMP_FORMAT).to_string()
}

/// Today's date token, `DD/MM/YYYY`
pub fn today_token() -> String {
    Local::now().format("%d/%m/%Y").to_string()
}

/// Parse the `DD/MM/YYYY` substring of a stamp into a comparable date.
/// Returns `None` for separators (empty stamp) and malformed input.
pub fn stamp_date(stamp: &str) -> Option<NaiveDate> {
    let date_part = stamp.split(' ').nth(1)?;
    NaiveDate::parse_from_str(date_part, "%d/%m/%Y").ok()
}

/// Lexicographic stamp comparison.
///
/// Compares the raw `HH:mm DD/MM/YYYY` strings, so the order is correct
/// only within a single month and year (day-of-month dominates across
/// boundaries). Kept byte-for-byte compatible with the stored sort
/// behavior; swap this single function to get true chronological order.
pub fn stamp_cmp(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Whole days elapsed since the stamp's date, 0 when unparsable
pub fn days_since(stamp: &str) -> i64 {
    match stamp_date(stamp) {
        Some(date) => {
            let today = Local::now().date_naive();
            (today - date).num_days().max(0)
        }
        None => 0,
    }
}
