//! Codec for the fixed `YYYY-MM-DD HH:MM` timestamp format used by the
//! Amicale API. Timestamps carry no timezone and are read as local time.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

static DATE_TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}$").unwrap());

/// Parses a wire timestamp. Anything that does not match the fixed
/// pattern, or names an impossible calendar date, is absent rather than
/// an error.
pub fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    if !DATE_TIME_PATTERN.is_match(raw) {
        return None;
    }

    NaiveDateTime::parse_from_str(raw, DATE_TIME_FORMAT).ok()
}

/// Inverse of [`parse_date_time`], truncating to minute precision.
pub fn format_date_time(date: &NaiveDateTime) -> String {
    format!(
        "{}-{:02}-{:02} {:02}:{:02}",
        date.year(),
        date.month(),
        date.day(),
        date.hour(),
        date.minute()
    )
}

/// Date portion of a wire timestamp, if it is well-formed.
pub fn date_only(raw: &str) -> Option<&str> {
    if DATE_TIME_PATTERN.is_match(raw) {
        raw.split(' ').next()
    } else {
        None
    }
}

pub fn day_key(date: NaiveDate) -> String {
    format!("{}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// True iff both instants are known and `start` strictly precedes
/// `end`. An absent operand never orders.
pub fn is_before(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> bool {
    match (start, end) {
        (Some(start), Some(end)) => start < end,
        _ => false,
    }
}

/// Display label for an event's time span, `HH:MM - HH:MM`.
///
/// An event without a usable start renders as `/ - /`. A missing end,
/// or an end equal to the start, renders the start alone. An event
/// ending on a later calendar day is shown running until `23:59`.
pub fn formatted_time_range(
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> String {
    let Some(start) = start else {
        return String::from("/ - /");
    };

    let start_label = format!("{:02}:{:02}", start.hour(), start.minute());

    match end {
        Some(end) if end != start => {
            let end_label = if end.date() > start.date() {
                String::from("23:59")
            } else {
                format!("{:02}:{:02}", end.hour(), end.minute())
            };

            format!("{start_label} - {end_label}")
        }
        _ => start_label,
    }
}
