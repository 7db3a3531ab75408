//! Parsing of user-typed values.
//!
//! The menu reads free-form lines; these helpers turn them into the typed
//! values the store expects. Surrounding whitespace is ignored.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{ClientError, ClientResult};

/// Accepted timestamp layouts, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a timestamp such as `2024-06-10 14:30`.
///
/// A bare date is read as midnight of that day.
pub fn parse_datetime(input: &str) -> ClientResult<NaiveDateTime> {
    let input = input.trim();
    parse_datetime_exact(input)
        .or_else(|| {
            NaiveDate::parse_from_str(input, DATE_FORMAT)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .ok_or_else(|| {
            ClientError::input(format!(
                "{input:?} is not a date and time (expected yyyy-MM-dd HH:mm)"
            ))
        })
}

/// Parses a date such as `2024-06-10`. A trailing time is accepted and
/// dropped.
pub fn parse_date(input: &str) -> ClientResult<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .ok()
        .or_else(|| parse_datetime_exact(input).map(|dt| dt.date()))
        .ok_or_else(|| ClientError::input(format!("{input:?} is not a date (expected yyyy-MM-dd)")))
}

/// Parses a `yyyy-MM` pair into year and 1-based month.
pub fn parse_year_month(input: &str) -> ClientResult<(i32, u32)> {
    let input = input.trim();
    let invalid = || ClientError::input(format!("{input:?} is not a month (expected yyyy-MM)"));

    let (year, month) = input.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.trim().parse().map_err(|_| invalid())?;
    let month: u32 = month.trim().parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(ClientError::input(format!(
            "month must be between 1 and 12, got {month}"
        )));
    }
    Ok((year, month))
}

/// Parses a year such as `2024`.
pub fn parse_year(input: &str) -> ClientResult<i32> {
    let input = input.trim();
    input
        .parse()
        .map_err(|_| ClientError::input(format!("{input:?} is not a year")))
}

/// Parses a menu choice. Returns `None` for anything that is not a number.
pub fn parse_choice(input: &str) -> Option<u32> {
    input.trim().parse().ok()
}

fn parse_datetime_exact(input: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
}
