//! Calendar date arithmetic.
//!
//! This module provides [`DateWindow`], a half-open range of calendar days,
//! and [`CalendarSpan`], the day/week/month/year selectors used by the store's
//! range queries. Weeks start on Sunday.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of days in a week window.
pub const DAYS_PER_WEEK: u64 = 7;

/// Returns the Sunday on or before `date`.
///
/// Saturates at [`NaiveDate::MIN`] for dates in the first partial week of
/// the representable range.
pub fn sunday_on_or_before(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(offset))
        .unwrap_or(NaiveDate::MIN)
}

/// A range of calendar days.
///
/// Represents a half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    /// First day of the window (inclusive).
    pub start: NaiveDate,
    /// Day after the window (exclusive).
    pub end: NaiveDate,
}

impl DateWindow {
    /// Creates a new window.
    ///
    /// # Panics
    ///
    /// Panics if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        assert!(start <= end, "DateWindow start must be <= end");
        Self { start, end }
    }

    /// The week (Sunday through Saturday) containing `date`.
    pub fn week_containing(date: NaiveDate) -> Self {
        let start = sunday_on_or_before(date);
        let end = start
            .checked_add_days(Days::new(DAYS_PER_WEEK))
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    /// Number of days covered by the window.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Checks if a day falls within this window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

/// A calendar selection used by range queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarSpan {
    /// A single day.
    Day { date: NaiveDate },
    /// A Sunday-based week.
    Week { window: DateWindow },
    /// A month of a year. Months outside `1..=12` select nothing.
    Month { year: i32, month: u32 },
    /// A whole year.
    Year { year: i32 },
}

impl CalendarSpan {
    pub fn day(date: NaiveDate) -> Self {
        Self::Day { date }
    }

    /// The week containing `date`.
    pub fn week_of(date: NaiveDate) -> Self {
        Self::Week {
            window: DateWindow::week_containing(date),
        }
    }

    pub fn month(year: i32, month: u32) -> Self {
        Self::Month { year, month }
    }

    pub fn year(year: i32) -> Self {
        Self::Year { year }
    }

    /// Checks if a date key is selected by this span.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            Self::Day { date: day } => date == day,
            Self::Week { window } => window.contains(date),
            Self::Month { year, month } => date.year() == year && date.month() == month,
            Self::Year { year } => date.year() == year,
        }
    }

    /// Short human-readable label, e.g. `2024-06` for a month.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CalendarSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day { date } => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Week { window } => write!(f, "week of {}", window.start.format("%Y-%m-%d")),
            Self::Month { year, month } => write!(f, "{year}-{month:02}"),
            Self::Year { year } => write!(f, "{year}"),
        }
    }
}
