//! Event type for calendar entries.
//!
//! An [`Event`] is a plain record: a title, a start and end timestamp and a
//! free-text description. Nothing is validated here; an end before the start,
//! a blank title or duplicate titles are all accepted as-is.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Display format used by [`Event::details`].
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A single calendar entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    /// The event title, also its lookup key for edits and deletes.
    pub title: String,
    /// When the event starts (local wall-clock time, no timezone).
    pub start_time: NaiveDateTime,
    /// When the event ends. May precede `start_time`.
    pub end_time: NaiveDateTime,
    /// Free-text description, possibly empty.
    #[serde(default)]
    pub description: String,
}

impl Event {
    /// Creates a new event.
    pub fn new(
        title: impl Into<String>,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            start_time,
            end_time,
            description: description.into(),
        }
    }

    /// The calendar day this event is filed under.
    pub fn date_key(&self) -> NaiveDate {
        self.start_time.date()
    }

    /// Returns true if `title` names this event, ignoring case.
    pub fn title_matches(&self, title: &str) -> bool {
        self.title
            .chars()
            .flat_map(char::to_lowercase)
            .eq(title.chars().flat_map(char::to_lowercase))
    }

    /// Returns `end_time - start_time`. Negative when the end precedes the start.
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// Multi-line description of the event using [`DEFAULT_DATETIME_FORMAT`].
    pub fn details(&self) -> String {
        self.details_with(DEFAULT_DATETIME_FORMAT)
    }

    /// Multi-line description of the event using a custom strftime format
    /// for the timestamps.
    pub fn details_with(&self, datetime_format: &str) -> String {
        format!(
            "Title: {}\nStart: {}\nEnd: {}\nDescription: {}\n",
            self.title,
            self.start_time.format(datetime_format),
            self.end_time.format(datetime_format),
            self.description
        )
    }
}
