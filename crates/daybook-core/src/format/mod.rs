//! Output formatting for calendar events.
//!
//! This module renders store query results in two formats:
//! - **TTY**: the classic console listing, one separator line before each
//!   event followed by its details
//! - **JSON**: serializable structures for machine consumption
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use daybook_core::format::OutputFormatter;
//! use daybook_core::{CalendarSpan, Event, EventStore};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let mut store = EventStore::new();
//! store.add(Event::new("Standup", start, start, ""));
//!
//! let formatter = OutputFormatter::with_defaults();
//! let span = CalendarSpan::month(2024, 6);
//! let text = formatter.format_span(span, store.events_in(span));
//! assert!(text.starts_with("Events for 2024-06:\n"));
//! ```

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;
use crate::event::{DEFAULT_DATETIME_FORMAT, Event};
use crate::time::CalendarSpan;

/// Line printed before each event in TTY listings.
pub const SEPARATOR: &str = "-----------------";

/// Shown when a day has no bucket.
pub const NO_EVENTS_ON_DATE: &str = "No events found on this date.";

/// Shown when the store has no buckets at all.
pub const NO_EVENTS_AVAILABLE: &str = "No events available.";

/// Default display format for dates in headings.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// The output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable terminal output.
    #[default]
    Tty,
    /// Machine-readable JSON output.
    Json,
}

/// Configuration options for output formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    /// strftime format for event start/end timestamps.
    pub datetime_format: String,
    /// strftime format for dates in headings.
    pub date_format: String,
    /// Maximum length for event titles (truncated with ellipsis).
    pub max_title_length: Option<usize>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            max_title_length: None,
        }
    }
}

/// JSON output for a span or single-day query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonListing {
    /// The selection that produced these events.
    pub span: CalendarSpan,
    /// Matching events, in store order.
    pub events: Vec<JsonEvent>,
    /// Number of events returned.
    pub count: usize,
}

/// One day's bucket in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDay {
    pub date: NaiveDate,
    pub events: Vec<JsonEvent>,
}

/// A single event in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonEvent {
    /// Event title (may be truncated).
    pub title: String,
    /// Start time in ISO 8601 format.
    pub start_time: String,
    /// End time in ISO 8601 format.
    pub end_time: String,
    /// Formatted start time for display.
    pub start_display: String,
    /// Formatted end time for display.
    pub end_display: String,
    pub description: String,
}

/// Output formatter for store query results.
#[derive(Debug, Clone, Default)]
pub struct OutputFormatter {
    options: FormatOptions,
}

impl OutputFormatter {
    /// Creates a new OutputFormatter with the given options.
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Creates a new OutputFormatter with default options.
    pub fn with_defaults() -> Self {
        Self::new(FormatOptions::default())
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Multi-line details block for one event, with the title truncated to
    /// `max_title_length`.
    pub fn format_event(&self, event: &Event) -> String {
        let datetime_format = &self.options.datetime_format;
        match self.title(event) {
            Cow::Borrowed(_) => event.details_with(datetime_format),
            Cow::Owned(title) => Event {
                title,
                ..event.clone()
            }
            .details_with(datetime_format),
        }
    }

    /// Heading line for a span listing, without trailing newline.
    pub fn heading(&self, span: CalendarSpan) -> String {
        match span {
            CalendarSpan::Day { date } => format!("Events on {}:", self.date(date)),
            CalendarSpan::Week { window } => {
                format!("Events for the week starting {}:", self.date(window.start))
            }
            CalendarSpan::Month { year, month } => format!("Events for {year}-{month:02}:"),
            CalendarSpan::Year { year } => format!("Events for the year {year}:"),
        }
    }

    /// Formats a span listing for TTY output.
    pub fn format_span<'a>(
        &self,
        span: CalendarSpan,
        events: impl IntoIterator<Item = &'a Event>,
    ) -> String {
        let mut out = self.heading(span);
        out.push('\n');
        for event in events {
            self.push_entry(&mut out, event);
        }
        out
    }

    /// Formats a single-day query for TTY output.
    ///
    /// A missing bucket prints [`NO_EVENTS_ON_DATE`]; an existing but emptied
    /// bucket prints the heading alone.
    pub fn format_day<'a, I>(&self, date: NaiveDate, events: StoreResult<I>) -> String
    where
        I: IntoIterator<Item = &'a Event>,
    {
        match events {
            Ok(events) => self.format_span(CalendarSpan::day(date), events),
            Err(_) => format!("{NO_EVENTS_ON_DATE}\n"),
        }
    }

    /// Formats the whole store, grouped by day, for TTY output.
    pub fn format_all<'a, I>(&self, groups: StoreResult<I>) -> String
    where
        I: IntoIterator<Item = (NaiveDate, &'a [Event])>,
    {
        let Ok(groups) = groups else {
            return format!("{SEPARATOR}\n{NO_EVENTS_AVAILABLE}\n");
        };

        let mut out = String::from("All Events:\n");
        for (date, events) in groups {
            out.push_str(SEPARATOR);
            out.push('\n');
            out.push_str(&format!("Date: {}\n", self.date(date)));
            for event in events {
                out.push_str(&self.format_event(event));
                out.push('\n');
            }
        }
        out
    }

    /// Formats a span listing as JSON output.
    pub fn format_json_span<'a>(
        &self,
        span: CalendarSpan,
        events: impl IntoIterator<Item = &'a Event>,
    ) -> JsonListing {
        let events: Vec<JsonEvent> = events.into_iter().map(|e| self.to_json_event(e)).collect();
        JsonListing {
            span,
            count: events.len(),
            events,
        }
    }

    /// Formats a single-day query as JSON output. A missing bucket gives an
    /// empty listing.
    pub fn format_json_day<'a, I>(&self, date: NaiveDate, events: StoreResult<I>) -> JsonListing
    where
        I: IntoIterator<Item = &'a Event>,
    {
        let span = CalendarSpan::day(date);
        match events {
            Ok(events) => self.format_json_span(span, events),
            Err(_) => self.format_json_span(span, std::iter::empty()),
        }
    }

    /// Formats the whole store as JSON output. An index without buckets gives
    /// an empty list.
    pub fn format_json_all<'a, I>(&self, groups: StoreResult<I>) -> Vec<JsonDay>
    where
        I: IntoIterator<Item = (NaiveDate, &'a [Event])>,
    {
        groups
            .map(|groups| {
                groups
                    .into_iter()
                    .map(|(date, events)| JsonDay {
                        date,
                        events: events.iter().map(|e| self.to_json_event(e)).collect(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn push_entry(&self, out: &mut String, event: &Event) {
        out.push_str(SEPARATOR);
        out.push('\n');
        out.push_str(&self.format_event(event));
        out.push('\n');
    }

    fn to_json_event(&self, event: &Event) -> JsonEvent {
        JsonEvent {
            title: self.title(event).into_owned(),
            start_time: event.start_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            end_time: event.end_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            start_display: event.start_time.format(&self.options.datetime_format).to_string(),
            end_display: event.end_time.format(&self.options.datetime_format).to_string(),
            description: event.description.clone(),
        }
    }

    fn title<'a>(&self, event: &'a Event) -> Cow<'a, str> {
        match self.options.max_title_length {
            Some(max) => ellipsis(&event.title, max),
            None => Cow::Borrowed(&event.title),
        }
    }

    fn date(&self, date: NaiveDate) -> String {
        date.format(&self.options.date_format).to_string()
    }
}

/// Truncates a string with ellipsis if it exceeds the given length.
pub fn ellipsis(s: &str, max_len: usize) -> Cow<'_, str> {
    if max_len == 0 {
        return Cow::Borrowed("");
    }

    if s.chars().count() <= max_len {
        return Cow::Borrowed(s);
    }

    let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
    Cow::Owned(format!("{}...", truncated))
}

#[cfg(test)]
mod golden_tests;
