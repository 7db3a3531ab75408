//! Golden tests for output formatting.
//!
//! These tests use insta snapshots to keep the console layout stable.
//! Run with `cargo insta review` to update snapshots after intentional changes.

use chrono::{NaiveDate, NaiveDateTime};

use crate::event::Event;
use crate::format::{FormatOptions, OutputFormatter};
use crate::store::EventStore;
use crate::time::CalendarSpan;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Two events on Monday 2024-06-10 and one on Tuesday.
fn sample_store() -> EventStore {
    let mut store = EventStore::new();
    store.add(Event::new(
        "Standup",
        at(2024, 6, 10, 9, 0),
        at(2024, 6, 10, 9, 15),
        "Daily sync",
    ));
    store.add(Event::new(
        "Dentist",
        at(2024, 6, 10, 14, 30),
        at(2024, 6, 10, 15, 0),
        "Bring insurance card",
    ));
    store.add(Event::new(
        "Retro",
        at(2024, 6, 11, 16, 0),
        at(2024, 6, 11, 17, 0),
        "Sprint 12",
    ));
    store
}

// =============================================================================
// TTY Output Golden Tests
// =============================================================================

#[test]
fn golden_tty_day() {
    let store = sample_store();
    let formatter = OutputFormatter::with_defaults();
    let day = date(2024, 6, 10);

    let output = formatter.format_day(day, store.events_on(day));

    insta::assert_debug_snapshot!(output, @r#""Events on 2024-06-10:\n-----------------\nTitle: Standup\nStart: 2024-06-10 09:00\nEnd: 2024-06-10 09:15\nDescription: Daily sync\n\n-----------------\nTitle: Dentist\nStart: 2024-06-10 14:30\nEnd: 2024-06-10 15:00\nDescription: Bring insurance card\n\n""#);
}

#[test]
fn golden_tty_day_without_bucket() {
    let store = sample_store();
    let formatter = OutputFormatter::with_defaults();
    let day = date(2024, 6, 12);

    let output = formatter.format_day(day, store.events_on(day));

    insta::assert_debug_snapshot!(output, @r#""No events found on this date.\n""#);
}

#[test]
fn golden_tty_week() {
    let store = sample_store();
    let formatter = OutputFormatter::with_defaults();
    let span = CalendarSpan::week_of(date(2024, 6, 13));

    let output = formatter.format_span(span, store.events_in(span));

    insta::assert_debug_snapshot!(output, @r#""Events for the week starting 2024-06-09:\n-----------------\nTitle: Standup\nStart: 2024-06-10 09:00\nEnd: 2024-06-10 09:15\nDescription: Daily sync\n\n-----------------\nTitle: Dentist\nStart: 2024-06-10 14:30\nEnd: 2024-06-10 15:00\nDescription: Bring insurance card\n\n-----------------\nTitle: Retro\nStart: 2024-06-11 16:00\nEnd: 2024-06-11 17:00\nDescription: Sprint 12\n\n""#);
}

#[test]
fn golden_tty_empty_month() {
    let store = sample_store();
    let formatter = OutputFormatter::with_defaults();
    let span = CalendarSpan::month(2024, 7);

    let output = formatter.format_span(span, store.events_in(span));

    insta::assert_debug_snapshot!(output, @r#""Events for 2024-07:\n""#);
}

#[test]
fn golden_tty_year_custom_formats() {
    let store = sample_store();
    let formatter = OutputFormatter::new(FormatOptions {
        datetime_format: "%d/%m/%Y %H:%M".to_string(),
        max_title_length: Some(6),
        ..FormatOptions::default()
    });
    let span = CalendarSpan::year(2024);

    let output = formatter.format_span(span, store.events_in(span).take(1));

    insta::assert_debug_snapshot!(output, @r#""Events for the year 2024:\n-----------------\nTitle: Sta...\nStart: 10/06/2024 09:00\nEnd: 10/06/2024 09:15\nDescription: Daily sync\n\n""#);
}

#[test]
fn golden_tty_all() {
    let store = sample_store();
    let formatter = OutputFormatter::with_defaults();

    let output = formatter.format_all(store.all_events());

    insta::assert_debug_snapshot!(output, @r#""All Events:\n-----------------\nDate: 2024-06-10\nTitle: Standup\nStart: 2024-06-10 09:00\nEnd: 2024-06-10 09:15\nDescription: Daily sync\n\nTitle: Dentist\nStart: 2024-06-10 14:30\nEnd: 2024-06-10 15:00\nDescription: Bring insurance card\n\n-----------------\nDate: 2024-06-11\nTitle: Retro\nStart: 2024-06-11 16:00\nEnd: 2024-06-11 17:00\nDescription: Sprint 12\n\n""#);
}

#[test]
fn golden_tty_all_empty_store() {
    let store = EventStore::new();
    let formatter = OutputFormatter::with_defaults();

    let output = formatter.format_all(store.all_events());

    insta::assert_debug_snapshot!(output, @r#""-----------------\nNo events available.\n""#);
}

#[test]
fn golden_tty_all_emptied_bucket() {
    let mut store = EventStore::new();
    store.add(Event::new("Gone", at(2024, 6, 10, 9, 0), at(2024, 6, 10, 10, 0), ""));
    store.delete("gone").unwrap();
    let formatter = OutputFormatter::with_defaults();

    let output = formatter.format_all(store.all_events());

    insta::assert_debug_snapshot!(output, @r#""All Events:\n-----------------\nDate: 2024-06-10\n""#);
}

// =============================================================================
// JSON Output Golden Tests
// =============================================================================

#[test]
fn golden_json_week() {
    let mut store = EventStore::new();
    store.add(Event::new(
        "Standup",
        at(2024, 6, 10, 9, 0),
        at(2024, 6, 10, 9, 15),
        "Daily sync",
    ));
    let formatter = OutputFormatter::with_defaults();
    let span = CalendarSpan::week_of(date(2024, 6, 12));

    let output = formatter.format_json_span(span, store.events_in(span));

    insta::assert_json_snapshot!(output, @r#"
    {
      "span": {
        "kind": "week",
        "window": {
          "start": "2024-06-09",
          "end": "2024-06-16"
        }
      },
      "events": [
        {
          "title": "Standup",
          "start_time": "2024-06-10T09:00:00",
          "end_time": "2024-06-10T09:15:00",
          "start_display": "2024-06-10 09:00",
          "end_display": "2024-06-10 09:15",
          "description": "Daily sync"
        }
      ],
      "count": 1
    }
    "#);
}

#[test]
fn golden_json_all_empty_store() {
    let store = EventStore::new();
    let formatter = OutputFormatter::with_defaults();

    let output = formatter.format_json_all(store.all_events());

    insta::assert_json_snapshot!(output, @"[]");
}
