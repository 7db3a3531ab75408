//! Date-keyed event store.
//!
//! [`EventStore`] files every event in a *bucket* keyed by the calendar day of
//! its start time. Buckets keep their events in insertion order and are
//! iterated in the order they were first created, which is also the order all
//! range queries emit events in.
//!
//! Edits and deletes find their target by title, case-insensitively, and act
//! on the first match only: buckets are scanned in iteration order, then each
//! bucket front to back.
//!
//! Buckets are never dropped. Deleting the last event of a day leaves an empty
//! bucket behind, which still counts for [`EventStore::all_events`].

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{StoreError, StoreResult};
use crate::event::Event;
use crate::time::CalendarSpan;

/// How [`EventStore::edit`] treats a change of start date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditPolicy {
    /// Overwrite the event where it is. The event stays filed under its
    /// original day even if the new start time falls on another one.
    #[default]
    InPlace,
    /// Move the event to the bucket of its new start date when the day
    /// changes. The moved event is appended to that bucket.
    Rebucket,
}

/// Events of one calendar day, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Bucket {
    date: NaiveDate,
    events: Vec<Event>,
}

/// In-memory store of calendar events indexed by day.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    edit_policy: EditPolicy,
    /// Buckets in creation order.
    buckets: Vec<Bucket>,
    /// Position of each day's bucket in `buckets`.
    positions: HashMap<NaiveDate, usize>,
}

impl EventStore {
    /// Creates an empty store with the [`EditPolicy::InPlace`] policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with the given edit policy.
    pub fn with_edit_policy(edit_policy: EditPolicy) -> Self {
        Self {
            edit_policy,
            ..Self::default()
        }
    }

    pub fn edit_policy(&self) -> EditPolicy {
        self.edit_policy
    }

    /// Adds an event to the bucket of its start date, creating the bucket if
    /// needed. Always succeeds.
    pub fn add(&mut self, event: Event) {
        let date = event.date_key();
        debug!(date = %date, title = %event.title, "Adding event");
        self.bucket_for(date).push(event);
    }

    /// Replaces the first event titled `title` with `updated`.
    ///
    /// All four fields are overwritten. Under [`EditPolicy::InPlace`] the event
    /// keeps its bucket; under [`EditPolicy::Rebucket`] it moves when the start
    /// date changes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no event has that title. Nothing is
    /// modified in that case.
    pub fn edit(&mut self, title: &str, updated: Event) -> StoreResult<()> {
        let Some((bucket_idx, event_idx)) = self.find(title) else {
            debug!(title = %title, "No event to edit");
            return Err(StoreError::not_found(title));
        };

        let bucket = &mut self.buckets[bucket_idx];
        let moves = self.edit_policy == EditPolicy::Rebucket && updated.date_key() != bucket.date;
        debug!(
            date = %bucket.date,
            title = %title,
            new_title = %updated.title,
            moves,
            "Editing event"
        );

        if moves {
            bucket.events.remove(event_idx);
            self.add(updated);
        } else {
            bucket.events[event_idx] = updated;
        }
        Ok(())
    }

    /// Removes the first event titled `title` and returns it.
    ///
    /// The bucket it lived in is kept even when it becomes empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no event has that title.
    pub fn delete(&mut self, title: &str) -> StoreResult<Event> {
        let Some((bucket_idx, event_idx)) = self.find(title) else {
            debug!(title = %title, "No event to delete");
            return Err(StoreError::not_found(title));
        };

        let bucket = &mut self.buckets[bucket_idx];
        debug!(date = %bucket.date, title = %title, "Deleting event");
        Ok(bucket.events.remove(event_idx))
    }

    /// Events filed under `date`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Empty`] if no bucket was ever created for that
    /// day. A bucket emptied by deletes yields an empty iterator instead.
    pub fn events_on(&self, date: NaiveDate) -> StoreResult<std::slice::Iter<'_, Event>> {
        trace!(date = %date, "Selecting events for day");
        self.positions
            .get(&date)
            .map(|&idx| self.buckets[idx].events.iter())
            .ok_or(StoreError::Empty)
    }

    /// Events whose bucket lies in `span`, bucket by bucket in creation
    /// order (not chronological).
    pub fn events_in(&self, span: CalendarSpan) -> impl Iterator<Item = &Event> + Clone + '_ {
        trace!(span = %span, "Selecting events for span");
        self.buckets
            .iter()
            .filter(move |bucket| span.contains(bucket.date))
            .flat_map(|bucket| bucket.events.iter())
    }

    /// Events in the Sunday-based week containing `date`.
    pub fn events_in_week(&self, date: NaiveDate) -> impl Iterator<Item = &Event> + Clone + '_ {
        self.events_in(CalendarSpan::week_of(date))
    }

    /// Events in the given month. `month` is 1-based; values outside
    /// `1..=12` select nothing.
    pub fn events_in_month(
        &self,
        year: i32,
        month: u32,
    ) -> impl Iterator<Item = &Event> + Clone + '_ {
        self.events_in(CalendarSpan::month(year, month))
    }

    /// Events in the given year.
    pub fn events_in_year(&self, year: i32) -> impl Iterator<Item = &Event> + Clone + '_ {
        self.events_in(CalendarSpan::year(year))
    }

    /// Every bucket as `(date, events)`, in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Empty`] only when no bucket exists at all. A store
    /// whose buckets have all been emptied still returns them.
    pub fn all_events(
        &self,
    ) -> StoreResult<impl Iterator<Item = (NaiveDate, &[Event])> + Clone + '_> {
        if self.buckets.is_empty() {
            return Err(StoreError::Empty);
        }
        Ok(self
            .buckets
            .iter()
            .map(|bucket| (bucket.date, bucket.events.as_slice())))
    }

    /// Total number of events across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.events.len()).sum()
    }

    /// Returns true if the store holds no events. Empty buckets may still
    /// exist; see [`EventStore::bucket_count`].
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|bucket| bucket.events.is_empty())
    }

    /// Number of buckets, including emptied ones.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Bucket keys in creation order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.buckets.iter().map(|bucket| bucket.date)
    }

    fn bucket_for(&mut self, date: NaiveDate) -> &mut Vec<Event> {
        let idx = match self.positions.get(&date) {
            Some(&idx) => idx,
            None => {
                trace!(date = %date, "Creating bucket");
                self.buckets.push(Bucket {
                    date,
                    events: Vec::new(),
                });
                let idx = self.buckets.len() - 1;
                self.positions.insert(date, idx);
                idx
            }
        };
        &mut self.buckets[idx].events
    }

    /// Location of the first event titled `title`, as (bucket, event) indices.
    fn find(&self, title: &str) -> Option<(usize, usize)> {
        self.buckets.iter().enumerate().find_map(|(bucket_idx, bucket)| {
            bucket
                .events
                .iter()
                .position(|event| event.title_matches(title))
                .map(|event_idx| (bucket_idx, event_idx))
        })
    }
}
