//! Core types: events, date spans, the date-keyed event store, formatting

pub mod error;
pub mod event;
pub mod format;
pub mod store;
pub mod time;
pub mod tracing;

pub use error::{StoreError, StoreResult};
pub use event::{DEFAULT_DATETIME_FORMAT, Event};
pub use format::{
    FormatOptions, JsonDay, JsonEvent, JsonListing, OutputFormat, OutputFormatter, ellipsis,
};
pub use store::{EditPolicy, EventStore};
pub use time::{CalendarSpan, DateWindow, sunday_on_or_before};
pub use crate::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
