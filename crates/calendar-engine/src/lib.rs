//! # calendar-engine
//!
//! Deterministic recurring-event expansion and day queries for calendar views.
//!
//! Views (month, week, day, agenda) hand the engine the raw event collection and
//! the day or range they are rendering; the engine materializes recurring events
//! into concrete occurrences and filters/sorts them for that day. Everything is
//! a pure function of its inputs: no caching, no shared state, no time zones.
//!
//! ## Quick start
//!
//! ```rust
//! use calendar_engine::{all_occurrences_for_day, dates, Event, RecurrencePattern};
//!
//! let standup = Event::new(
//!     "e1",
//!     "Standup",
//!     dates::parse_timestamp("2024-03-01T09:00").unwrap(),
//!     dates::parse_timestamp("2024-03-01T09:15").unwrap(),
//! )
//! .with_recurrence(RecurrencePattern::weekly([5]));
//!
//! let events = vec![standup];
//! let friday = dates::parse_date("2024-03-08").unwrap();
//! let found = all_occurrences_for_day(&events, friday).unwrap();
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].id, "e1-1709888400000");
//! ```
//!
//! ## Modules
//!
//! - [`model`] — `Event`, `RecurrencePattern`, `EventColor` and their JSON shape
//! - [`expander`] — one base event + date range → concrete occurrences
//! - [`query`] — per-day and per-range queries over an event collection
//! - [`classify`] — multi-day detection and view orderings
//! - [`dates`] — calendar-date arithmetic and parsing
//! - [`config`] — week layout and expansion bounds
//! - [`error`] — Error types

pub mod classify;
pub mod config;
pub mod dates;
pub mod error;
pub mod expander;
pub mod model;
pub mod query;

pub use classify::{is_multi_day_event, sort_chronologically, sort_events};
pub use config::{EngineConfig, WeekStart};
pub use error::CalendarError;
pub use expander::{expand_event, expand_event_with};
pub use model::{parse_event_json, parse_events_json, Event, EventColor, RecurrencePattern, RecurrenceRule};
pub use query::{
    agenda_events_for_day, agenda_events_for_day_with, all_occurrences_for_day,
    all_occurrences_for_day_with, events_starting_on_day, occurrences_in_range,
    occurrences_in_range_with, spanning_events_for_day,
};
