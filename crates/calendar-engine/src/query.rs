//! Day and range queries over a collection of base events.
//!
//! Every query recomputes from the caller's slice; nothing is cached between
//! calls. Queries that must see recurring events expand them first, using the
//! week around the queried day as the expansion window.

use std::borrow::Cow;

use chrono::NaiveDate;
use tracing::debug;

use crate::classify::{is_multi_day_event, sort_chronologically, sort_events};
use crate::config::EngineConfig;
use crate::dates;
use crate::error::Result;
use crate::expander::expand_event_with;
use crate::model::Event;

/// True if `event` starts on, ends on, or strictly spans `day`.
fn touches_day(event: &Event, day: NaiveDate) -> bool {
    let (start, end) = (event.start_date(), event.end_date());
    start == day || end == day || (start < day && day < end)
}

/// True if `event` covers `day` without starting on it.
fn continues_through(event: &Event, day: NaiveDate) -> bool {
    let (start, end) = (event.start_date(), event.end_date());
    start != day && (end == day || (start < day && day < end))
}

/// Stored events whose start falls on `day`, ascending by start.
///
/// Recurrences are not expanded: only literally stored starts count.
pub fn events_starting_on_day(events: &[Event], day: NaiveDate) -> Vec<&Event> {
    let mut found: Vec<&Event> = events
        .iter()
        .filter(|e| dates::is_same_day(e.start, day))
        .collect();
    sort_chronologically(&mut found);
    found
}

/// Stored multi-day events that continue into `day` from an earlier date.
///
/// These are the continuation bars of a grid view: `day` is the event's end
/// date or lies strictly between its start and end. Ascending by start.
pub fn spanning_events_for_day(events: &[Event], day: NaiveDate) -> Vec<&Event> {
    let mut found: Vec<&Event> = events
        .iter()
        .filter(|e| is_multi_day_event(e) && continues_through(e, day))
        .collect();
    sort_chronologically(&mut found);
    found
}

/// Every occurrence that starts on, ends on, or spans `day`, recurring events included.
pub fn all_occurrences_for_day(events: &[Event], day: NaiveDate) -> Result<Vec<Cow<'_, Event>>> {
    all_occurrences_for_day_with(events, day, &EngineConfig::default())
}

/// [`all_occurrences_for_day`] with an explicit configuration.
///
/// Results keep input order, and expansion order within each base event.
pub fn all_occurrences_for_day_with<'a>(
    events: &'a [Event],
    day: NaiveDate,
    config: &EngineConfig,
) -> Result<Vec<Cow<'a, Event>>> {
    let first_day = config.week_starts_on.weekday();
    let window_start = dates::week_start(day, first_day);
    let window_end = dates::week_end(day, first_day);

    let mut found = Vec::new();
    for event in events {
        for occurrence in expand_event_with(event, window_start, window_end, config)? {
            if touches_day(&occurrence, day) {
                found.push(occurrence);
            }
        }
    }

    debug!(%day, count = found.len(), "occurrences for day");
    Ok(found)
}

/// [`all_occurrences_for_day`] in strict chronological order, for list views.
pub fn agenda_events_for_day(events: &[Event], day: NaiveDate) -> Result<Vec<Cow<'_, Event>>> {
    agenda_events_for_day_with(events, day, &EngineConfig::default())
}

pub fn agenda_events_for_day_with<'a>(
    events: &'a [Event],
    day: NaiveDate,
    config: &EngineConfig,
) -> Result<Vec<Cow<'a, Event>>> {
    let mut found = all_occurrences_for_day_with(events, day, config)?;
    sort_chronologically(&mut found);
    Ok(found)
}

/// Every occurrence overlapping `[range_start, range_end]` by calendar date,
/// in grid order (see [`sort_events`]).
///
/// Month and week grids use this to fetch a whole visible range at once.
pub fn occurrences_in_range(
    events: &[Event],
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Result<Vec<Cow<'_, Event>>> {
    occurrences_in_range_with(events, range_start, range_end, &EngineConfig::default())
}

pub fn occurrences_in_range_with<'a>(
    events: &'a [Event],
    range_start: NaiveDate,
    range_end: NaiveDate,
    config: &EngineConfig,
) -> Result<Vec<Cow<'a, Event>>> {
    let mut found = Vec::new();
    for event in events {
        for occurrence in expand_event_with(event, range_start, range_end, config)? {
            if occurrence.start_date() <= range_end && occurrence.end_date() >= range_start {
                found.push(occurrence);
            }
        }
    }
    sort_events(&mut found);

    debug!(%range_start, %range_end, count = found.len(), "occurrences in range");
    Ok(found)
}
