//! Recurrence expansion: turns one base event into the concrete occurrences
//! that fall inside a closed range of calendar dates.
//!
//! Expansion is pure: the base event is borrowed, never modified, and handed
//! back as-is (`Cow::Borrowed`) when it does not recur. Generated occurrences
//! are owned clones carrying a derived id, the occurrence's start and end, and
//! `is_recurring_instance = true`.

use std::borrow::Cow;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use tracing::{debug, trace, warn};

use crate::config::EngineConfig;
use crate::dates;
use crate::error::{CalendarError, Result};
use crate::model::{Event, RecurrencePattern, RecurrenceRule};

/// Expand `event` over `[range_start, range_end]` with the default [`EngineConfig`].
///
/// See [`expand_event_with`] for the full contract.
pub fn expand_event(
    event: &Event,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Result<Vec<Cow<'_, Event>>> {
    expand_event_with(event, range_start, range_end, &EngineConfig::default())
}

/// Expand `event` over the closed range `[range_start, range_end]`.
///
/// - No recurrence, or `type: none` → the event itself.
/// - Recurrence ended before `range_start` → nothing.
/// - `weekly` without usable `weekDays`, `monthly` without `monthDay`, or an
///   unsupported type → the event itself.
///
/// # Errors
/// Returns `CalendarError::InvalidInterval` for a `custom` rule whose interval
/// is not positive, and `CalendarError::IterationLimit` when a walk needs more
/// than `config.max_iterations` steps.
pub fn expand_event_with<'a>(
    event: &'a Event,
    range_start: NaiveDate,
    range_end: NaiveDate,
    config: &EngineConfig,
) -> Result<Vec<Cow<'a, Event>>> {
    let pattern = match &event.recurrence {
        Some(p) if p.rule != RecurrenceRule::None => p,
        _ => return Ok(vec![Cow::Borrowed(event)]),
    };

    if let RecurrenceRule::Custom { interval } = pattern.rule {
        if interval <= 0 {
            return Err(CalendarError::InvalidInterval(interval));
        }
    }

    if pattern.ended_before(range_start) {
        debug!(event_id = %event.id, "recurrence ended before range start");
        return Ok(Vec::new());
    }
    if range_end < range_start {
        return Ok(Vec::new());
    }

    let mut out = Occurrences::new(event, config.max_iterations);

    match &pattern.rule {
        RecurrenceRule::Daily => expand_daily(&mut out, pattern, range_start, range_end)?,
        RecurrenceRule::Weekly { week_days } => {
            let first_day = config.week_starts_on.weekday();
            let offsets = weekday_offsets(week_days, first_day);
            if offsets.is_empty() {
                warn!(event_id = %event.id, "weekly recurrence without weekDays; treating as single event");
                return Ok(vec![Cow::Borrowed(event)]);
            }
            expand_weekly(&mut out, pattern, &offsets, first_day, range_start, range_end)?;
        }
        RecurrenceRule::Monthly {
            month_day: Some(month_day),
        } => expand_monthly(&mut out, pattern, *month_day, range_start, range_end)?,
        RecurrenceRule::Monthly { month_day: None } => {
            warn!(event_id = %event.id, "monthly recurrence without monthDay; treating as single event");
            return Ok(vec![Cow::Borrowed(event)]);
        }
        RecurrenceRule::Custom { interval } => {
            expand_custom(&mut out, pattern, *interval, range_start, range_end)?
        }
        RecurrenceRule::Unsupported | RecurrenceRule::None => {
            return Ok(vec![Cow::Borrowed(event)]);
        }
    }

    debug!(
        event_id = %event.id,
        rule = pattern.rule.kind(),
        %range_start,
        %range_end,
        count = out.events.len(),
        "expanded recurring event"
    );
    Ok(out.events)
}

/// Collects occurrences of one base event and enforces the iteration cap.
struct Occurrences<'a> {
    base: &'a Event,
    /// Base duration in whole days, reapplied to every occurrence.
    span: Duration,
    remaining: usize,
    limit: usize,
    events: Vec<Cow<'a, Event>>,
}

impl<'a> Occurrences<'a> {
    fn new(base: &'a Event, limit: usize) -> Self {
        Self {
            base,
            span: Duration::days(base.duration_days()),
            remaining: limit,
            limit,
            events: Vec::new(),
        }
    }

    /// Account for one loop step.
    fn tick(&mut self) -> Result<()> {
        if self.remaining == 0 {
            return Err(CalendarError::IterationLimit { limit: self.limit });
        }
        self.remaining -= 1;
        Ok(())
    }

    fn push(&mut self, day: NaiveDate) {
        let start = day.and_time(self.base.start.time());
        let end = (day + self.span).and_time(self.base.end.time());

        let mut occurrence = self.base.clone();
        occurrence.id = format!("{}-{}", self.base.id, dates::occurrence_millis(start));
        occurrence.start = start;
        occurrence.end = end;
        occurrence.is_recurring_instance = true;

        trace!(id = %occurrence.id, %start, "occurrence");
        self.events.push(Cow::Owned(occurrence));
    }
}

fn step(day: NaiveDate, days: i64) -> Option<NaiveDate> {
    day.checked_add_signed(Duration::days(days))
}

/// Sorted, deduplicated offsets (from the first day of the week) of the valid
/// `weekDays` entries. Out-of-range indices are dropped.
fn weekday_offsets(week_days: &[u8], first_day: Weekday) -> Vec<i64> {
    let mut offsets: Vec<i64> = week_days
        .iter()
        .filter_map(|&i| dates::weekday_from_index(i))
        .map(|wd| dates::weekday_offset(wd, first_day))
        .collect();
    offsets.sort_unstable();
    offsets.dedup();
    offsets
}

fn expand_daily(
    out: &mut Occurrences<'_>,
    pattern: &RecurrencePattern,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Result<()> {
    let mut day = range_start;
    while day <= range_end {
        out.tick()?;
        if pattern.ended_before(day) {
            break;
        }
        out.push(day);
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    Ok(())
}

fn expand_weekly(
    out: &mut Occurrences<'_>,
    pattern: &RecurrencePattern,
    offsets: &[i64],
    first_day: Weekday,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Result<()> {
    let mut week = dates::week_start(range_start, first_day);
    while week <= range_end {
        out.tick()?;
        if pattern.ended_before(week) {
            break;
        }
        for &offset in offsets {
            let Some(date) = step(week, offset) else {
                continue;
            };
            if dates::within(date, range_start, range_end) && !pattern.ended_before(date) {
                out.push(date);
            }
        }
        match step(week, 7) {
            Some(next) => week = next,
            None => break,
        }
    }
    Ok(())
}

fn expand_monthly(
    out: &mut Occurrences<'_>,
    pattern: &RecurrencePattern,
    month_day: u32,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Result<()> {
    let mut month = dates::month_start(range_start);
    while month <= range_end {
        out.tick()?;
        if pattern.ended_before(month) {
            break;
        }
        // Short months have no candidate: skip rather than clamp to month end.
        if let Some(date) = dates::day_of_month(month.year(), month.month(), month_day) {
            if dates::within(date, range_start, range_end) && !pattern.ended_before(date) {
                out.push(date);
            }
        }
        match dates::add_months(month, 1) {
            Some(next) => month = next,
            None => break,
        }
    }
    Ok(())
}

/// Walk from the base event's own start date, `interval` weeks at a time.
///
/// The anchor is the base start, not `range_start`: which dates are selected
/// depends on the phase of the walk relative to the first occurrence.
fn expand_custom(
    out: &mut Occurrences<'_>,
    pattern: &RecurrencePattern,
    interval: i32,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Result<()> {
    let step_days = i64::from(interval) * 7;
    let mut running = out.base.start_date();
    while running <= range_end {
        out.tick()?;
        if pattern.ended_before(running) {
            break;
        }
        if dates::within(running, range_start, range_end) {
            out.push(running);
        }
        match step(running, step_days) {
            Some(next) => running = next,
            None => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_sorted_and_deduplicated() {
        assert_eq!(weekday_offsets(&[5, 1, 5, 3], Weekday::Sun), vec![1, 3, 5]);
    }

    #[test]
    fn offsets_follow_week_start() {
        // Sunday (0) is the last day of a Monday-first week.
        assert_eq!(weekday_offsets(&[0, 1], Weekday::Mon), vec![0, 6]);
    }

    #[test]
    fn invalid_weekday_indices_dropped() {
        assert!(weekday_offsets(&[7, 42], Weekday::Sun).is_empty());
    }
}
