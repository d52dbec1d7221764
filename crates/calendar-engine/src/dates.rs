//! Calendar-date utilities.
//!
//! Every comparison here is a calendar-date comparison on naive local values.
//! Time zones are never consulted: an event at 23:30 belongs to the day printed
//! on it, regardless of where the calendar is being viewed.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::error::{CalendarError, Result};

/// Map a `weekDays` index (Sunday = 0 .. Saturday = 6) to a [`Weekday`].
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Days from `first_day` forward to `weekday` within one week (0..=6).
pub fn weekday_offset(weekday: Weekday, first_day: Weekday) -> i64 {
    let target = weekday.num_days_from_sunday() as i64;
    let first = first_day.num_days_from_sunday() as i64;
    (target - first + 7) % 7
}

/// First day of the week containing `day`.
pub fn week_start(day: NaiveDate, first_day: Weekday) -> NaiveDate {
    day - Duration::days(weekday_offset(day.weekday(), first_day))
}

/// Last day of the week containing `day`.
pub fn week_end(day: NaiveDate, first_day: Weekday) -> NaiveDate {
    week_start(day, first_day) + Duration::days(6)
}

/// First day of the month containing `day`.
pub fn month_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(day.day0() as i64)
}

/// Move a month start forward by `n` months. `None` past the end of chrono's range.
pub fn add_months(month_start: NaiveDate, n: u32) -> Option<NaiveDate> {
    month_start.checked_add_months(Months::new(n))
}

/// The `day`-th of the given month, or `None` if the month is too short.
pub fn day_of_month(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn is_same_day(timestamp: NaiveDateTime, day: NaiveDate) -> bool {
    timestamp.date() == day
}

/// Whole calendar days from `from` to `to` (negative if `to` precedes `from`).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// True if `day` lies in the closed interval `[start, end]`.
pub fn within(day: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    start <= day && day <= end
}

/// Epoch milliseconds of a naive timestamp, reading its wall clock as UTC.
///
/// Used to derive occurrence ids, so it must stay stable for a given timestamp.
pub fn occurrence_millis(timestamp: NaiveDateTime) -> i64 {
    timestamp.and_utc().timestamp_millis()
}

/// Parse a calendar timestamp.
///
/// Accepts RFC 3339 (the offset is dropped and the wall clock kept),
/// `YYYY-MM-DDTHH:MM:SS[.fff]`, `YYYY-MM-DDTHH:MM`, `YYYY-MM-DD HH:MM:SS`
/// and a bare `YYYY-MM-DD`, which means midnight.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }
    if let Ok(dt) = s.parse::<NaiveDateTime>() {
        return Ok(dt);
    }
    for fmt in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|e| CalendarError::InvalidDate(format!("'{}': {}", s, e)))
}

/// Parse a calendar date. Timestamps are accepted and truncated to their date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(d) => Ok(d),
        Err(_) => parse_timestamp(s).map(|dt| dt.date()),
    }
}
