//! Tests for multi-day detection and view orderings.

use calendar_engine::dates::parse_timestamp;
use calendar_engine::{is_multi_day_event, sort_chronologically, sort_events, Event};

fn event(id: &str, start: &str, end: &str) -> Event {
    Event::new(
        id,
        id,
        parse_timestamp(start).unwrap(),
        parse_timestamp(end).unwrap(),
    )
}

#[test]
fn two_calendar_dates_is_multi_day() {
    assert!(is_multi_day_event(&event(
        "overnight",
        "2024-03-01T23:00",
        "2024-03-02T01:00"
    )));
}

#[test]
fn same_day_timed_is_not_multi_day() {
    assert!(!is_multi_day_event(&event(
        "lunch",
        "2024-03-01T12:00",
        "2024-03-01T13:00"
    )));
}

#[test]
fn all_day_flag_is_multi_day_even_on_one_date() {
    let holiday = event("holiday", "2024-03-01", "2024-03-01").as_all_day();
    assert!(is_multi_day_event(&holiday));
}

#[test]
fn time_of_day_is_ignored() {
    // Full 24h but inside one calendar date.
    assert!(!is_multi_day_event(&event(
        "long",
        "2024-03-01T00:00",
        "2024-03-01T23:59"
    )));
}

#[test]
fn sort_places_multi_day_first_then_by_start() {
    let mut events = vec![
        event("s2", "2024-03-05T15:00", "2024-03-05T16:00"),
        event("m2", "2024-03-04T09:00", "2024-03-06T09:00"),
        event("s1", "2024-03-05T08:00", "2024-03-05T09:00"),
        event("m1", "2024-03-01T09:00", "2024-03-07T09:00"),
        event("a1", "2024-03-05", "2024-03-05").as_all_day(),
    ];
    sort_events(&mut events);

    let order: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(order, vec!["m1", "m2", "a1", "s1", "s2"]);
}

#[test]
fn sort_is_stable_for_equal_starts() {
    let mut events = vec![
        event("first", "2024-03-05T08:00", "2024-03-05T09:00"),
        event("second", "2024-03-05T08:00", "2024-03-05T08:30"),
    ];
    sort_events(&mut events);
    assert_eq!(events[0].id, "first");
    assert_eq!(events[1].id, "second");
}

#[test]
fn chronological_sort_ignores_multi_day() {
    let mut events = vec![
        event("m", "2024-03-05T09:00", "2024-03-07T09:00"),
        event("s", "2024-03-05T08:00", "2024-03-05T08:30"),
    ];
    sort_chronologically(&mut events);
    assert_eq!(events[0].id, "s");
    assert_eq!(events[1].id, "m");
}

#[test]
fn sort_works_on_borrowed_events() {
    let events = vec![
        event("s", "2024-03-05T08:00", "2024-03-05T08:30"),
        event("m", "2024-03-05T09:00", "2024-03-07T09:00"),
    ];
    let mut refs: Vec<&Event> = events.iter().collect();
    sort_events(&mut refs);
    assert_eq!(refs[0].id, "m");
}
