//! Classification and ordering helpers shared by the query layer and the views.

use std::borrow::Borrow;

use crate::model::Event;

/// True for all-day events and for events whose start and end fall on
/// different calendar dates. Time of day is ignored.
pub fn is_multi_day_event(event: &Event) -> bool {
    event.all_day || event.start_date() != event.end_date()
}

/// Grid ordering: every multi-day event before every single-day event, each
/// group ascending by start. The sort is stable.
pub fn sort_events<E: Borrow<Event>>(events: &mut [E]) {
    events.sort_by(|a, b| {
        let (a, b) = (a.borrow(), b.borrow());
        is_multi_day_event(b)
            .cmp(&is_multi_day_event(a))
            .then_with(|| a.start.cmp(&b.start))
    });
}

/// Agenda ordering: ascending by start only. The sort is stable.
pub fn sort_chronologically<E: Borrow<Event>>(events: &mut [E]) {
    events.sort_by(|a, b| a.borrow().start.cmp(&b.borrow().start));
}
