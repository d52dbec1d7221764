//! WASM bindings for calendar-engine.
//!
//! Exposes recurrence expansion, day/range queries and view ordering to the
//! calendar UI via `wasm-bindgen`. Events cross the boundary as JSON strings in
//! the same camelCase shape the UI stores them in; days are `YYYY-MM-DD`
//! strings (full timestamps are accepted and truncated to their date).
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p calendar-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/calendar-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/calendar_engine_wasm.wasm
//! ```

use std::fmt::Display;

use calendar_engine::{dates, EngineConfig, Event};
use chrono::NaiveDate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: parse inputs, serialize outputs
// ---------------------------------------------------------------------------

fn js_error(context: &str, e: impl Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, e))
}

fn parse_day(s: &str) -> Result<NaiveDate, JsValue> {
    dates::parse_date(s).map_err(|e| js_error("Invalid day", e))
}

fn parse_events(json: &str) -> Result<Vec<Event>, JsValue> {
    calendar_engine::parse_events_json(json).map_err(|e| js_error("Invalid events JSON", e))
}

fn parse_event(json: &str) -> Result<Event, JsValue> {
    calendar_engine::parse_event_json(json).map_err(|e| js_error("Invalid event JSON", e))
}

/// Parse an optional `{"week_starts_on": "monday", "max_iterations": 5000}` object.
fn parse_config(json: Option<String>) -> Result<EngineConfig, JsValue> {
    let Some(json) = json else {
        return Ok(EngineConfig::default());
    };
    let config: EngineConfig =
        serde_json::from_str(&json).map_err(|e| js_error("Invalid config JSON", e))?;
    config.validate().map_err(|e| js_error("Invalid config", e))?;
    Ok(config)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_error("Serialization error", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Expand one event over the closed range `[rangeStart, rangeEnd]`.
///
/// Returns a JSON array of events: the event itself when it does not recur,
/// otherwise its generated occurrences.
///
/// # Arguments
/// - `event_json` -- a single event object
/// - `range_start`, `range_end` -- `YYYY-MM-DD`
/// - `config_json` -- optional engine config object
#[wasm_bindgen(js_name = "expandEvent")]
pub fn expand_event(
    event_json: &str,
    range_start: &str,
    range_end: &str,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    let event = parse_event(event_json)?;
    let start = parse_day(range_start)?;
    let end = parse_day(range_end)?;
    let config = parse_config(config_json)?;

    let occurrences = calendar_engine::expand_event_with(&event, start, end, &config)
        .map_err(|e| js_error("Expansion failed", e))?;
    to_json(&occurrences)
}

/// Stored events starting on `day`, ascending by start. Recurrences are not expanded.
#[wasm_bindgen(js_name = "eventsStartingOnDay")]
pub fn events_starting_on_day(events_json: &str, day: &str) -> Result<String, JsValue> {
    let events = parse_events(events_json)?;
    let day = parse_day(day)?;
    to_json(&calendar_engine::events_starting_on_day(&events, day))
}

/// Stored multi-day events continuing into `day` from an earlier date.
#[wasm_bindgen(js_name = "spanningEventsForDay")]
pub fn spanning_events_for_day(events_json: &str, day: &str) -> Result<String, JsValue> {
    let events = parse_events(events_json)?;
    let day = parse_day(day)?;
    to_json(&calendar_engine::spanning_events_for_day(&events, day))
}

/// Every occurrence starting on, ending on, or spanning `day`.
#[wasm_bindgen(js_name = "allOccurrencesForDay")]
pub fn all_occurrences_for_day(
    events_json: &str,
    day: &str,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    let events = parse_events(events_json)?;
    let day = parse_day(day)?;
    let config = parse_config(config_json)?;

    let found = calendar_engine::all_occurrences_for_day_with(&events, day, &config)
        .map_err(|e| js_error("Expansion failed", e))?;
    to_json(&found)
}

/// Like `allOccurrencesForDay`, in strict chronological order.
#[wasm_bindgen(js_name = "agendaEventsForDay")]
pub fn agenda_events_for_day(
    events_json: &str,
    day: &str,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    let events = parse_events(events_json)?;
    let day = parse_day(day)?;
    let config = parse_config(config_json)?;

    let found = calendar_engine::agenda_events_for_day_with(&events, day, &config)
        .map_err(|e| js_error("Expansion failed", e))?;
    to_json(&found)
}

/// Every occurrence overlapping `[rangeStart, rangeEnd]`, multi-day events first.
#[wasm_bindgen(js_name = "occurrencesInRange")]
pub fn occurrences_in_range(
    events_json: &str,
    range_start: &str,
    range_end: &str,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    let events = parse_events(events_json)?;
    let start = parse_day(range_start)?;
    let end = parse_day(range_end)?;
    let config = parse_config(config_json)?;

    let found = calendar_engine::occurrences_in_range_with(&events, start, end, &config)
        .map_err(|e| js_error("Expansion failed", e))?;
    to_json(&found)
}

/// Sort events for grid display: multi-day first, then by start.
#[wasm_bindgen(js_name = "sortEvents")]
pub fn sort_events(events_json: &str) -> Result<String, JsValue> {
    let mut events = parse_events(events_json)?;
    calendar_engine::sort_events(&mut events);
    to_json(&events)
}

#[wasm_bindgen(js_name = "isMultiDayEvent")]
pub fn is_multi_day_event(event_json: &str) -> Result<bool, JsValue> {
    let event = parse_event(event_json)?;
    Ok(calendar_engine::is_multi_day_event(&event))
}
