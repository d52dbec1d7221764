//! Event and recurrence data model.
//!
//! The serde shape matches the calendar UI's JSON: camelCase keys, naive local
//! timestamps, and a recurrence object tagged by its `type` field.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::dates;
use crate::error::Result;

/// Display color tag of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    #[default]
    Sky,
    Amber,
    Violet,
    Rose,
    Emerald,
    Orange,
}

impl EventColor {
    pub const ALL: [EventColor; 6] = [
        EventColor::Sky,
        EventColor::Amber,
        EventColor::Violet,
        EventColor::Rose,
        EventColor::Emerald,
        EventColor::Orange,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventColor::Sky => "sky",
            EventColor::Amber => "amber",
            EventColor::Violet => "violet",
            EventColor::Rose => "rose",
            EventColor::Emerald => "emerald",
            EventColor::Orange => "orange",
        }
    }

    /// Look up a color by name, falling back to the default for anything unknown.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for EventColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = Option::<String>::deserialize(deserializer)?;
        Ok(name.map(|n| EventColor::from_name(&n)).unwrap_or_default())
    }
}

/// The repetition rule of a recurring event, keyed on `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RecurrenceRule {
    None,
    Daily,
    /// Repeats on each listed weekday (Sunday = 0 .. Saturday = 6).
    Weekly {
        #[serde(default, rename = "weekDays")]
        week_days: Vec<u8>,
    },
    /// Repeats on one day of every month. Months without that day are skipped.
    Monthly {
        #[serde(default, rename = "monthDay", skip_serializing_if = "Option::is_none")]
        month_day: Option<u32>,
    },
    /// Repeats every `interval` weeks, counted from the event's own start.
    Custom {
        #[serde(default = "default_interval")]
        interval: i32,
    },
    /// Any `type` this engine does not know. Treated as non-recurring.
    #[serde(other)]
    Unsupported,
}

impl RecurrenceRule {
    /// The `type` tag as it appears in JSON.
    pub fn kind(&self) -> &'static str {
        match self {
            RecurrenceRule::None => "none",
            RecurrenceRule::Daily => "daily",
            RecurrenceRule::Weekly { .. } => "weekly",
            RecurrenceRule::Monthly { .. } => "monthly",
            RecurrenceRule::Custom { .. } => "custom",
            RecurrenceRule::Unsupported => "unsupported",
        }
    }
}

fn default_interval() -> i32 {
    1
}

/// A recurrence rule plus its optional cutoff date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurrencePattern {
    #[serde(flatten)]
    pub rule: RecurrenceRule,
    /// No occurrence is generated on a date after this one.
    #[serde(
        default,
        rename = "endDate",
        skip_serializing_if = "Option::is_none",
        with = "optional_date"
    )]
    pub end_date: Option<NaiveDate>,
}

impl RecurrencePattern {
    pub fn new(rule: RecurrenceRule) -> Self {
        Self {
            rule,
            end_date: None,
        }
    }

    pub fn until(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn daily() -> Self {
        Self::new(RecurrenceRule::Daily)
    }

    pub fn weekly(week_days: impl Into<Vec<u8>>) -> Self {
        Self::new(RecurrenceRule::Weekly {
            week_days: week_days.into(),
        })
    }

    pub fn monthly(month_day: u32) -> Self {
        Self::new(RecurrenceRule::Monthly {
            month_day: Some(month_day),
        })
    }

    pub fn every_n_weeks(interval: i32) -> Self {
        Self::new(RecurrenceRule::Custom { interval })
    }

    /// True if the cutoff date lies strictly before `day`.
    pub fn ended_before(&self, day: NaiveDate) -> bool {
        self.end_date.is_some_and(|end| end < day)
    }
}

/// A calendar event, either as supplied by the caller or as a generated occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "timestamp")]
    pub start: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub end: NaiveDateTime,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub color: EventColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrencePattern>,
    /// Set only on occurrences materialized by the expander.
    #[serde(default)]
    pub is_recurring_instance: bool,
}

impl Event {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            start,
            end,
            all_day: false,
            color: EventColor::default(),
            location: None,
            recurrence: None,
            is_recurring_instance: false,
        }
    }

    pub fn with_recurrence(mut self, recurrence: RecurrencePattern) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    pub fn as_all_day(mut self) -> Self {
        self.all_day = true;
        self
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    /// Whole calendar days between the start date and the end date.
    pub fn duration_days(&self) -> i64 {
        dates::days_between(self.start_date(), self.end_date())
    }

    /// True if this event carries a rule that can produce occurrences.
    pub fn is_recurring(&self) -> bool {
        self.recurrence
            .as_ref()
            .is_some_and(|r| r.rule != RecurrenceRule::None)
    }
}

/// Parse a JSON array of events.
pub fn parse_events_json(json: &str) -> Result<Vec<Event>> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a single JSON event object.
pub fn parse_event_json(json: &str) -> Result<Event> {
    Ok(serde_json::from_str(json)?)
}

/// Serde adapter for naive timestamps written as `YYYY-MM-DDTHH:MM:SS`.
mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&ts.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        crate::dates::parse_timestamp(&s).map_err(D::Error::custom)
    }
}

/// Serde adapter for optional dates written as `YYYY-MM-DD`.
mod optional_date {
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.collect_str(&d.format("%Y-%m-%d")),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) => crate::dates::parse_date(&s).map(Some).map_err(D::Error::custom),
            None => Ok(None),
        }
    }
}
