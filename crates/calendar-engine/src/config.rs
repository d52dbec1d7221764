//! Engine configuration: week layout and expansion bounds.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};

/// Default cap on loop iterations per expanded event.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// First day of the calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// Sunday-first weeks, matching the `weekDays` numbering (Sunday = 0).
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }
}

/// Settings shared by the expander and the query layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Week layout used for week bounds and weekly recurrence.
    pub week_starts_on: WeekStart,
    /// Upper bound on loop iterations while expanding a single event.
    pub max_iterations: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            week_starts_on: WeekStart::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document into a validated config. Missing keys take
    /// their default values.
    ///
    /// ```toml
    /// week_starts_on = "monday"
    /// max_iterations = 5000
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(s).map_err(|e| CalendarError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(CalendarError::Config(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
