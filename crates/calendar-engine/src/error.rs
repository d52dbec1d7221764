//! Error types for calendar-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    /// A `custom` recurrence must step forward by at least one week.
    #[error("Invalid recurrence interval: {0} (must be a positive number of weeks)")]
    InvalidInterval(i32),

    #[error("Expansion exceeded {limit} iterations")]
    IterationLimit { limit: usize },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid event JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CalendarError>;
