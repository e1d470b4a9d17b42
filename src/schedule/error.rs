//! Scheduling error types

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during slot generation and selection
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Start date {start} is after end date {end}")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },

    #[error("Duration must be positive, got {hours}")]
    NonPositiveDuration { hours: f64 },

    #[error("No candidate slots to select from")]
    EmptyCandidates,
}
