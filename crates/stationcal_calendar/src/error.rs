//! Error types for the calendar crate

use chrono::NaiveDate;
use stationcal_common::StationcalError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Unknown time zone: {0}")]
    InvalidTimezone(String),
    // Midnight can be skipped by a DST transition in some zones
    #[error("Local midnight of {0} does not exist in the calendar time zone")]
    NonexistentLocalTime(NaiveDate),
}

impl From<CalendarError> for StationcalError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::InvalidTimezone(_) => StationcalError::ConfigError(err.to_string()),
            CalendarError::NonexistentLocalTime(_) => {
                StationcalError::ValidationError(err.to_string())
            }
        }
    }
}
