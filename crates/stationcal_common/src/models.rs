// --- File: crates/stationcal_common/src/models.rs ---

// Data structures shared across the workspace. Field names follow the REST
// payloads of the stations API, so a `/stations` response deserializes as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StationcalError;

/// A vehicle booking between a pickup and a return at one station.
///
/// The range boundaries stay ISO-8601 strings; use [`Booking::start`] and
/// [`Booking::end`] for typed access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub pickup_return_station_id: String,
    pub customer_name: String,
    pub start_date: String, // ISO 8601 format
    pub end_date: String,   // ISO 8601 format
}

impl Booking {
    /// Parses `start_date` as an RFC 3339 instant.
    pub fn start(&self) -> Result<DateTime<Utc>, StationcalError> {
        parse_iso(&self.start_date, "startDate")
    }

    /// Parses `end_date` as an RFC 3339 instant.
    pub fn end(&self) -> Result<DateTime<Utc>, StationcalError> {
        parse_iso(&self.end_date, "endDate")
    }
}

fn parse_iso(value: &str, field: &str) -> Result<DateTime<Utc>, StationcalError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StationcalError::ParseError(format!("Invalid {field} '{value}': {e}")))
}

/// A pickup/return station together with its bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

impl Station {
    /// Replaces the booking with the same id, keeping its position.
    ///
    /// Returns `false` and leaves the station untouched if no booking matches.
    pub fn replace_booking(&mut self, booking: Booking) -> bool {
        match self.bookings.iter_mut().find(|b| b.id == booking.id) {
            Some(slot) => {
                *slot = booking;
                true
            }
            None => false,
        }
    }

    pub fn find_booking(&self, booking_id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == booking_id)
    }
}

/// A user-facing message, e.g. about a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates a notification; the message is kept exactly as given.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}
