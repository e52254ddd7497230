use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use stationcal_common::models::Booking;
use stationcal_common::services::StationBookingSource;
use tracing::{debug, warn};

use crate::week::WeekWindow;

/// Which boundary of a booking falls on the rendered day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingKind {
    /// The booking starts on the day
    Pickup,
    /// The booking ends on the day
    Dropoff,
}

impl BookingKind {
    /// Name of the booking field this kind controls, as serialized.
    pub fn field_name(self) -> &'static str {
        match self {
            BookingKind::Pickup => "startDate",
            BookingKind::Dropoff => "endDate",
        }
    }
}

/// A booking tagged with its relevance to one rendered day.
///
/// Serializes flat, with the tag under `"type"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedBooking {
    #[serde(flatten)]
    pub booking: Booking,
    #[serde(rename = "type")]
    pub kind: BookingKind,
}

impl ClassifiedBooking {
    pub fn new(booking: Booking, kind: BookingKind) -> Self {
        Self { booking, kind }
    }

    /// Drops the classification and returns the underlying booking.
    pub fn into_booking(self) -> Booking {
        self.booking
    }
}

/// Buckets bookings into pickups and dropoffs per calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingClassifier {
    tz: Tz,
}

impl Default for BookingClassifier {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl BookingClassifier {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    fn calendar_day(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }

    /// Bookings that start or end on `day`, in source order.
    ///
    /// A booking starting and ending on `day` yields a pickup followed by a
    /// dropoff. A missing source yields nothing. Bookings whose dates do not
    /// parse are skipped.
    pub fn for_day<S>(&self, day: NaiveDate, source: Option<&S>) -> Vec<ClassifiedBooking>
    where
        S: StationBookingSource + ?Sized,
    {
        let Some(source) = source else {
            return Vec::new();
        };

        let mut classified = Vec::new();
        for booking in source.bookings() {
            let (start, end) = match (booking.start(), booking.end()) {
                (Ok(start), Ok(end)) => (start, end),
                (Err(e), _) | (_, Err(e)) => {
                    warn!(
                        "Skipping booking {} at station {}: {}",
                        booking.id,
                        source.id(),
                        e
                    );
                    continue;
                }
            };

            if self.calendar_day(start) == day {
                classified.push(ClassifiedBooking::new(booking.clone(), BookingKind::Pickup));
            }
            if self.calendar_day(end) == day {
                classified.push(ClassifiedBooking::new(booking.clone(), BookingKind::Dropoff));
            }
        }

        debug!(
            "{} pickups/dropoffs on {} at station {}",
            classified.len(),
            day,
            source.id()
        );
        classified
    }

    /// Runs [`for_day`](Self::for_day) for every day of the window.
    pub fn for_week<S>(
        &self,
        window: &WeekWindow,
        source: Option<&S>,
    ) -> Vec<(NaiveDate, Vec<ClassifiedBooking>)>
    where
        S: StationBookingSource + ?Sized,
    {
        window
            .iter()
            .map(|day| (day, self.for_day(day, source)))
            .collect()
    }
}
