use chrono::{DateTime, SecondsFormat, Utc};
use stationcal_common::models::Booking;

use crate::classify::{BookingKind, ClassifiedBooking};

/// Projects a move of `classified` to `new_date` onto the raw booking.
///
/// A pickup moves `start_date`, a dropoff moves `end_date`; the other
/// boundary is passed through untouched. The new value is written with
/// millisecond precision and a `Z` suffix (`2025-07-15T10:00:00.000Z`).
pub fn build_update_payload(classified: ClassifiedBooking, new_date: DateTime<Utc>) -> Booking {
    let kind = classified.kind;
    let mut booking = classified.into_booking();
    let iso = new_date.to_rfc3339_opts(SecondsFormat::Millis, true);

    match kind {
        BookingKind::Pickup => booking.start_date = iso,
        BookingKind::Dropoff => booking.end_date = iso,
    }
    booking
}
