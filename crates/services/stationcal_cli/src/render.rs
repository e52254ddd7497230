//! Plain-text rendering of a station week.

use std::fmt::Write;

use chrono::NaiveDate;
use chrono_tz::Tz;
use stationcal_calendar::{format_display_date, BookingKind, ClassifiedBooking, WeekWindow};

/// Renders one line per day, followed by that day's pickups and dropoffs.
///
/// `today` is marked with `*`. Times are shown in `tz`.
pub fn render_week(
    station_name: &str,
    window: &WeekWindow,
    days: &[(NaiveDate, Vec<ClassifiedBooking>)],
    tz: Tz,
    today: NaiveDate,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} | {} to {}",
        station_name,
        format_display_date(window.first()),
        format_display_date(window.last())
    );

    for (day, entries) in days {
        let marker = if *day == today { "*" } else { " " };
        let _ = writeln!(out, "{} {}", marker, format_display_date(*day));
        for entry in entries {
            let _ = writeln!(out, "    {}", render_entry(entry, tz));
        }
    }
    out
}

fn render_entry(entry: &ClassifiedBooking, tz: Tz) -> String {
    let (label, raw, instant) = match entry.kind {
        BookingKind::Pickup => ("pickup ", &entry.booking.start_date, entry.booking.start()),
        BookingKind::Dropoff => ("dropoff", &entry.booking.end_date, entry.booking.end()),
    };
    let time = match instant {
        Ok(instant) => instant.with_timezone(&tz).format("%H:%M").to_string(),
        Err(_) => raw.clone(),
    };
    format!(
        "{} {} {} ({})",
        label, time, entry.booking.customer_name, entry.booking.id
    )
}
