// --- File: crates/stationcal_calendar/src/lib.rs ---
// Declare modules within this crate
pub mod classify;
pub mod drag_drop;
pub mod error;
pub mod payload;
pub mod week;
#[cfg(test)]
mod week_proptest;
#[cfg(test)]
mod week_test;

pub use classify::{BookingClassifier, BookingKind, ClassifiedBooking};
pub use drag_drop::{DragDropController, DragState, PendingUpdate};
pub use error::CalendarError;
pub use payload::build_update_payload;
pub use week::{format_display_date, parse_timezone, WeekCalendar, WeekWindow};
