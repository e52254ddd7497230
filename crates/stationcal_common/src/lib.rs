// --- File: crates/stationcal_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod logging; // Logging utilities
pub mod models; // Bookings, stations and notifications
pub mod notifications; // Shared notification registry
pub mod services; // Collaborator abstractions


// Re-export error types and utilities for easier access
pub use error::{
    internal_error, not_found, parse_error, validation_error, Context, StationcalError,
};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_config, init_with_level, log_error, log_result};

pub use models::{Booking, Notification, Station};
pub use notifications::{report_failure, Notifications};
pub use services::{BookingPersistence, BoxFuture, StationBookingSource, SuggestionSource};

// This crate provides the pieces shared by the calendar, autocomplete and CLI crates.
