//! Collaborator abstractions.
//!
//! The calendar and autocomplete components never talk to HTTP or a store
//! directly. They consume these traits, which keeps them testable with
//! in-memory implementations.

use std::future::Future;
use std::pin::Pin;

use crate::models::{Booking, Station};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Source of autocomplete suggestions, e.g. a station search endpoint.
pub trait SuggestionSource<T>: Send + Sync {
    /// Error type returned when fetching suggestions fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch suggestions for the given query text.
    fn get_suggestions(&self, query: &str) -> BoxFuture<'_, Vec<T>, Self::Error>;
}

/// Persists an updated booking and returns the stored version.
///
/// Retry and user notification on failure belong to the implementation.
pub trait BookingPersistence: Send + Sync {
    /// Error type returned when the update is rejected.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Store the booking, replacing the one with the same id.
    fn update_booking(&self, booking: Booking) -> BoxFuture<'_, Booking, Self::Error>;
}

/// Read-only view of a station and the bookings attached to it.
pub trait StationBookingSource {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn bookings(&self) -> &[Booking];
}

impl StationBookingSource for Station {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn bookings(&self) -> &[Booking] {
        &self.bookings
    }
}
