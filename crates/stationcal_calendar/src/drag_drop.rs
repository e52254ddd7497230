//! Drag-and-drop rescheduling of bookings.
//!
//! The view calls [`DragDropController::on_drag_start`] when a pickup or
//! dropoff card is picked up and [`DragDropController::on_drop`] when it is
//! released on a day. The controller builds the update payload and hands it
//! to a [`BookingPersistence`] collaborator on a spawned Tokio task, so the
//! update runs whether or not the view keeps the returned handle.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use stationcal_common::models::Booking;
use stationcal_common::services::BookingPersistence;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::classify::ClassifiedBooking;
use crate::payload::build_update_payload;

/// Persistence call started by a drop.
///
/// Await it to refresh the view with the stored booking, or drop it and
/// move on; the update keeps running either way.
pub type PendingUpdate<E> = JoinHandle<Result<Booking, E>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ClassifiedBooking),
}

pub struct DragDropController<P: BookingPersistence> {
    persistence: Arc<P>,
    state: DragState,
}

impl<P: BookingPersistence + 'static> DragDropController<P> {
    pub fn new(persistence: Arc<P>) -> Self {
        Self {
            persistence,
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// The booking currently being dragged, if any.
    pub fn dragged(&self) -> Option<&ClassifiedBooking> {
        match &self.state {
            DragState::Dragging(booking) => Some(booking),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Starts dragging `booking`, replacing any booking already in flight.
    pub fn on_drag_start(&mut self, booking: ClassifiedBooking) {
        debug!(
            "Drag started for {:?} of booking {}",
            booking.kind, booking.booking.id
        );
        self.state = DragState::Dragging(booking);
    }

    /// Abandons the current drag, returning the booking that was dragged.
    pub fn cancel(&mut self) -> Option<ClassifiedBooking> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(booking) => {
                debug!("Drag cancelled for booking {}", booking.booking.id);
                Some(booking)
            }
            DragState::Idle => None,
        }
    }

    /// Drops the dragged booking on `new_date`.
    ///
    /// Without a dragged booking this is a no-op and returns `None`.
    /// Otherwise the persistence call is spawned immediately and the
    /// controller is back to `Idle` when this returns, whatever the outcome
    /// of that call. Failures are logged and returned through the handle,
    /// never retried.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn on_drop(&mut self, new_date: DateTime<Utc>) -> Option<PendingUpdate<P::Error>> {
        let DragState::Dragging(dragged) = std::mem::take(&mut self.state) else {
            debug!("Drop on {} ignored, nothing is being dragged", new_date);
            return None;
        };

        let booking_id = dragged.booking.id.clone();
        info!(
            "Moving {} of booking {} to {}",
            dragged.kind.field_name(),
            booking_id,
            new_date
        );
        let payload = build_update_payload(dragged, new_date);
        let persistence = Arc::clone(&self.persistence);

        Some(tokio::spawn(async move {
            let result = persistence.update_booking(payload).await;
            if let Err(e) = &result {
                error!("Failed to update booking {}: {}", booking_id, e);
            }
            result
        }))
    }
}
