//! In-memory station store backing the command line tool.
//!
//! Stations are read from a JSON file shaped like the `/stations` REST
//! response. The store serves station search for autocomplete and applies
//! booking updates coming from the drag-and-drop flow. Failed updates are
//! recorded in the shared [`Notifications`] registry.

use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use stationcal_common::models::{Booking, Station};
use stationcal_common::services::{BookingPersistence, BoxFuture, SuggestionSource};
use stationcal_common::{
    not_found, parse_error, report_failure, validation_error, Context, Notifications,
    StationcalError,
};
use tracing::{debug, info};

pub struct StationStore {
    stations: Mutex<Vec<Station>>,
    notifications: Notifications,
}

impl StationStore {
    pub fn new(stations: Vec<Station>, notifications: Notifications) -> Self {
        Self {
            stations: Mutex::new(stations),
            notifications,
        }
    }

    /// Reads stations from a JSON file.
    pub fn load(path: &Path, notifications: Notifications) -> Result<Self, StationcalError> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Cannot read stations file {}", path.display()))?;
        let stations: Vec<Station> = serde_json::from_str(&raw)
            .map_err(|e| parse_error(format!("Invalid stations file {}: {e}", path.display())))?;
        info!("Loaded {} stations from {}", stations.len(), path.display());
        Ok(Self::new(stations, notifications))
    }

    /// Writes the current stations back as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), StationcalError> {
        let json = serde_json::to_string_pretty(&*self.lock())?;
        fs::write(path, json)
            .with_context(|| format!("Cannot write stations file {}", path.display()))?;
        info!("Saved stations to {}", path.display());
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Station>> {
        self.stations.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn stations(&self) -> Vec<Station> {
        self.lock().clone()
    }

    pub fn station(&self, station_id: &str) -> Option<Station> {
        self.lock().iter().find(|s| s.id == station_id).cloned()
    }

    /// Looks a booking up across all stations.
    pub fn find_booking(&self, booking_id: &str) -> Option<Booking> {
        self.lock()
            .iter()
            .find_map(|s| s.find_booking(booking_id))
            .cloned()
    }

    /// Stations whose name or id contains the trimmed query, ignoring case.
    pub fn search(&self, query: &str) -> Vec<Station> {
        let needle = query.trim().to_lowercase();
        self.lock()
            .iter()
            .filter(|s| {
                s.name.to_lowercase().contains(&needle) || s.id.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    fn apply_update(&self, booking: Booking) -> Result<Booking, StationcalError> {
        booking
            .start()
            .and_then(|_| booking.end())
            .map_err(|e| validation_error(format!("Booking {} rejected: {e}", booking.id)))?;

        let mut stations = self.lock();
        let station = stations
            .iter_mut()
            .find(|s| s.id == booking.pickup_return_station_id)
            .ok_or_else(|| {
                not_found(format!("Station {}", booking.pickup_return_station_id))
            })?;

        if station.replace_booking(booking.clone()) {
            debug!("Stored booking {} at station {}", booking.id, station.id);
            Ok(booking)
        } else {
            Err(not_found(format!(
                "Booking {} at station {}",
                booking.id, station.id
            )))
        }
    }
}

impl SuggestionSource<Station> for StationStore {
    type Error = StationcalError;

    fn get_suggestions(&self, query: &str) -> BoxFuture<'_, Vec<Station>, Self::Error> {
        let result = self.search(query);
        debug!("{} stations match '{}'", result.len(), query);
        Box::pin(async move { Ok(result) })
    }
}

impl BookingPersistence for StationStore {
    type Error = StationcalError;

    fn update_booking(&self, booking: Booking) -> BoxFuture<'_, Booking, Self::Error> {
        Box::pin(async move {
            let booking_id = booking.id.clone();
            self.apply_update(booking).inspect_err(|e| {
                report_failure(
                    &self.notifications,
                    &format!("Could not update booking {booking_id}"),
                    e,
                )
            })
        })
    }
}
