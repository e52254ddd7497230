//! Registry of user-facing notifications.
//!
//! One registry is created by the application and handed to every
//! collaborator that needs to surface failures. Cloning the handle shares the
//! underlying list; separate `Notifications::new()` calls are independent.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error};
use uuid::Uuid;

use crate::models::Notification;

#[derive(Debug, Clone, Default)]
pub struct Notifications {
    inner: Arc<Mutex<Vec<Notification>>>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, Vec<Notification>> {
        // A panic while holding the lock cannot leave the Vec half-updated
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add(&self, notification: Notification) {
        debug!("Adding notification: {}", notification.message);
        self.entries().push(notification);
    }

    /// Appends all notifications, keeping their order.
    pub fn add_all<I>(&self, notifications: I)
    where
        I: IntoIterator<Item = Notification>,
    {
        self.entries().extend(notifications);
    }

    /// Removes the notification at `index`. Out-of-range indices are ignored.
    pub fn remove(&self, index: usize) -> Option<Notification> {
        let mut entries = self.entries();
        if index < entries.len() {
            Some(entries.remove(index))
        } else {
            None
        }
    }

    pub fn remove_by_id(&self, id: Uuid) -> Option<Notification> {
        let mut entries = self.entries();
        let index = entries.iter().position(|n| n.id == id)?;
        Some(entries.remove(index))
    }

    /// Snapshot of the current notifications, oldest first.
    pub fn list(&self) -> Vec<Notification> {
        self.entries().clone()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn clear(&self) {
        self.entries().clear();
    }
}

/// Logs a collaborator failure and records it as a notification.
pub fn report_failure<E: fmt::Display>(notifications: &Notifications, context: &str, err: E) {
    let message = format!("{}: {}", context, err);
    error!("{}", message);
    notifications.add(Notification::new(message));
}
