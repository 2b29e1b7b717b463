//! Notification queue.
//!
//! Holds the live notifications in insertion order. Expiry timers live in
//! the controller; the queue only knows how to add and remove entries.

use serde::Serialize;
use uuid::Uuid;

use crate::models::Notification;

/// Live notifications, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NotificationQueue {
    entries: Vec<Notification>,
}

impl NotificationQueue {
    /// Append a notification.
    ///
    /// Ids are random v4 UUIDs; a push that collides with a live id is
    /// dropped so ids stay unique within the queue.
    pub fn push(&mut self, notification: Notification) {
        if self.contains(notification.id) {
            tracing::warn!(id = %notification.id, "Dropping notification with duplicate id");
            return;
        }
        self.entries.push(notification);
    }

    /// Remove a notification. Returns whether it was still live.
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|notification| notification.id != id);
        self.entries.len() != before
    }

    #[must_use]
    pub fn contains(&self, id: Uuid) -> bool {
        self.entries.iter().any(|notification| notification.id == id)
    }

    #[must_use]
    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
