//! Transient status messages.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use architect_core::Severity;

/// A user-facing status message.
///
/// Lives in the queue until it is dismissed or its expiry timer fires,
/// whichever comes first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    /// Create a notification with a fresh random id.
    #[must_use]
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
        }
    }
}
