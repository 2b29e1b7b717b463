//! Simulated outbound mail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use architect_core::{Email, MailKind};

/// A message that would have been sent, recorded for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatedMessage {
    pub id: Uuid,
    pub recipient: Email,
    pub subject: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub kind: MailKind,
}
