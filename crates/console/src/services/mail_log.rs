//! Simulated mail log.
//!
//! Messages are composed from Askama text templates and recorded newest
//! first. Nothing here ever delivers mail.

use std::collections::VecDeque;

use askama::Template;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use architect_core::{Email, MailKind};

use crate::models::SimulatedMessage;

/// Plain text body of the welcome message.
#[derive(Template)]
#[template(path = "mail/welcome.txt")]
struct WelcomeMailText<'a> {
    name: &'a str,
}

/// Plain text body of the password reset message.
#[derive(Template)]
#[template(path = "mail/reset.txt")]
struct ResetMailText;

/// Errors from composing or looking up simulated mail.
#[derive(Debug, Error)]
pub enum MailError {
    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// No message with this id is in the log.
    #[error("no mail with id {0}")]
    UnknownMessage(Uuid),

    /// The message has no reset link to follow.
    #[error("mail {0} is not a password reset message")]
    NotResetMessage(Uuid),

    /// Reset links are only followed from a signed-out console.
    #[error("Sign out before following a reset link.")]
    SignedIn,
}

/// Subject line for each template.
#[must_use]
pub const fn subject(kind: MailKind) -> &'static str {
    match kind {
        MailKind::Welcome => "Welcome to Architect!",
        MailKind::Reset => "Password Reset Request",
    }
}

/// Build a message for `recipient` from the template keyed by `kind`.
///
/// # Errors
///
/// Returns [`MailError::Template`] if the body template fails to render.
pub fn compose(
    recipient: &Email,
    kind: MailKind,
    sent_at: DateTime<Utc>,
) -> Result<SimulatedMessage, MailError> {
    let body = match kind {
        MailKind::Welcome => WelcomeMailText {
            name: recipient.local_part(),
        }
        .render()?,
        MailKind::Reset => ResetMailText.render()?,
    };

    Ok(SimulatedMessage {
        id: Uuid::new_v4(),
        recipient: recipient.clone(),
        subject: subject(kind).to_string(),
        body: body.trim_end().to_string(),
        sent_at,
        kind,
    })
}

/// Recorded messages, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MailLog {
    entries: VecDeque<SimulatedMessage>,
}

impl MailLog {
    /// Prepend a message.
    pub fn record(&mut self, message: SimulatedMessage) {
        self.entries.push_front(message);
    }

    /// Drop every recorded message.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&SimulatedMessage> {
        self.entries.iter().find(|message| message.id == id)
    }

    /// Messages in display order (newest first).
    pub fn iter(&self) -> impl Iterator<Item = &SimulatedMessage> {
        self.entries.iter()
    }

    /// Snapshot in display order.
    #[must_use]
    pub fn list(&self) -> Vec<SimulatedMessage> {
        self.entries.iter().cloned().collect()
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
