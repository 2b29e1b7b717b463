//! Console state and its reducer.
//!
//! Every change to the console goes through [`ConsoleState::reduce`]. The
//! reducer does no I/O and reads no clock: ids, timestamps and tokens
//! arrive inside the [`Event`].

use serde::Serialize;
use uuid::Uuid;

use architect_core::AccountId;

use crate::models::{
    Account, AuditPanel, AuditQuery, AuditResult, Notification, Session, SessionToken,
    SimulatedMessage,
};
use crate::router::View;
use crate::services::{Directory, MailLog, NotificationQueue};

/// Everything the console shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleState {
    pub session: Session,
    pub view: View,
    pub notifications: NotificationQueue,
    pub mail_log: MailLog,
    pub directory: Directory,
    pub audit: AuditPanel,
}

/// A state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Navigated(View),
    /// An authentication request started; the session shows as loading.
    AuthRequested,
    AuthSettled,
    LoggedIn {
        account: Account,
        token: SessionToken,
    },
    LoggedOut,
    AccountRegistered(Account),
    AccountDeactivated(AccountId),
    NotificationPushed(Notification),
    NotificationDismissed(Uuid),
    MailRecorded(SimulatedMessage),
    MailCleared,
    AuditRequested {
        path: String,
        question: String,
    },
    AuditSettled(AuditResult),
    /// The pending audit ended without a result.
    AuditAbandoned,
}

impl ConsoleState {
    /// Fresh console: signed out on the login screen, directory seeded.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            directory: Directory::seeded(),
            ..Self::default()
        }
    }

    /// Apply one event.
    #[must_use]
    pub fn reduce(mut self, event: Event) -> Self {
        match event {
            Event::Navigated(view) => self.view = view,
            Event::AuthRequested => self.session.loading = true,
            Event::AuthSettled => self.session.loading = false,
            Event::LoggedIn { account, token } => {
                self.session = Session::signed_in(account, token);
                self.view = View::Dashboard;
            }
            Event::LoggedOut => {
                self.session.clear();
                self.view = View::Login;
            }
            Event::AccountRegistered(account) => {
                if let Err(e) = self.directory.insert(account) {
                    tracing::warn!(error = %e, "Ignoring registration");
                }
            }
            Event::AccountDeactivated(id) => {
                if !self.directory.soft_delete(id) {
                    tracing::debug!(%id, "Deactivation of unknown account ignored");
                }
            }
            Event::NotificationPushed(notification) => self.notifications.push(notification),
            Event::NotificationDismissed(id) => {
                self.notifications.dismiss(id);
            }
            Event::MailRecorded(message) => self.mail_log.record(message),
            Event::MailCleared => self.mail_log.clear(),
            Event::AuditRequested { path, question } => {
                self.audit.pending = Some(AuditQuery { path, question });
            }
            Event::AuditSettled(result) => {
                self.audit.pending = None;
                self.audit.last = Some(result);
            }
            Event::AuditAbandoned => self.audit.pending = None,
        }
        self
    }

    /// Apply an event in place.
    pub fn apply(&mut self, event: Event) {
        *self = std::mem::take(self).reduce(event);
    }
}

/// Session fields safe to show to the client. The token is never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub account: Option<Account>,
    pub is_authenticated: bool,
    pub loading: bool,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            account: session.account().cloned(),
            is_authenticated: session.is_authenticated(),
            loading: session.loading,
        }
    }
}
