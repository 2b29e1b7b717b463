//! The console controller.
//!
//! [`Console`] owns the [`ConsoleState`] and runs every user-facing
//! operation: it waits out the artificial latency, checks the request
//! against the services, applies the resulting events and reports the
//! outcome as a notification. The state lock is never held across an
//! await.

pub mod store;

use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use architect_core::{AccountId, MailKind, Severity};

use crate::auditor::{AuditError, Auditor};
use crate::catalog;
use crate::models::{Account, AuditResult, Notification, SessionToken, SimulatedMessage};
use crate::router::{self, AccessError, View};
use crate::services::auth::{self, AuthError};
use crate::services::mail_log::{self, MailError};

pub use store::{ConsoleState, Event, SessionView};

/// Artificial delay before each simulated backend call completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub login: Duration,
    pub register: Duration,
    pub forgot_password: Duration,
    pub reset_password: Duration,
    pub list_accounts: Duration,
    pub deactivate_account: Duration,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            login: Duration::from_millis(800),
            register: Duration::from_millis(1000),
            forgot_password: Duration::from_millis(1200),
            reset_password: Duration::from_millis(1000),
            list_accounts: Duration::from_millis(500),
            deactivate_account: Duration::from_millis(400),
        }
    }
}

impl LatencyProfile {
    /// No delays at all.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            login: Duration::ZERO,
            register: Duration::ZERO,
            forgot_password: Duration::ZERO,
            reset_password: Duration::ZERO,
            list_accounts: Duration::ZERO,
            deactivate_account: Duration::ZERO,
        }
    }
}

/// Controller timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleSettings {
    pub latency: LatencyProfile,
    /// How long a notification stays in the queue unless dismissed.
    pub notification_ttl: Duration,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            latency: LatencyProfile::default(),
            notification_ttl: Duration::from_secs(4),
        }
    }
}

/// Handle to one console. Clones share the same state.
#[derive(Clone)]
pub struct Console {
    inner: Arc<ConsoleInner>,
}

struct ConsoleInner {
    state: Mutex<ConsoleState>,
    auditor: Auditor,
    settings: ConsoleSettings,
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("auditor", &self.inner.auditor)
            .field("settings", &self.inner.settings)
            .finish_non_exhaustive()
    }
}

/// Applies an event when dropped, so a loading flag is cleared even if the
/// caller stops polling mid-request.
struct SettleOnDrop<'a> {
    console: &'a Console,
    event: Option<Event>,
}

impl<'a> SettleOnDrop<'a> {
    const fn new(console: &'a Console, event: Event) -> Self {
        Self {
            console,
            event: Some(event),
        }
    }

    fn disarm(mut self) {
        self.event = None;
    }
}

impl Drop for SettleOnDrop<'_> {
    fn drop(&mut self) {
        if let Some(event) = self.event.take() {
            self.console.dispatch(event);
        }
    }
}

/// Admin session, and not the admin's own account.
fn may_deactivate(state: &ConsoleState, id: AccountId) -> Result<(), AccessError> {
    router::authorize(&state.session, View::AdminDashboard)?;
    match state.session.account() {
        Some(me) if me.id == id => Err(AccessError::SelfDeactivation),
        _ => Ok(()),
    }
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

impl Console {
    /// A console with the seeded directory.
    #[must_use]
    pub fn new(auditor: Auditor, settings: ConsoleSettings) -> Self {
        Self::with_state(ConsoleState::seeded(), auditor, settings)
    }

    #[must_use]
    pub fn with_state(state: ConsoleState, auditor: Auditor, settings: ConsoleSettings) -> Self {
        Self {
            inner: Arc::new(ConsoleInner {
                state: Mutex::new(state),
                auditor,
                settings,
            }),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &ConsoleSettings {
        &self.inner.settings
    }

    #[must_use]
    pub fn auditor(&self) -> &Auditor {
        &self.inner.auditor
    }

    fn lock(&self) -> MutexGuard<'_, ConsoleState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against the state under the lock.
    pub fn read<R>(&self, f: impl FnOnce(&ConsoleState) -> R) -> R {
        f(&self.lock())
    }

    fn update<R>(&self, f: impl FnOnce(&mut ConsoleState) -> R) -> R {
        f(&mut self.lock())
    }

    /// Apply one event.
    pub fn dispatch(&self, event: Event) {
        self.update(|state| state.apply(event));
    }

    /// Copy of the whole state.
    #[must_use]
    pub fn snapshot(&self) -> ConsoleState {
        self.read(Clone::clone)
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.read(|state| state.view)
    }

    #[must_use]
    pub fn current_account(&self) -> Option<Account> {
        self.read(|state| state.session.account().cloned())
    }

    // -------------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------------

    /// Show a notification and schedule its removal.
    pub fn push_notification(&self, message: impl Into<String>, severity: Severity) -> Uuid {
        let notification = Notification::new(message, severity);
        let id = notification.id;
        self.dispatch(Event::NotificationPushed(notification));
        self.schedule_expiry(id);
        id
    }

    /// Remove a notification now. Returns whether it was still live.
    pub fn dismiss_notification(&self, id: Uuid) -> bool {
        self.update(|state| {
            let live = state.notifications.contains(id);
            state.apply(Event::NotificationDismissed(id));
            live
        })
    }

    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.read(|state| state.notifications.entries().to_vec())
    }

    fn schedule_expiry(&self, id: Uuid) {
        let ttl = self.inner.settings.notification_ttl;
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(%id, "No async runtime, notification will not expire");
            return;
        };

        let console = Arc::downgrade(&self.inner);
        runtime.spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Some(inner) = console.upgrade() {
                Self { inner }.dispatch(Event::NotificationDismissed(id));
            }
        });
    }

    /// Report `err` as an error notification and hand it back.
    fn fail<E: Display>(&self, err: E) -> E {
        self.push_notification(err.to_string(), Severity::Error);
        err
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Switch screens.
    ///
    /// # Errors
    ///
    /// Returns the [`AccessError`] from [`router::authorize`]; the view is
    /// left unchanged.
    #[instrument(skip(self))]
    pub fn navigate(&self, view: View) -> Result<(), AccessError> {
        self.update(|state| {
            router::authorize(&state.session, view)?;
            state.apply(Event::Navigated(view));
            Ok(())
        })
        .map_err(|e| self.fail(e))
    }

    // -------------------------------------------------------------------------
    // Authentication
    // -------------------------------------------------------------------------

    fn begin_auth(&self) -> Result<SettleOnDrop<'_>, AuthError> {
        self.update(|state| {
            if state.session.loading {
                return Err(AuthError::RequestInFlight);
            }
            if state.session.is_authenticated() {
                return Err(AuthError::AlreadySignedIn);
            }
            state.apply(Event::AuthRequested);
            Ok(())
        })
        .map_err(|e| self.fail(e))?;
        Ok(SettleOnDrop::new(self, Event::AuthSettled))
    }

    /// Sign in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown email, an
    /// inactive account or a short password, and
    /// [`AuthError::RequestInFlight`] while another authentication request
    /// is outstanding.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        let _settle = self.begin_auth()?;
        pause(self.inner.settings.latency.login).await;

        let account = self
            .update(|state| {
                let account = auth::authenticate(&state.directory, email, password)?;
                state.apply(Event::LoggedIn {
                    account: account.clone(),
                    token: SessionToken::generate(),
                });
                Ok::<_, AuthError>(account)
            })
            .map_err(|e| self.fail(e))?;

        tracing::info!(account_id = %account.id, role = %account.role, "Signed in");
        self.push_notification(format!("Authenticated as {}", account.role), Severity::Success);
        Ok(account)
    }

    /// Sign out. Always succeeds.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        self.dispatch(Event::LoggedOut);
        self.push_notification("Session terminated.", Severity::Info);
    }

    /// Create an account and send the welcome mail. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::DuplicateAccount`], [`AuthError::InvalidEmail`],
    /// [`AuthError::BlankName`], [`AuthError::BlankPassword`] or
    /// [`AuthError::RequestInFlight`].
    #[instrument(skip(self, password))]
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<Account, AuthError> {
        let _settle = self.begin_auth()?;
        pause(self.inner.settings.latency.register).await;

        let today = Utc::now().date_naive();
        let account = self
            .update(|state| {
                let account =
                    auth::prepare_registration(&state.directory, name, email, password, today)?;
                state.apply(Event::AccountRegistered(account.clone()));
                state.apply(Event::Navigated(View::Login));
                Ok::<_, AuthError>(account)
            })
            .map_err(|e| self.fail(e))?;

        tracing::info!(account_id = %account.id, "Account registered");
        self.send_mail(&account, MailKind::Welcome);
        self.push_notification("Registration successful. Welcome email sent!", Severity::Success);
        Ok(account)
    }

    /// Send a reset link to an existing account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UnknownAccount`] if no account uses this email,
    /// or [`AuthError::RequestInFlight`].
    #[instrument(skip(self))]
    pub async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        let _settle = self.begin_auth()?;
        pause(self.inner.settings.latency.forgot_password).await;

        let account = self
            .read(|state| auth::recovery_target(&state.directory, email))
            .map_err(|e| self.fail(e))?;

        self.send_mail(&account, MailKind::Reset);
        self.dispatch(Event::Navigated(View::Login));
        self.push_notification("Reset link sent! Check Mail Log.", Severity::Success);
        Ok(())
    }

    /// Accept a new password. Passwords are not stored, so any value works.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::RequestInFlight`] while another authentication
    /// request is outstanding.
    #[instrument(skip(self, new_password))]
    pub async fn reset_password(&self, new_password: &str) -> Result<(), AuthError> {
        let _settle = self.begin_auth()?;
        pause(self.inner.settings.latency.reset_password).await;

        tracing::debug!(len = new_password.chars().count(), "Password reset accepted");
        self.dispatch(Event::Navigated(View::Login));
        self.push_notification("Password updated!", Severity::Success);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Directory
    // -------------------------------------------------------------------------

    /// Every account, active and inactive.
    #[instrument(skip(self))]
    pub async fn list_accounts(&self) -> Vec<Account> {
        pause(self.inner.settings.latency.list_accounts).await;
        self.read(|state| state.directory.list())
    }

    /// Soft-delete an account. Returns whether the id exists; an unknown id
    /// is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotAuthenticated`] or
    /// [`AccessError::AdminRequired`] unless an admin is signed in, and
    /// [`AccessError::SelfDeactivation`] for the admin's own account.
    ///
    /// The checks run again once the latency has passed, so a session that
    /// signs out mid-request deactivates nothing.
    #[instrument(skip(self))]
    pub async fn deactivate_account(&self, id: AccountId) -> Result<bool, AccessError> {
        self.read(|state| may_deactivate(state, id))
            .map_err(|e| self.fail(e))?;

        pause(self.inner.settings.latency.deactivate_account).await;

        let found = self
            .update(|state| {
                may_deactivate(state, id)?;
                let found = state.directory.get(id).is_some();
                state.apply(Event::AccountDeactivated(id));
                Ok::<_, AccessError>(found)
            })
            .map_err(|e| self.fail(e))?;
        if found {
            tracing::info!(%id, "Account deactivated");
            self.push_notification("User soft-deleted", Severity::Success);
        }
        Ok(found)
    }

    // -------------------------------------------------------------------------
    // Mail log
    // -------------------------------------------------------------------------

    fn send_mail(&self, account: &Account, kind: MailKind) {
        match mail_log::compose(&account.email, kind, Utc::now()) {
            Ok(message) => {
                tracing::info!(mail_id = %message.id, ?kind, "Simulated mail recorded");
                self.dispatch(Event::MailRecorded(message));
            }
            Err(e) => tracing::error!(error = %e, ?kind, "Failed to compose simulated mail"),
        }
    }

    #[must_use]
    pub fn mail(&self) -> Vec<SimulatedMessage> {
        self.read(|state| state.mail_log.list())
    }

    pub fn clear_mail(&self) {
        self.dispatch(Event::MailCleared);
    }

    /// Follow the link in a reset message to the reset screen.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::UnknownMessage`] or [`MailError::NotResetMessage`],
    /// and [`MailError::SignedIn`] while a session is active.
    #[instrument(skip(self))]
    pub fn open_reset_link(&self, mail_id: Uuid) -> Result<(), MailError> {
        self.update(|state| {
            if state.session.is_authenticated() {
                return Err(MailError::SignedIn);
            }
            let message = state
                .mail_log
                .get(mail_id)
                .ok_or(MailError::UnknownMessage(mail_id))?;
            if message.kind != MailKind::Reset {
                return Err(MailError::NotResetMessage(mail_id));
            }
            state.apply(Event::Navigated(View::ResetPassword));
            Ok(())
        })
        .map_err(|e| self.fail(e))
    }

    // -------------------------------------------------------------------------
    // Auditor
    // -------------------------------------------------------------------------

    /// Ask the auditor about a bundled file.
    ///
    /// Transport failures do not surface here: the result carries the
    /// fallback answer with `failed` set and an error notification is shown.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::EmptyQuestion`], [`AuditError::QuestionTooLong`],
    /// [`AuditError::UnknownFile`] or [`AuditError::RequestInFlight`].
    #[instrument(skip(self, question))]
    pub async fn audit(&self, path: &str, question: &str) -> Result<AuditResult, AuditError> {
        let file = self.begin_audit(path, question).map_err(|e| self.fail(e))?;
        let settle = SettleOnDrop::new(self, Event::AuditAbandoned);

        let outcome = self.inner.auditor.audit(file, question).await;
        settle.disarm();

        let answer = match outcome {
            Ok(answer) => answer,
            Err(e) => {
                self.dispatch(Event::AuditAbandoned);
                return Err(self.fail(e));
            }
        };

        let result = AuditResult {
            path: file.path.to_string(),
            question: question.to_string(),
            answer: answer.text,
            failed: answer.failed,
            completed_at: Utc::now(),
        };
        self.dispatch(Event::AuditSettled(result.clone()));
        if result.failed {
            self.push_notification(result.answer.clone(), Severity::Error);
        }
        Ok(result)
    }

    fn begin_audit(
        &self,
        path: &str,
        question: &str,
    ) -> Result<&'static catalog::BackendFile, AuditError> {
        Auditor::validate_question(question)?;
        let file =
            catalog::find(path).map_err(|_| AuditError::UnknownFile(path.to_string()))?;

        self.update(|state| {
            if state.audit.is_loading() {
                return Err(AuditError::RequestInFlight);
            }
            state.apply(Event::AuditRequested {
                path: file.path.to_string(),
                question: question.to_string(),
            });
            Ok(file)
        })
    }
}
