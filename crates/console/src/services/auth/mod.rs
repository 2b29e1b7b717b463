//! Mock authentication rules.
//!
//! Pure checks against the [`Directory`]; the controller adds the artificial
//! latency, the session bookkeeping and the notifications around them.

mod error;

pub use error::AuthError;

use chrono::NaiveDate;

use architect_core::{Email, Role};

use crate::models::Account;
use crate::services::directory::Directory;

/// Shortest password the mock directory accepts at login.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Why a login was refused. Only logged; callers see
/// [`AuthError::InvalidCredentials`] for all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Refusal {
    UnknownEmail,
    PasswordTooShort,
    Deactivated,
}

/// Check a login attempt.
///
/// Succeeds iff an account with exactly this email exists, is active, and
/// the password is at least [`MIN_PASSWORD_LENGTH`] characters long.
/// Passwords are not stored, so any long-enough password is accepted.
///
/// # Errors
///
/// Returns [`AuthError::InvalidCredentials`] otherwise.
pub fn authenticate(directory: &Directory, email: &str, password: &str) -> Result<Account, AuthError> {
    let refusal = match directory.find_by_email(email) {
        None => Refusal::UnknownEmail,
        Some(_) if password.chars().count() < MIN_PASSWORD_LENGTH => Refusal::PasswordTooShort,
        Some(account) if !account.is_active => Refusal::Deactivated,
        Some(account) => return Ok(account.clone()),
    };

    tracing::debug!(?refusal, "Login refused");
    Err(AuthError::InvalidCredentials)
}

/// Validate a registration and build the account it would create.
///
/// The new account gets the next sequential id, the default role, the
/// active flag and `today` as its creation date.
///
/// # Errors
///
/// Returns [`AuthError::BlankName`], [`AuthError::BlankPassword`],
/// [`AuthError::InvalidEmail`] or [`AuthError::DuplicateAccount`].
pub fn prepare_registration(
    directory: &Directory,
    name: &str,
    email: &str,
    password: &str,
    today: NaiveDate,
) -> Result<Account, AuthError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AuthError::BlankName);
    }
    if password.is_empty() {
        return Err(AuthError::BlankPassword);
    }

    let email = Email::parse(email)?;
    if directory.find_by_email(email.as_str()).is_some() {
        return Err(AuthError::DuplicateAccount);
    }

    Ok(Account {
        id: directory.next_id(),
        name: name.to_string(),
        email,
        role: Role::default(),
        is_active: true,
        created_at: today,
    })
}

/// Resolve a forgot-password request to the account it targets.
///
/// # Errors
///
/// Returns [`AuthError::UnknownAccount`] if no account uses this email.
pub fn recovery_target(directory: &Directory, email: &str) -> Result<Account, AuthError> {
    directory
        .find_by_email(email)
        .cloned()
        .ok_or(AuthError::UnknownAccount)
}
