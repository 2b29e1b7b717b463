//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during login, registration and password recovery.
///
/// The display text is what the console shows in the error notification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email, deactivated account, or a password below the minimum
    /// length. The cases are deliberately indistinguishable to the caller.
    #[error("Invalid credentials.")]
    InvalidCredentials,

    /// Registration with an email that is already in the directory.
    #[error("User already exists.")]
    DuplicateAccount,

    /// Forgot-password request for an email that is not in the directory.
    #[error("No user found with that email.")]
    UnknownAccount,

    /// Registration with a malformed email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] architect_core::EmailError),

    /// Registration without a display name.
    #[error("Name cannot be empty.")]
    BlankName,

    /// Registration without a password.
    #[error("Password cannot be empty.")]
    BlankPassword,

    /// Login, registration and recovery are only offered while signed out.
    #[error("You are already signed in.")]
    AlreadySignedIn,

    /// Another authentication request is still outstanding.
    #[error("A request is already in progress.")]
    RequestInFlight,
}
