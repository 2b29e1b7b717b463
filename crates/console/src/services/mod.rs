//! Console services.
//!
//! Each service owns one piece of the console state and exposes the
//! transitions on it. The controller in [`crate::console`] composes them.

pub mod auth;
pub mod directory;
pub mod mail_log;
pub mod notifications;

pub use auth::AuthError;
pub use directory::{Directory, DirectoryError};
pub use mail_log::{MailError, MailLog};
pub use notifications::NotificationQueue;
