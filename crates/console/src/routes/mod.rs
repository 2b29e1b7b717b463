//! HTTP route handlers for the console.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                         - Health check
//!
//! # Console
//! GET    /api/state                      - Session, view, notifications, sidebar, audit panel
//! POST   /api/view                       - Switch screens
//!
//! # Auth (mock directory)
//! POST   /api/auth/login                 - Sign in
//! POST   /api/auth/logout                - Sign out
//! POST   /api/auth/register              - Create account, send welcome mail
//! POST   /api/auth/forgot-password       - Send reset mail
//! POST   /api/auth/reset-password        - Accept a new password
//!
//! # Notifications
//! GET    /api/notifications              - Live notifications
//! POST   /api/notifications              - Show a notification
//! DELETE /api/notifications/{id}         - Dismiss a notification
//!
//! # Mail log
//! GET    /api/mail                       - Simulated mail, newest first
//! DELETE /api/mail                       - Clear the log
//! POST   /api/mail/{id}/open             - Follow a reset link
//!
//! # Accounts (admin only)
//! GET    /api/accounts                   - All accounts
//! POST   /api/accounts/{id}/deactivate   - Soft delete
//!
//! # Architecture (signed in)
//! GET    /api/dashboard                  - Walkthrough and stat tiles
//! GET    /api/files                      - Bundled backend files
//! GET    /api/files/{*path}              - One file with highlighted HTML
//! GET    /api/schema                     - Schema diagram
//! GET    /api/audit                      - Audit panel
//! POST   /api/audit                      - Ask the auditor
//! ```

use axum::{Router, http::Uri, routing::get};

use crate::error::AppError;
use crate::state::AppState;

pub mod accounts;
pub mod audit;
pub mod auth;
pub mod catalog;
pub mod console;
pub mod mail;
pub mod notifications;

/// Build the complete console router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(console::router())
        .merge(auth::router())
        .merge(notifications::router())
        .merge(mail::router())
        .merge(accounts::router())
        .merge(catalog::router())
        .merge(audit::router())
        .fallback(not_found)
}

/// Health check.
async fn health() -> &'static str {
    "ok"
}

/// JSON 404 for unmatched paths.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
