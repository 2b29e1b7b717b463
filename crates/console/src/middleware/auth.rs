//! Session extractors.
//!
//! The console has one session; these extractors check it against the same
//! rules the view router applies to screens.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::models::Account;
use crate::router::{self, View};
use crate::state::AppState;

/// Extractor that requires a signed-in session.
///
/// Rejects with 401 when signed out.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireSession(account): RequireSession) -> impl IntoResponse {
///     format!("Hello, {}!", account.name)
/// }
/// ```
pub struct RequireSession(pub Account);

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let account = state.console().read(|console| {
            router::authorize(&console.session, View::Dashboard)?;
            Ok::<_, AppError>(console.session.account().cloned())
        })?;
        account.map(Self).ok_or_else(|| AppError::Internal("session without account".to_string()))
    }
}

/// Extractor that requires a signed-in admin.
///
/// Rejects with 401 when signed out and 403 for a non-admin session.
pub struct RequireAdmin(pub Account);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let account = state.console().read(|console| {
            router::authorize(&console.session, View::AdminDashboard)?;
            Ok::<_, AppError>(console.session.account().cloned())
        })?;
        account.map(Self).ok_or_else(|| AppError::Internal("session without account".to_string()))
    }
}
