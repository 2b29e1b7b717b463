//! Console state and navigation handlers.

use axum::{Json, Router, extract::State, routing::{get, post}};
use serde::{Deserialize, Serialize};

use crate::console::SessionView;
use crate::error::AppError;
use crate::models::{AuditPanel, Notification};
use crate::router::{self, NavSection, View};
use crate::state::AppState;

/// Build the console router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/state", get(show))
        .route("/api/view", post(navigate))
}

/// What the browser renders.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub session: SessionView,
    pub view: View,
    pub notifications: Vec<Notification>,
    pub navigation: Vec<NavSection>,
    pub audit: AuditPanel,
    /// False when no auditor backend is configured; audits then return the
    /// fallback answer.
    pub auditor_configured: bool,
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub view: View,
}

#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub view: View,
}

/// Current console state. The session token is never included.
pub async fn show(State(state): State<AppState>) -> Json<StateResponse> {
    let auditor_configured = state.console().auditor().is_configured();
    let response = state.console().read(|console| StateResponse {
        session: SessionView::from(&console.session),
        view: console.view,
        notifications: console.notifications.entries().to_vec(),
        navigation: router::navigation(&console.session),
        audit: console.audit.clone(),
        auditor_configured,
    });
    Json(response)
}

/// Switch screens.
///
/// # Errors
///
/// Returns 401/403 when the session may not enter the screen.
pub async fn navigate(
    State(state): State<AppState>,
    Json(body): Json<NavigateRequest>,
) -> Result<Json<ViewResponse>, AppError> {
    state.console().navigate(body.view)?;
    Ok(Json(ViewResponse { view: body.view }))
}
