//! Notification handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use architect_core::Severity;

use crate::error::AppError;
use crate::models::Notification;
use crate::state::AppState;

/// Build the notifications router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/notifications", get(list).post(push))
        .route("/api/notifications/{id}", delete(dismiss))
}

#[derive(Debug, Deserialize)]
pub struct PushRequest {
    pub message: String,
    #[serde(default)]
    pub severity: Severity,
}

#[derive(Debug, Serialize)]
pub struct PushResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct DismissResponse {
    /// False when the notification had already expired or been dismissed.
    pub dismissed: bool,
}

/// Live notifications, oldest first.
pub async fn list(State(state): State<AppState>) -> Json<Vec<Notification>> {
    Json(state.console().notifications())
}

/// Show a notification.
///
/// # Errors
///
/// 400 for an empty message.
pub async fn push(
    State(state): State<AppState>,
    Json(body): Json<PushRequest>,
) -> Result<(StatusCode, Json<PushResponse>), AppError> {
    if body.message.trim().is_empty() {
        return Err(AppError::BadRequest("message cannot be empty".to_string()));
    }
    let id = state.console().push_notification(body.message, body.severity);
    Ok((StatusCode::CREATED, Json(PushResponse { id })))
}

/// Dismiss a notification. Dismissing twice is not an error.
pub async fn dismiss(State(state): State<AppState>, Path(id): Path<Uuid>) -> Json<DismissResponse> {
    Json(DismissResponse {
        dismissed: state.console().dismiss_notification(id),
    })
}
