//! Simulated mail log handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::SimulatedMessage;
use crate::routes::console::ViewResponse;
use crate::state::AppState;

/// Build the mail router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/mail", get(list).delete(clear))
        .route("/api/mail/{id}/open", post(open_reset_link))
}

/// Recorded mail, newest first.
pub async fn list(State(state): State<AppState>) -> Json<Vec<SimulatedMessage>> {
    Json(state.console().mail())
}

/// Empty the log.
pub async fn clear(State(state): State<AppState>) -> StatusCode {
    state.console().clear_mail();
    StatusCode::NO_CONTENT
}

/// Follow the link in a reset message.
///
/// # Errors
///
/// 404 for an unknown message, 400 for a message without a reset link.
pub async fn open_reset_link(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ViewResponse>, AppError> {
    let console = state.console();
    console.open_reset_link(id)?;
    Ok(Json(ViewResponse {
        view: console.view(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use super::super::test_support::{app, send};
    use crate::services::Directory;

    #[tokio::test]
    async fn test_reset_mail_flow() {
        let (app, _) = app();
        send(
            &app,
            Method::POST,
            "/api/auth/forgot-password",
            Some(json!({ "email": Directory::SEED_USER_EMAIL })),
        )
        .await;

        let (status, body) = send(&app, Method::GET, "/api/mail", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["kind"], "reset");
        assert_eq!(body[0]["recipient"], Directory::SEED_USER_EMAIL);
        let id = body[0]["id"].as_str().map(str::to_string).unwrap_or_default();

        let (status, body) =
            send(&app, Method::POST, &format!("/api/mail/{id}/open"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["view"], "reset_password");

        let (status, _) = send(&app, Method::DELETE, "/api/mail", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, body) = send(&app, Method::GET, "/api/mail", None).await;
        assert_eq!(body, json!([]));

        let (status, _) = send(&app, Method::POST, &format!("/api/mail/{id}/open"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
