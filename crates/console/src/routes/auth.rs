//! Mock authentication handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::post,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::Account;
use crate::router::View;
use crate::state::AppState;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/register", post(register))
        .route("/api/auth/forgot-password", post(forgot_password))
        .route("/api/auth/reset-password", post(reset_password))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}

/// The account an auth call acted on and the screen it led to.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub account: Account,
    pub view: View,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
    pub view: View,
}

/// Sign in.
///
/// # Errors
///
/// 401 for bad credentials, 409 while another auth request is running.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let console = state.console();
    let account = console.login(&body.email, &body.password).await?;
    Ok(Json(AuthResponse {
        account,
        view: console.view(),
    }))
}

/// Sign out.
pub async fn logout(State(state): State<AppState>) -> StatusCode {
    state.console().logout();
    StatusCode::NO_CONTENT
}

/// Create an account.
///
/// # Errors
///
/// 400 for invalid input, 409 for a taken email.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let console = state.console();
    let account = console
        .register(&body.name, &body.email, &body.password)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            account,
            view: console.view(),
        }),
    ))
}

/// Send a reset link.
///
/// # Errors
///
/// 404 if no account uses the email.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let console = state.console();
    console.forgot_password(&body.email).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse {
            message: "Reset link sent! Check Mail Log.",
            view: console.view(),
        }),
    ))
}

/// Accept a new password.
///
/// # Errors
///
/// 409 while another auth request is running.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let console = state.console();
    console.reset_password(&body.password).await?;
    Ok(Json(MessageResponse {
        message: "Password updated!",
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
    async fn test_login_and_logout() {
        let (app, console) = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({ "email": Directory::SEED_ADMIN_EMAIL, "password": "password123" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["account"]["name"], "Admin User");
        assert_eq!(body["view"], "dashboard");

        let (status, _) = send(&app, Method::POST, "/api/auth/logout", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(console.current_account().is_none());
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let (app, _) = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({ "email": Directory::SEED_ADMIN_EMAIL, "password": "short" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid credentials.");
    }

    #[tokio::test]
    async fn test_register_then_duplicate() {
        let (app, console) = app();
        let request = json!({ "name": "Dana", "email": "dana@example.com", "password": "pw" });

        let (status, body) =
            send(&app, Method::POST, "/api/auth/register", Some(request.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["account"]["id"], 3);
        assert_eq!(body["account"]["role"], "user");
        assert_eq!(body["view"], "login");
        assert_eq!(console.mail().len(), 1);

        let (status, body) = send(&app, Method::POST, "/api/auth/register", Some(request)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "User already exists.");
    }

    #[tokio::test]
    async fn test_forgot_and_reset() {
        let (app, _) = app();
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/auth/forgot-password",
            Some(json!({ "email": "nobody@example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/forgot-password",
            Some(json!({ "email": Directory::SEED_USER_EMAIL })),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(body["message"], "Reset link sent! Check Mail Log.");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/reset-password",
            Some(json!({ "password": "new-password" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["view"], "login");
    }
}
