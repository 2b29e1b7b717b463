//! Unified error handling for the HTTP surface.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::auditor::AuditError;
use crate::catalog::CatalogError;
use crate::router::AccessError;
use crate::services::{AuthError, MailError};

/// Application-level error type for the console API.
///
/// Domain errors keep their own display text, which is what the console
/// shows in its error notification.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Mail(#[from] MailError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Audit(#[from] AuditError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Auth(e) => match e {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::DuplicateAccount
                | AuthError::AlreadySignedIn
                | AuthError::RequestInFlight => StatusCode::CONFLICT,
                AuthError::UnknownAccount => StatusCode::NOT_FOUND,
                AuthError::InvalidEmail(_) | AuthError::BlankName | AuthError::BlankPassword => {
                    StatusCode::BAD_REQUEST
                }
            },
            Self::Access(e) => match e {
                AccessError::NotAuthenticated => StatusCode::UNAUTHORIZED,
                AccessError::AdminRequired | AccessError::SelfDeactivation => StatusCode::FORBIDDEN,
            },
            Self::Mail(e) => match e {
                MailError::UnknownMessage(_) => StatusCode::NOT_FOUND,
                MailError::NotResetMessage(_) => StatusCode::BAD_REQUEST,
                MailError::SignedIn => StatusCode::CONFLICT,
                MailError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Catalog(e) => match e {
                CatalogError::UnknownFile(_) => StatusCode::NOT_FOUND,
                CatalogError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Audit(e) => match e {
                AuditError::EmptyQuestion | AuditError::QuestionTooLong { .. } => {
                    StatusCode::BAD_REQUEST
                }
                AuditError::UnknownFile(_) => StatusCode::NOT_FOUND,
                AuditError::RequestInFlight => StatusCode::CONFLICT,
                AuditError::NotConfigured | AuditError::Transport(_) => StatusCode::BAD_GATEWAY,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log server errors with Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Console request error"
            );
        }

        // Don't expose internal error details to clients
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn get_status(err: impl Into<AppError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(AuthError::DuplicateAccount);
        assert_eq!(err.to_string(), "User already exists.");

        let err = AppError::NotFound("mail 7".to_string());
        assert_eq!(err.to_string(), "Not found: mail 7");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(get_status(AuthError::InvalidCredentials), StatusCode::UNAUTHORIZED);
        assert_eq!(get_status(AuthError::DuplicateAccount), StatusCode::CONFLICT);
        assert_eq!(get_status(AuthError::UnknownAccount), StatusCode::NOT_FOUND);
        assert_eq!(get_status(AuthError::BlankName), StatusCode::BAD_REQUEST);
        assert_eq!(get_status(AccessError::NotAuthenticated), StatusCode::UNAUTHORIZED);
        assert_eq!(get_status(AccessError::AdminRequired), StatusCode::FORBIDDEN);
        assert_eq!(
            get_status(MailError::UnknownMessage(Uuid::nil())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(CatalogError::UnknownFile("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(get_status(AuditError::EmptyQuestion), StatusCode::BAD_REQUEST);
        assert_eq!(get_status(AuditError::RequestInFlight), StatusCode::CONFLICT);
        assert_eq!(get_status(AuditError::NotConfigured), StatusCode::BAD_GATEWAY);
        assert_eq!(
            get_status(AppError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
