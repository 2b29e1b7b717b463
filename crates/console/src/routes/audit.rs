//! AI auditor handlers.

use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use serde::Deserialize;

use crate::catalog::DEFAULT_AUDIT_PATH;
use crate::error::AppError;
use crate::middleware::RequireSession;
use crate::models::{AuditPanel, AuditResult};
use crate::state::AppState;

/// Build the audit router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/audit", get(show).post(ask))
}

#[derive(Debug, Deserialize)]
pub struct AuditRequest {
    /// Catalog path; the user controller when omitted.
    pub path: Option<String>,
    pub question: String,
}

/// Pending question and last answer.
pub async fn show(_session: RequireSession, State(state): State<AppState>) -> Json<AuditPanel> {
    Json(state.console().read(|console| console.audit.clone()))
}

/// Ask the auditor. A failed provider call still answers 200 with the
/// fallback text and `failed: true`.
///
/// # Errors
///
/// 400 for an empty or oversized question, 404 for an unknown file, 409
/// while another audit is running.
pub async fn ask(
    _session: RequireSession,
    State(state): State<AppState>,
    Json(body): Json<AuditRequest>,
) -> Result<Json<AuditResult>, AppError> {
    let path = body.path.as_deref().unwrap_or(DEFAULT_AUDIT_PATH);
    let result = state.console().audit(path, &body.question).await?;
    Ok(Json(result))
}
