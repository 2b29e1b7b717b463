//! Account management handlers (admin only).

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::Serialize;

use architect_core::AccountId;

use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::Account;
use crate::state::AppState;

/// Build the accounts router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/accounts", get(list))
        .route("/api/accounts/{id}/deactivate", post(deactivate))
}

#[derive(Debug, Serialize)]
pub struct DeactivateResponse {
    pub id: AccountId,
    /// False when no account has this id.
    pub deactivated: bool,
}

/// Every account, active and inactive.
pub async fn list(_admin: RequireAdmin, State(state): State<AppState>) -> Json<Vec<Account>> {
    Json(state.console().list_accounts().await)
}

/// Soft-delete an account.
///
/// # Errors
///
/// 403 when the admin targets their own account.
pub async fn deactivate(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<AccountId>,
) -> Result<Json<DeactivateResponse>, AppError> {
    let deactivated = state.console().deactivate_account(id).await?;
    tracing::info!(admin_id = %admin.id, %id, deactivated, "Deactivation requested");
    Ok(Json(DeactivateResponse { id, deactivated }))
}
