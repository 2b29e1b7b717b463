//! Dashboard, source viewer and schema handlers.

use axum::{
    Json, Router,
    extract::Path,
    routing::get,
};
use serde::Serialize;

use crate::catalog::{
    self, BackendFile, Language,
    dashboard::{self, StatTile, WalkthroughStep},
    highlight,
    schema::{self, SchemaDiagram},
};
use crate::error::AppError;
use crate::middleware::RequireSession;
use crate::state::AppState;

/// Build the catalog router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/dashboard", get(show_dashboard))
        .route("/api/files", get(list_files))
        .route("/api/files/{*path}", get(show_file))
        .route("/api/schema", get(show_schema))
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub greeting: String,
    pub steps: Vec<WalkthroughStep>,
    pub stats: &'static [StatTile],
}

/// A file as listed in the explorer.
#[derive(Debug, Serialize)]
pub struct FileSummary {
    pub path: &'static str,
    pub language: Language,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FileResponse {
    #[serde(flatten)]
    pub file: BackendFile,
    pub html: String,
}

/// Walkthrough for the signed-in role.
pub async fn show_dashboard(RequireSession(account): RequireSession) -> Json<DashboardResponse> {
    Json(DashboardResponse {
        greeting: format!("Welcome back, {}", account.name),
        steps: dashboard::walkthrough(account.role),
        stats: &dashboard::STATS,
    })
}

/// Bundled backend files without their content.
pub async fn list_files(_session: RequireSession) -> Json<Vec<FileSummary>> {
    Json(
        catalog::files()
            .iter()
            .map(|file| FileSummary {
                path: file.path,
                language: file.language,
                description: file.description,
            })
            .collect(),
    )
}

/// One file with its highlighted rendering.
///
/// # Errors
///
/// 404 for an unknown path.
pub async fn show_file(
    _session: RequireSession,
    Path(path): Path<String>,
) -> Result<Json<FileResponse>, AppError> {
    let file = catalog::find(&path)?;
    let html = highlight::highlight_file(file)?;
    Ok(Json(FileResponse { file: *file, html }))
}

/// The schema diagram.
pub async fn show_schema(_session: RequireSession) -> Json<SchemaDiagram> {
    Json(schema::DIAGRAM)
}
