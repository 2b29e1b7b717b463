//! Bundled, read-only demonstration content.
//!
//! The backend source files shown by the code viewer and fed to the auditor,
//! the two-table schema diagram, and the dashboard walkthrough. The content
//! is opaque text: nothing here parses or validates it.

pub mod dashboard;
pub mod highlight;
pub mod schema;

use serde::Serialize;
use thiserror::Error;

/// Errors from catalog lookups and rendering.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no bundled file at {0}")]
    UnknownFile(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Source language of a bundled file; selects the highlighting rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Sql,
    Javascript,
}

impl Language {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sql => "sql",
            Self::Javascript => "javascript",
        }
    }
}

/// One bundled backend source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackendFile {
    pub path: &'static str,
    pub language: Language,
    pub description: &'static str,
    pub content: &'static str,
}

/// The bundled files, in explorer order.
pub const BACKEND_FILES: [BackendFile; 6] = [
    BackendFile {
        path: "schema.sql",
        language: Language::Sql,
        description: "MySQL database structure for users, roles, and tokens.",
        content: include_str!("../../catalog/schema.sql"),
    },
    BackendFile {
        path: "server.js",
        language: Language::Javascript,
        description: "Main Express application entry point.",
        content: include_str!("../../catalog/server.js"),
    },
    BackendFile {
        path: "config/db.js",
        language: Language::Javascript,
        description: "MySQL connection using mysql2/promise.",
        content: include_str!("../../catalog/config/db.js"),
    },
    BackendFile {
        path: "middlewares/auth.js",
        language: Language::Javascript,
        description: "JWT Authentication and Role-based Access middleware.",
        content: include_str!("../../catalog/middlewares/auth.js"),
    },
    BackendFile {
        path: "controllers/userController.js",
        language: Language::Javascript,
        description: "Business logic for user management and authentication.",
        content: include_str!("../../catalog/controllers/userController.js"),
    },
    BackendFile {
        path: "utils/mailer.js",
        language: Language::Javascript,
        description: "Email utility using Nodemailer.",
        content: include_str!("../../catalog/utils/mailer.js"),
    },
];

/// File preselected on the auditor screen.
pub const DEFAULT_AUDIT_PATH: &str = "controllers/userController.js";

/// All bundled files.
#[must_use]
pub const fn files() -> &'static [BackendFile] {
    &BACKEND_FILES
}

/// Look up a bundled file by its exact path.
///
/// # Errors
///
/// Returns [`CatalogError::UnknownFile`] if no file has this path.
pub fn find(path: &str) -> Result<&'static BackendFile, CatalogError> {
    BACKEND_FILES
        .iter()
        .find(|file| file.path == path)
        .ok_or_else(|| CatalogError::UnknownFile(path.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_unique() {
        let mut paths: Vec<_> = files().iter().map(|file| file.path).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), BACKEND_FILES.len());
    }

    #[test]
    fn test_default_audit_file_exists() {
        let file = find(DEFAULT_AUDIT_PATH).expect("default file");
        assert!(file.content.contains("exports.softDelete"));
    }

    #[test]
    fn test_find_unknown() {
        assert!(matches!(find("routes/missing.js"), Err(CatalogError::UnknownFile(_))));
    }

    #[test]
    fn test_schema_file_is_sql() {
        let file = find("schema.sql").expect("schema");
        assert_eq!(file.language, Language::Sql);
        assert!(file.content.starts_with("CREATE DATABASE"));
    }
}
