//! View router and access rules.
//!
//! The console shows exactly one screen at a time. Four screens are public;
//! the rest need a signed-in session, and the user-management screen also
//! needs the admin role. The same rules decide which sidebar entries are
//! shown and whether a navigation request is honoured.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Session;

/// Screen identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Login,
    Register,
    ForgotPassword,
    ResetPassword,
    Dashboard,
    AdminDashboard,
    MailLog,
    CodeViewer,
    DatabaseSchema,
    AiAuditor,
}

impl View {
    /// Every screen, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Login,
        Self::Register,
        Self::ForgotPassword,
        Self::ResetPassword,
        Self::Dashboard,
        Self::AdminDashboard,
        Self::MailLog,
        Self::CodeViewer,
        Self::DatabaseSchema,
        Self::AiAuditor,
    ];

    /// Reachable without a session.
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(
            self,
            Self::Login | Self::Register | Self::ForgotPassword | Self::ResetPassword
        )
    }

    #[must_use]
    pub const fn requires_admin(self) -> bool {
        matches!(self, Self::AdminDashboard)
    }
}

/// Refusals from the access rules.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    #[error("Please sign in first.")]
    NotAuthenticated,

    #[error("Administrator access required.")]
    AdminRequired,

    /// Admins cannot deactivate the account they are signed in with.
    #[error("You cannot deactivate your own account.")]
    SelfDeactivation,
}

/// Check whether `session` may enter `view`.
///
/// # Errors
///
/// Returns [`AccessError::NotAuthenticated`] for a protected screen without a
/// session and [`AccessError::AdminRequired`] for an admin screen without the
/// admin role.
pub fn authorize(session: &Session, view: View) -> Result<(), AccessError> {
    if view.is_public() {
        return Ok(());
    }
    if !session.is_authenticated() {
        return Err(AccessError::NotAuthenticated);
    }
    if view.requires_admin() && !session.is_admin() {
        return Err(AccessError::AdminRequired);
    }
    Ok(())
}

/// A sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub view: View,
    pub label: &'static str,
    pub icon: &'static str,
}

/// A titled group of sidebar entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavSection {
    pub title: &'static str,
    pub items: Vec<NavItem>,
}

const OPERATIONS: [NavItem; 3] = [
    NavItem {
        view: View::Dashboard,
        label: "Overview",
        icon: "fa-chart-line",
    },
    NavItem {
        view: View::AdminDashboard,
        label: "User Management",
        icon: "fa-users-cog",
    },
    NavItem {
        view: View::MailLog,
        label: "Mail Log",
        icon: "fa-envelope-open-text",
    },
];

const ARCHITECTURE: [NavItem; 3] = [
    NavItem {
        view: View::CodeViewer,
        label: "Source Code",
        icon: "fa-code",
    },
    NavItem {
        view: View::DatabaseSchema,
        label: "SQL Schema",
        icon: "fa-database",
    },
    NavItem {
        view: View::AiAuditor,
        label: "AI Auditor",
        icon: "fa-robot",
    },
];

/// Sidebar for `session`: empty when signed out, admin entries filtered by role.
#[must_use]
pub fn navigation(session: &Session) -> Vec<NavSection> {
    if !session.is_authenticated() {
        return Vec::new();
    }

    [("Operations", &OPERATIONS), ("Architecture", &ARCHITECTURE)]
        .into_iter()
        .map(|(title, items)| NavSection {
            title,
            items: items
                .iter()
                .filter(|item| authorize(session, item.view).is_ok())
                .copied()
                .collect(),
        })
        .collect()
}
