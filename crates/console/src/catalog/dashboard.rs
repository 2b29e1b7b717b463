//! Dashboard walkthrough content.

use serde::Serialize;

use architect_core::Role;

use crate::router::View;

/// A manual testing step linking to the screen where it is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WalkthroughStep {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub view: View,
    pub admin_only: bool,
}

/// A headline figure on the dashboard. The values are decorative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatTile {
    pub label: &'static str,
    pub value: &'static str,
}

const STEPS: [WalkthroughStep; 4] = [
    WalkthroughStep {
        title: "1. Simulated Mailing",
        description: "Trigger a reset email from Login, then verify and interact with it in the Mail Log.",
        icon: "fa-envelope",
        view: View::MailLog,
        admin_only: false,
    },
    WalkthroughStep {
        title: "2. User Lifecycle",
        description: "As Admin, perform a 'Soft Delete' on mock users and observe state persistence.",
        icon: "fa-users-cog",
        view: View::AdminDashboard,
        admin_only: true,
    },
    WalkthroughStep {
        title: "3. AI Architecture Audit",
        description: "Use the AI Auditor to query the real Node.js source files for vulnerabilities.",
        icon: "fa-robot",
        view: View::AiAuditor,
        admin_only: false,
    },
    WalkthroughStep {
        title: "4. Schema Verification",
        description: "Analyze the SQL Schema for proper indexing and relation constraints.",
        icon: "fa-database",
        view: View::DatabaseSchema,
        admin_only: false,
    },
];

pub const STATS: [StatTile; 4] = [
    StatTile {
        label: "Users",
        value: "1,284",
    },
    StatTile {
        label: "Mails Sent",
        value: "45.2k",
    },
    StatTile {
        label: "Active Tokens",
        value: "82",
    },
    StatTile {
        label: "Server Load",
        value: "4%",
    },
];

/// Walkthrough steps visible to `role`; admin-only steps are dropped for
/// everyone else.
#[must_use]
pub fn walkthrough(role: Role) -> Vec<WalkthroughStep> {
    STEPS
        .into_iter()
        .filter(|step| !step.admin_only || role.is_admin())
        .collect()
}
