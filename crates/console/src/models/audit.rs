//! Audit panel state.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A question waiting on the auditor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditQuery {
    pub path: String,
    pub question: String,
}

/// The outcome of one audit call, as shown on the auditor screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditResult {
    /// Catalog path of the snippet that was audited.
    pub path: String,
    pub question: String,
    /// Generated prose, or the fixed fallback text when `failed` is set.
    pub answer: String,
    pub failed: bool,
    pub completed_at: DateTime<Utc>,
}

/// Pending query and last result of the auditor screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditPanel {
    pub pending: Option<AuditQuery>,
    pub last: Option<AuditResult>,
}

impl AuditPanel {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}
