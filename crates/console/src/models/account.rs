//! Directory account type.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use architect_core::{AccountId, Email, Role};

/// An account in the mock directory.
///
/// Accounts are never removed; deactivation flips `is_active` and the
/// account stays visible in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: Email,
    pub role: Role,
    pub is_active: bool,
    pub created_at: NaiveDate,
}

impl Account {
    /// Whether this account may open admin-only screens.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
