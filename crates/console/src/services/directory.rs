//! Mock directory service.
//!
//! An in-memory account list standing in for a real user store. It is
//! seeded with one admin and one standard user and is never persisted.

use chrono::NaiveDate;
use thiserror::Error;

use architect_core::{AccountId, Email, Role};

use crate::models::Account;

/// Errors raised by directory writes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// Another account already uses this email.
    #[error("an account with email {0} already exists")]
    DuplicateEmail(Email),
}

/// In-memory account store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    accounts: Vec<Account>,
}

impl Directory {
    /// Email of the seeded administrator.
    pub const SEED_ADMIN_EMAIL: &'static str = "admin@example.com";
    /// Email of the seeded standard user.
    pub const SEED_USER_EMAIL: &'static str = "user@example.com";

    /// A directory holding the two demonstration accounts.
    #[must_use]
    pub fn seeded() -> Self {
        let seed = [
            (
                "Admin User",
                Self::SEED_ADMIN_EMAIL,
                Role::Admin,
                NaiveDate::from_ymd_opt(2023, 1, 1),
            ),
            (
                "Standard User",
                Self::SEED_USER_EMAIL,
                Role::User,
                NaiveDate::from_ymd_opt(2023, 5, 12),
            ),
        ];

        let mut directory = Self::default();
        for (name, email, role, created_at) in seed {
            let (Ok(email), Some(created_at)) = (Email::parse(email), created_at) else {
                continue;
            };
            let account = Account {
                id: directory.next_id(),
                name: name.to_string(),
                email,
                role,
                is_active: true,
                created_at,
            };
            directory.accounts.push(account);
        }
        directory
    }

    /// Snapshot of every account, active and inactive, in creation order.
    #[must_use]
    pub fn list(&self) -> Vec<Account> {
        self.accounts.clone()
    }

    /// Iterate accounts without copying.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Exact-match lookup by email.
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.email == *email)
    }

    #[must_use]
    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    /// The id the next created account receives: one past the current count.
    #[must_use]
    pub fn next_id(&self) -> AccountId {
        let count = i32::try_from(self.accounts.len()).unwrap_or(i32::MAX);
        AccountId::new(count).next()
    }

    /// Add an account.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::DuplicateEmail`] if the email is taken; the
    /// directory is left unchanged.
    pub fn insert(&mut self, account: Account) -> Result<(), DirectoryError> {
        if self.find_by_email(account.email.as_str()).is_some() {
            return Err(DirectoryError::DuplicateEmail(account.email));
        }
        self.accounts.push(account);
        Ok(())
    }

    /// Mark an account inactive.
    ///
    /// Returns whether an account with this id exists. Unknown ids are
    /// ignored and deactivating twice leaves the same state as once.
    pub fn soft_delete(&mut self, id: AccountId) -> bool {
        match self.accounts.iter_mut().find(|account| account.id == id) {
            Some(account) => {
                account.is_active = false;
                true
            }
            None => false,
        }
    }
}
