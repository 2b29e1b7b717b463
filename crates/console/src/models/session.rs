//! Session state for the console's single signed-in user.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use architect_core::Role;

use super::account::Account;

/// Prefix carried by every fabricated session token.
pub const TOKEN_PREFIX: &str = "mock-jwt-token-";

const TOKEN_SUFFIX_LEN: usize = 10;
const TOKEN_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Opaque session token.
///
/// The token is never verified by anything; it exists so the session looks
/// like the output of a real login endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Fabricate a fresh token: the fixed prefix followed by random base-36
    /// characters.
    #[must_use]
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let suffix: String = (0..TOKEN_SUFFIX_LEN)
            .map(|_| {
                let idx = rng.random_range(0..TOKEN_ALPHABET.len());
                char::from(TOKEN_ALPHABET.get(idx).copied().unwrap_or(b'0'))
            })
            .collect();
        Self(format!("{TOKEN_PREFIX}{suffix}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens stay out of logs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken([REDACTED])")
    }
}

/// Authentication state.
///
/// Authenticated exactly when an account is present; the account and token
/// are always set and cleared together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    account: Option<Account>,
    token: Option<SessionToken>,
    /// An authentication request (login, register, reset) is outstanding.
    pub loading: bool,
}

impl Session {
    /// A fresh authenticated session.
    #[must_use]
    pub const fn signed_in(account: Account, token: SessionToken) -> Self {
        Self {
            account: Some(account),
            token: Some(token),
            loading: false,
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.account.is_some()
    }

    #[must_use]
    pub const fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    #[must_use]
    pub const fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    /// Role of the signed-in account, if any.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.account.as_ref().map(|account| account.role)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role().is_some_and(Role::is_admin)
    }

    /// Drop the identity and token. The loading flag belongs to the
    /// outstanding request, which still settles it.
    pub fn clear(&mut self) {
        self.account = None;
        self.token = None;
    }
}
