//! Request extractors for the console API.

pub mod auth;

pub use auth::{RequireAdmin, RequireSession};
