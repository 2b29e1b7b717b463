//! Core types for the Architect console.
//!
//! This module provides type-safe wrappers for the console's domain concepts.

pub mod email;
pub mod id;
pub mod kind;

pub use email::{Email, EmailError};
pub use id::*;
pub use kind::*;
