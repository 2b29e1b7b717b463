//! Architect Core - Shared domain types.
//!
//! This crate provides the types shared by the console library, its HTTP
//! surface and the integration tests:
//! - typed account ids
//! - validated email addresses
//! - account roles, notification severities and simulated mail kinds
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no clocks, no HTTP clients.
//! Everything that touches time or randomness lives in `architect-console`.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers and enums for the console's domain

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
