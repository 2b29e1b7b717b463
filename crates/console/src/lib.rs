//! Backend-architect demonstration console.
//!
//! A single-session console that walks through a mock authentication
//! backend: sign-in against an in-memory directory, simulated welcome and
//! reset mail, soft-deleting accounts, a syntax-highlighted view of the
//! backend source and an AI code auditor.
//!
//! All state lives in [`console::Console`]; the HTTP surface in [`routes`]
//! is a thin JSON layer over it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auditor;
pub mod catalog;
pub mod config;
pub mod console;
pub mod error;
pub mod middleware;
pub mod models;
pub mod router;
pub mod routes;
pub mod services;
pub mod state;
