//! Domain models for the console.
//!
//! Plain data carried through the state model and serialized by the HTTP
//! surface. None of these types perform I/O.

pub mod account;
pub mod audit;
pub mod mail;
pub mod notification;
pub mod session;

pub use account::Account;
pub use audit::{AuditPanel, AuditQuery, AuditResult};
pub use mail::SimulatedMessage;
pub use notification::Notification;
pub use session::{Session, SessionToken};
