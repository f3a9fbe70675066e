//! Domain value types for the Covenant compliance platform client.
//!
//! This crate holds the plain data model shared by the client SDK: user
//! identity, profiles and role assignments, audit trail entries, and
//! government notifications. Types here are pure values — no I/O, no async,
//! no gateway coupling — so they can be used by any layer that needs to
//! speak the platform's vocabulary.
//!
//! # Conventions
//!
//! - Identifiers are UUID-backed newtypes ([`UserId`]).
//! - Timestamps are `chrono::DateTime<Utc>`.
//! - Closed enumerations ([`Role`], [`ImpactLevel`]) serialize as
//!   `snake_case` strings and round-trip through [`std::str::FromStr`].
//! - Schema-less payloads (audit value snapshots, notification preferences)
//!   are `serde_json::Value` documents; no fixed shape is assumed.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod audit;
mod identity;
mod notification;
mod profile;
mod role;

pub use audit::{ActionLog, AuditTrailEntry};
pub use identity::UserId;
pub use notification::{GovernmentNotification, ImpactLevel, NotificationFilter};
pub use profile::{ProfilePatch, UserProfile};
pub use role::{Role, UserRole};
