//! Client SDK for the Covenant compliance platform.
//!
//! This crate is the client-side data-access and view-state layer: it owns
//! the typed gateway contract to the hosted relational backend, the session
//! identity channel, and three reactive stores that cache domain rows and
//! answer derived questions without extra round trips.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use covenant_sdk::{ProfileStore, Session};
//! use covenant_types::Role;
//!
//! # async fn example(gateway: Arc<dyn covenant_sdk::DataGateway>) {
//! let session = Session::new();
//! let store = ProfileStore::new(gateway, session.subscribe());
//!
//! store.refresh().await;
//! if store.has_role(Role::Admin) {
//!     // show the admin dashboard
//! }
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Presentation (consumers)                   │
//! │    cards │ badges │ RenderBoundary recovery views           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                       Store Layer                           │
//! │  ProfileStore │ AuditTrail │ NotificationFeed               │
//! │  local cache + loading flag + error slot per store          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                  Session (identity watch)                   │
//! │  current user or none │ refetch on every transition         │
//! ├─────────────────────────────────────────────────────────────┤
//! │                  DataGateway (trait)                        │
//! │  select │ update-by-id │ audit log procedure                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Error policy
//!
//! Gateway failures never escape the store layer except the explicit
//! [`ProfileStore::update_profile`] re-raise. Single-row lookups that find
//! nothing are empty results, not errors. Best-effort mutations
//! ([`AuditTrail::log_action`], [`NotificationFeed::mark_processed`]) log
//! their failures and move on.
//!
//! # Known limitation
//!
//! Superseded in-flight fetches are not cancelled or sequenced; if two
//! refreshes race, the last one to resolve wins, which can briefly surface
//! stale rows. Accepted for single-user sessions.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod audit;
mod boundary;
mod config;
mod error;
mod gateway;
pub mod mock;
mod notifications;
mod profile;
mod session;

// Public API exports
pub use audit::AuditTrail;
pub use boundary::{BoundaryState, RenderBoundary, RenderFailure};
pub use config::{
    ClientConfig, ClientConfigBuilder, DEFAULT_AUDIT_LIMIT, DEFAULT_NOTIFICATION_LIMIT,
};
pub use error::{ClientError, Result};
pub use gateway::DataGateway;
pub use notifications::{DEFAULT_RECENT_DAYS, NotificationFeed};
pub use profile::ProfileStore;
pub use session::{IdentityWatch, Session};

// Re-export commonly used types from covenant-types
pub use covenant_types::{
    ActionLog, AuditTrailEntry, GovernmentNotification, ImpactLevel, NotificationFilter,
    ProfilePatch, Role, UserId, UserProfile, UserRole,
};
