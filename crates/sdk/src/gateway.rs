//! The remote data gateway contract.
//!
//! The Covenant backend is a hosted relational store reached through a
//! query-builder API. This module abstracts it as [`DataGateway`]: typed,
//! table-scoped operations plus one remote procedure call for audit
//! logging. The SDK's stores only ever talk to this trait, which keeps the
//! view-state logic testable against [`MockGateway`](crate::mock::MockGateway)
//! without a live backend.
//!
//! # Not-found semantics
//!
//! Point lookups (`profile_by_user`, `role_by_user`) return
//! [`ClientError::NotFound`](crate::ClientError::NotFound) when no row
//! exists. Callers scoped to a single expected row must treat that as an
//! empty result, not a fault; see [`ClientError::is_not_found`](crate::ClientError::is_not_found).

use async_trait::async_trait;
use covenant_types::{
    ActionLog, AuditTrailEntry, GovernmentNotification, ProfilePatch, UserId, UserProfile,
    UserRole,
};
use uuid::Uuid;

use crate::error::Result;

/// Table-scoped operations against the hosted relational backend.
///
/// Implementations are expected to be cheap to share (`Arc<dyn DataGateway>`)
/// and safe to call concurrently; each method is one network round trip.
#[async_trait]
pub trait DataGateway: Send + Sync {
    /// Point lookup of a user's profile row.
    ///
    /// # Errors
    ///
    /// `NotFound` when the user has no profile; any other error for
    /// transport or gateway failures.
    async fn profile_by_user(&self, user: UserId) -> Result<UserProfile>;

    /// Point lookup of a user's role assignment row.
    ///
    /// # Errors
    ///
    /// `NotFound` when no role has been assigned; any other error for
    /// transport or gateway failures.
    async fn role_by_user(&self, user: UserId) -> Result<UserRole>;

    /// Partial update of a user's profile, returning the updated row.
    ///
    /// The backend is authoritative for defaulted and computed fields, so
    /// callers replace their cached row with the returned one.
    ///
    /// # Errors
    ///
    /// `NotFound` when the user has no profile row to update; any other
    /// error for transport or gateway failures.
    async fn update_profile(&self, user: UserId, patch: ProfilePatch) -> Result<UserProfile>;

    /// Audit entries for a user, newest first, capped at `limit`.
    ///
    /// # Errors
    ///
    /// Transport or gateway failures. An empty trail is `Ok(vec![])`,
    /// never an error.
    async fn audit_entries(&self, user: UserId, limit: u32) -> Result<Vec<AuditTrailEntry>>;

    /// Submits an action to the audit-logging procedure.
    ///
    /// This is a remote procedure call, not a direct table insert: the
    /// backend stamps actor identity, timestamp, and network metadata
    /// authoritatively rather than trusting them from the client.
    ///
    /// # Errors
    ///
    /// Transport or gateway failures.
    async fn log_action(&self, actor: UserId, log: ActionLog) -> Result<()>;

    /// Government notifications, newest notification date first, capped at
    /// `limit`. The feed is shared, not scoped to a user.
    ///
    /// # Errors
    ///
    /// Transport or gateway failures.
    async fn notifications(&self, limit: u32) -> Result<Vec<GovernmentNotification>>;

    /// Marks one notification as processed (`processed = true`).
    ///
    /// # Errors
    ///
    /// `NotFound` when no notification has that id; any other error for
    /// transport or gateway failures.
    async fn mark_notification_processed(&self, id: Uuid) -> Result<()>;
}
