//! Profile and role store.
//!
//! Maintains the current user's profile and role assignment as a paired,
//! eventually-consistent local cache, and derives authorization answers
//! from the cached role's rank. The cache refreshes whenever the session
//! identity changes, including transitions to and from "no identity".

use std::sync::Arc;

use covenant_types::{ProfilePatch, Role, UserProfile, UserRole};
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::{
    error::Result,
    gateway::DataGateway,
    session::IdentityWatch,
};

/// Cached profile/role pair plus fetch status.
#[derive(Debug, Default)]
struct ProfileState {
    profile: Option<UserProfile>,
    role: Option<UserRole>,
    loading: bool,
    error: Option<String>,
}

/// Paired profile/role cache for the current user.
///
/// `loading` and `error` are informative but not exclusive: `error` can be
/// set while `loading` is false, meaning the last attempt failed and the
/// store is showing stale or empty data.
///
/// Superseded refreshes are not cancelled; if two refreshes race, the one
/// that resolves last wins. Acceptable for a single-user session, where
/// racing refreshes target the same identity almost always.
pub struct ProfileStore {
    gateway: Arc<dyn DataGateway>,
    identity: IdentityWatch,
    state: RwLock<ProfileState>,
}

impl ProfileStore {
    /// Creates a store over a gateway and a session identity watch.
    #[must_use]
    pub fn new(gateway: Arc<dyn DataGateway>, identity: IdentityWatch) -> Self {
        Self { gateway, identity, state: RwLock::new(ProfileState::default()) }
    }

    /// Returns the cached profile, if any.
    #[must_use]
    pub fn profile(&self) -> Option<UserProfile> {
        self.state.read().profile.clone()
    }

    /// Returns the cached role assignment, if any.
    #[must_use]
    pub fn role(&self) -> Option<UserRole> {
        self.state.read().role.clone()
    }

    /// Returns true while a refresh is in flight.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.state.read().loading
    }

    /// Returns the last fetch/update failure message, if any.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    /// Returns true iff the cached role satisfies `required`.
    ///
    /// False when no role is cached. Comparison uses the fixed rank order
    /// admin(3) > user(2) > viewer(1): true iff cached rank >= required rank.
    #[must_use]
    pub fn has_role(&self, required: Role) -> bool {
        self.state.read().role.as_ref().is_some_and(|r| r.role.grants(required))
    }

    /// Convenience for `has_role(Role::Admin)`, recomputed per call.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Convenience for `has_role(Role::User)`, recomputed per call.
    #[must_use]
    pub fn is_user(&self) -> bool {
        self.has_role(Role::User)
    }

    /// Convenience for `has_role(Role::Viewer)`, recomputed per call.
    #[must_use]
    pub fn is_viewer(&self) -> bool {
        self.has_role(Role::Viewer)
    }

    /// Fetches the profile and role for the current identity.
    ///
    /// With no identity, completes with empty state and no error. A lookup
    /// finding no row is a normal empty result. Any other failure sets the
    /// error slot and leaves previously cached data untouched, except that
    /// `loading` flips false. On success both profile and role are replaced
    /// together; the role may legitimately stay absent while the profile
    /// exists.
    pub async fn refresh(&self) {
        let user = *self.identity.borrow();
        let Some(user) = user else {
            let mut state = self.state.write();
            state.profile = None;
            state.role = None;
            state.loading = false;
            state.error = None;
            return;
        };

        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }
        debug!(user = %user, "refreshing profile and role");

        // Two independent point lookups; "no row" on either is not a fault.
        let (profile_result, role_result) =
            tokio::join!(self.gateway.profile_by_user(user), self.gateway.role_by_user(user));

        let profile = match profile_result {
            Ok(profile) => Some(profile),
            Err(e) if e.is_not_found() => None,
            Err(e) => {
                warn!(user = %user, error = %e, "profile fetch failed");
                let mut state = self.state.write();
                state.error = Some(e.to_string());
                state.loading = false;
                return;
            },
        };
        let role = match role_result {
            Ok(role) => Some(role),
            Err(e) if e.is_not_found() => None,
            Err(e) => {
                warn!(user = %user, error = %e, "role fetch failed");
                let mut state = self.state.write();
                state.error = Some(e.to_string());
                state.loading = false;
                return;
            },
        };

        let mut state = self.state.write();
        state.profile = profile;
        state.role = role;
        state.loading = false;
    }

    /// Applies a partial update to the current user's profile.
    ///
    /// No-op when there is no identity or no cached profile: an update
    /// requires a prior successful fetch establishing a baseline. On
    /// success the cached profile is replaced with the row the backend
    /// returns. On failure the error slot is set **and** the error is
    /// returned to the caller — the only operation in this layer whose
    /// failure propagates rather than only being recorded.
    ///
    /// # Errors
    ///
    /// Propagates the gateway failure after recording it.
    pub async fn update_profile(&self, patch: ProfilePatch) -> Result<()> {
        let user = *self.identity.borrow();
        let Some(user) = user else {
            return Ok(());
        };
        if self.state.read().profile.is_none() {
            return Ok(());
        }

        match self.gateway.update_profile(user, patch).await {
            Ok(updated) => {
                debug!(user = %user, "profile updated");
                self.state.write().profile = Some(updated);
                Ok(())
            },
            Err(e) => {
                warn!(user = %user, error = %e, "profile update failed");
                self.state.write().error = Some(e.to_string());
                Err(e)
            },
        }
    }

    /// Runs the reactive fetch loop: one initial refresh, then one refresh
    /// per identity change, until the session is dropped.
    pub async fn run(&self) {
        let mut identity = self.identity.clone();
        self.refresh().await;
        while identity.changed().await.is_ok() {
            self.refresh().await;
        }
    }
}
