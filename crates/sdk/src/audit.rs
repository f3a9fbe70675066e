//! Audit trail store.
//!
//! Read-only bounded view over the current user's append-only audit log,
//! plus a best-effort write-through logger. Logging goes through the
//! backend's remote procedure so actor identity, timestamps, and network
//! metadata are stamped authoritatively; the new entry becomes visible
//! only after the triggered refetch completes (no optimistic insert).

use std::sync::Arc;

use covenant_types::{ActionLog, AuditTrailEntry};
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::{
    config::{ClientConfig, DEFAULT_AUDIT_LIMIT},
    gateway::DataGateway,
    session::IdentityWatch,
};

/// Cached trail slice plus fetch status.
#[derive(Debug)]
struct AuditState {
    entries: Vec<AuditTrailEntry>,
    loading: bool,
    error: Option<String>,
    limit: u32,
}

/// Bounded, newest-first view of the current user's audit log.
pub struct AuditTrail {
    gateway: Arc<dyn DataGateway>,
    identity: IdentityWatch,
    state: RwLock<AuditState>,
}

impl AuditTrail {
    /// Creates a trail over a gateway and a session identity watch, with
    /// the default entry limit (50).
    #[must_use]
    pub fn new(gateway: Arc<dyn DataGateway>, identity: IdentityWatch) -> Self {
        Self {
            gateway,
            identity,
            state: RwLock::new(AuditState {
                entries: Vec::new(),
                loading: false,
                error: None,
                limit: DEFAULT_AUDIT_LIMIT,
            }),
        }
    }

    /// Creates a trail configured from a [`ClientConfig`].
    #[must_use]
    pub fn with_config(
        gateway: Arc<dyn DataGateway>,
        identity: IdentityWatch,
        config: &ClientConfig,
    ) -> Self {
        Self::new(gateway, identity).with_limit(config.audit_limit())
    }

    /// Overrides the entry limit at construction time.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.state.get_mut().limit = limit;
        self
    }

    /// Returns the cached entries, newest first.
    #[must_use]
    pub fn entries(&self) -> Vec<AuditTrailEntry> {
        self.state.read().entries.clone()
    }

    /// Returns true while a refresh is in flight.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.state.read().loading
    }

    /// Returns the last fetch failure message, if any.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    /// Returns the configured entry limit.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.state.read().limit
    }

    /// Changes the entry limit and refetches under the new bound.
    pub async fn set_limit(&self, limit: u32) {
        self.state.write().limit = limit;
        self.refresh().await;
    }

    /// Fetches the trail for the current identity.
    ///
    /// With no identity, completes with an empty list and no error.
    /// Failure sets the error slot and keeps the previous entries; success
    /// replaces the full cached list.
    pub async fn refresh(&self) {
        let user = *self.identity.borrow();
        let Some(user) = user else {
            let mut state = self.state.write();
            state.entries.clear();
            state.loading = false;
            state.error = None;
            return;
        };

        let limit = {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
            state.limit
        };
        debug!(user = %user, limit, "refreshing audit trail");

        match self.gateway.audit_entries(user, limit).await {
            Ok(entries) => {
                let mut state = self.state.write();
                state.entries = entries;
                state.loading = false;
            },
            Err(e) => {
                warn!(user = %user, error = %e, "audit trail fetch failed");
                let mut state = self.state.write();
                state.error = Some(e.to_string());
                state.loading = false;
            },
        }
    }

    /// Logs an action through the backend's audit procedure, best-effort.
    ///
    /// No-op when there is no identity. On success the trail is refetched
    /// in full, so the new entry appears only after the round trip. On
    /// failure the error goes to diagnostics only: it is not returned, not
    /// recorded in the error slot, and never blocks the action that
    /// triggered the log.
    pub async fn log_action(&self, log: ActionLog) {
        let user = *self.identity.borrow();
        let Some(user) = user else {
            return;
        };

        match self.gateway.log_action(user, log).await {
            Ok(()) => {
                debug!(user = %user, "action logged, refetching trail");
                self.refresh().await;
            },
            Err(e) => {
                warn!(user = %user, error = %e, "audit log write failed (best-effort, dropped)");
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
