//! Mock gateway for store testing.
//!
//! A controllable in-memory implementation of [`DataGateway`] for testing
//! the stores without a live backend.
//!
//! # Features
//!
//! - **Seeded tables**: Profiles, roles, audit entries, and notifications
//! - **Failure injection**: Fail the next N requests for resilience tests
//! - **Request counting**: Reads, writes, and procedure calls tracked
//!   separately for verification
//! - **Server-side stamping**: `log_action` attaches actor, timestamp, and
//!   network metadata the way the real audit procedure does
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use covenant_sdk::mock::MockGateway;
//! use covenant_sdk::{ProfileStore, Session};
//! use covenant_types::{Role, UserId};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let gateway = Arc::new(MockGateway::new());
//! let session = Session::new();
//! let user = UserId::random();
//!
//! gateway.seed_profile(user);
//! gateway.set_role(user, Role::Admin);
//! session.sign_in(user);
//!
//! let store = ProfileStore::new(gateway, session.subscribe());
//! store.refresh().await;
//! assert!(store.is_admin());
//! # }
//! ```

use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use chrono::{DateTime, Utc};
use covenant_types::{
    ActionLog, AuditTrailEntry, GovernmentNotification, ImpactLevel, ProfilePatch, Role, UserId,
    UserProfile, UserRole,
};
use parking_lot::RwLock;
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{ClientError, Result},
    gateway::DataGateway,
};

/// In-memory table state.
#[derive(Debug, Default)]
struct MockTables {
    /// Profiles keyed by owning user.
    profiles: HashMap<UserId, UserProfile>,

    /// Role assignments keyed by user.
    roles: HashMap<UserId, UserRole>,

    /// Audit log in insertion order (oldest first).
    audit: Vec<AuditTrailEntry>,

    /// Notifications in arbitrary insertion order.
    notifications: Vec<GovernmentNotification>,
}

/// Controllable in-memory [`DataGateway`].
#[derive(Debug, Default)]
pub struct MockGateway {
    tables: RwLock<MockTables>,

    /// Number of failures to inject into upcoming requests.
    fail_next: AtomicUsize,

    /// Total read requests received.
    read_count: AtomicUsize,

    /// Total write requests received.
    write_count: AtomicUsize,

    /// Total procedure calls received.
    rpc_count: AtomicUsize,
}

impl MockGateway {
    /// Creates an empty mock gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a minimal profile row for a user and returns it.
    pub fn seed_profile(&self, user: UserId) -> UserProfile {
        let now = Utc::now();
        let profile = UserProfile {
            user_id: user,
            business_name: Some("Mock Business".to_owned()),
            sector: None,
            company_size: None,
            location: None,
            registration_number: None,
            industry: None,
            contact_email: None,
            contact_phone: None,
            timezone: "UTC".to_owned(),
            notification_preferences: json!({}),
            compliance_requirements: None,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().profiles.insert(user, profile.clone());
        profile
    }

    /// Replaces a user's profile row wholesale.
    pub fn set_profile(&self, profile: UserProfile) {
        self.tables.write().profiles.insert(profile.user_id, profile);
    }

    /// Assigns a role to a user.
    pub fn set_role(&self, user: UserId, role: Role) {
        let assignment =
            UserRole { user_id: user, role, assigned_by: None, assigned_at: Utc::now() };
        self.tables.write().roles.insert(user, assignment);
    }

    /// Inserts a notification and returns its id.
    pub fn push_notification(
        &self,
        source: &str,
        impact_level: ImpactLevel,
        notification_date: DateTime<Utc>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        let notification = GovernmentNotification {
            id,
            source: source.to_owned(),
            notification_type: "regulation".to_owned(),
            title: format!("{source} notice"),
            content: "Mock notification body".to_owned(),
            notification_date,
            effective_date: None,
            applicable_to: Vec::new(),
            impact_level,
            tags: None,
            url: None,
            processed: false,
        };
        self.tables.write().notifications.push(notification);
        id
    }

    /// Inserts a fully specified notification.
    pub fn push_notification_row(&self, notification: GovernmentNotification) {
        self.tables.write().notifications.push(notification);
    }

    /// Fails the next `count` requests with a connection error.
    pub fn inject_failures(&self, count: usize) {
        self.fail_next.store(count, Ordering::SeqCst);
    }

    /// Returns the number of read requests received.
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.read_count.load(Ordering::SeqCst)
    }

    /// Returns the number of write requests received.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.write_count.load(Ordering::SeqCst)
    }

    /// Returns the number of procedure calls received.
    #[must_use]
    pub fn rpc_count(&self) -> usize {
        self.rpc_count.load(Ordering::SeqCst)
    }

    /// Checks if the next request should fail, decrementing the injection
    /// counter if so.
    fn should_fail(&self) -> bool {
        loop {
            let current = self.fail_next.load(Ordering::SeqCst);
            if current == 0 {
                return false;
            }
            if self
                .fail_next
                .compare_exchange(current, current - 1, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return true;
            }
        }
    }

    fn injected_failure() -> ClientError {
        ClientError::Rpc { message: "injected failure".to_owned() }
    }
}

#[async_trait::async_trait]
impl DataGateway for MockGateway {
    async fn profile_by_user(&self, user: UserId) -> Result<UserProfile> {
        self.read_count.fetch_add(1, Ordering::SeqCst);
        if self.should_fail() {
            return Err(Self::injected_failure());
        }
        self.tables
            .read()
            .profiles
            .get(&user)
            .cloned()
            .ok_or_else(|| ClientError::NotFound { entity: "profile".to_owned() })
    }

    async fn role_by_user(&self, user: UserId) -> Result<UserRole> {
        self.read_count.fetch_add(1, Ordering::SeqCst);
        if self.should_fail() {
            return Err(Self::injected_failure());
        }
        self.tables
            .read()
            .roles
            .get(&user)
            .cloned()
            .ok_or_else(|| ClientError::NotFound { entity: "role".to_owned() })
    }

    async fn update_profile(&self, user: UserId, patch: ProfilePatch) -> Result<UserProfile> {
        self.write_count.fetch_add(1, Ordering::SeqCst);
        if self.should_fail() {
            return Err(Self::injected_failure());
        }
        let mut tables = self.tables.write();
        let profile = tables
            .profiles
            .get_mut(&user)
            .ok_or_else(|| ClientError::NotFound { entity: "profile".to_owned() })?;
        patch.apply_to(profile);
        profile.updated_at = Utc::now();
        Ok(profile.clone())
    }

    async fn audit_entries(&self, user: UserId, limit: u32) -> Result<Vec<AuditTrailEntry>> {
        self.read_count.fetch_add(1, Ordering::SeqCst);
        if self.should_fail() {
            return Err(Self::injected_failure());
        }
        // Insertion order is creation order; newest-first is the reverse.
        let entries = self
            .tables
            .read()
            .audit
            .iter()
            .filter(|e| e.user_id == Some(user))
            .rev()
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(entries)
    }

    async fn log_action(&self, actor: UserId, log: ActionLog) -> Result<()> {
        self.rpc_count.fetch_add(1, Ordering::SeqCst);
        if self.should_fail() {
            return Err(Self::injected_failure());
        }
        // Server-side fields are stamped here, never taken from the client.
        let entry = AuditTrailEntry {
            id: Uuid::new_v4(),
            user_id: Some(actor),
            action: log.action,
            table_name: log.table_name,
            record_id: log.record_id,
            old_values: log.old_values,
            new_values: log.new_values,
            ip_address: Some("127.0.0.1".to_owned()),
            user_agent: Some("covenant-sdk-mock".to_owned()),
            created_at: Utc::now(),
        };
        self.tables.write().audit.push(entry);
        Ok(())
    }

    async fn notifications(&self, limit: u32) -> Result<Vec<GovernmentNotification>> {
        self.read_count.fetch_add(1, Ordering::SeqCst);
        if self.should_fail() {
            return Err(Self::injected_failure());
        }
        let mut rows = self.tables.read().notifications.clone();
        rows.sort_by(|a, b| b.notification_date.cmp(&a.notification_date));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn mark_notification_processed(&self, id: Uuid) -> Result<()> {
        self.write_count.fetch_add(1, Ordering::SeqCst);
        if self.should_fail() {
            return Err(Self::injected_failure());
        }
        let mut tables = self.tables.write();
        let notification = tables
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| ClientError::NotFound { entity: "notification".to_owned() })?;
        notification.processed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn point_lookup_miss_is_not_found() {
        let gateway = MockGateway::new();
        let err = gateway.profile_by_user(UserId::random()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn injected_failures_are_consumed_in_order() {
        let gateway = MockGateway::new();
        let user = UserId::random();
        gateway.seed_profile(user);

        gateway.inject_failures(1);
        assert!(gateway.profile_by_user(user).await.is_err());
        assert!(gateway.profile_by_user(user).await.is_ok());
    }

    #[tokio::test]
    async fn log_action_stamps_server_fields() {
        let gateway = MockGateway::new();
        let user = UserId::random();
        gateway.log_action(user, ActionLog::new("created")).await.unwrap();

        let entries = gateway.audit_entries(user, 10).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user_id, Some(user));
        assert!(entries[0].ip_address.is_some());
        assert!(entries[0].user_agent.is_some());
    }

    #[tokio::test]
    async fn audit_entries_are_scoped_to_the_user() {
        let gateway = MockGateway::new();
        let alice = UserId::random();
        let bob = UserId::random();
        gateway.log_action(alice, ActionLog::new("a")).await.unwrap();
        gateway.log_action(bob, ActionLog::new("b")).await.unwrap();

        let entries = gateway.audit_entries(alice, 10).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "a");
    }

    #[tokio::test]
    async fn counters_track_request_kinds() {
        let gateway = MockGateway::new();
        let user = UserId::random();
        gateway.seed_profile(user);

        let _ = gateway.profile_by_user(user).await;
        let _ = gateway.update_profile(user, ProfilePatch::new()).await;
        let _ = gateway.log_action(user, ActionLog::new("x")).await;

        assert_eq!(gateway.read_count(), 1);
        assert_eq!(gateway.write_count(), 1);
        assert_eq!(gateway.rpc_count(), 1);
    }
}
