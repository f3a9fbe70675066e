//! Government notification feed store.
//!
//! Caches a bounded global feed (shared, not per-user) and answers derived
//! views — filtered, recent, critical — from the cache without further
//! round trips. The only mutation is flipping one entry's `processed` flag,
//! applied in place on success with no refetch.

use std::sync::Arc;

use chrono::{Duration, Utc};
use covenant_types::{GovernmentNotification, ImpactLevel, NotificationFilter};
use parking_lot::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    config::{ClientConfig, DEFAULT_NOTIFICATION_LIMIT},
    gateway::DataGateway,
};

/// Default window for [`NotificationFeed::recent`], in days.
pub const DEFAULT_RECENT_DAYS: i64 = 30;

/// Cached feed plus fetch status.
#[derive(Debug, Default)]
struct FeedState {
    notifications: Vec<GovernmentNotification>,
    loading: bool,
    error: Option<String>,
}

/// Bounded cache of the shared government notification feed.
pub struct NotificationFeed {
    gateway: Arc<dyn DataGateway>,
    limit: u32,
    state: RwLock<FeedState>,
}

impl NotificationFeed {
    /// Creates a feed over a gateway with the default limit (50).
    #[must_use]
    pub fn new(gateway: Arc<dyn DataGateway>) -> Self {
        Self { gateway, limit: DEFAULT_NOTIFICATION_LIMIT, state: RwLock::new(FeedState::default()) }
    }

    /// Creates a feed configured from a [`ClientConfig`].
    #[must_use]
    pub fn with_config(gateway: Arc<dyn DataGateway>, config: &ClientConfig) -> Self {
        Self::new(gateway).with_limit(config.notification_limit())
    }

    /// Overrides the fetch limit at construction time.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Returns the cached notifications, newest first.
    #[must_use]
    pub fn notifications(&self) -> Vec<GovernmentNotification> {
        self.state.read().notifications.clone()
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

    /// Fetches the feed unconditionally (no identity required).
    ///
    /// Failure sets the error slot and keeps the previous list; success
    /// replaces the full cached list.
    pub async fn refresh(&self) {
        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }
        debug!(limit = self.limit, "refreshing notification feed");

        match self.gateway.notifications(self.limit).await {
            Ok(notifications) => {
                let mut state = self.state.write();
                state.notifications = notifications;
                state.loading = false;
            },
            Err(e) => {
                warn!(error = %e, "notification fetch failed");
                let mut state = self.state.write();
                state.error = Some(e.to_string());
                state.loading = false;
            },
        }
    }

    /// Pure filter over the cache; cache order is preserved and the base
    /// collection is never mutated.
    #[must_use]
    pub fn filtered(&self, filter: &NotificationFilter) -> Vec<GovernmentNotification> {
        self.state.read().notifications.iter().filter(|n| filter.matches(n)).cloned().collect()
    }

    /// Notifications dated strictly after now minus `days` days.
    #[must_use]
    pub fn recent_within(&self, days: i64) -> Vec<GovernmentNotification> {
        let cutoff = Utc::now() - Duration::days(days);
        self.state
            .read()
            .notifications
            .iter()
            .filter(|n| n.notification_date > cutoff)
            .cloned()
            .collect()
    }

    /// Notifications from the default recent window (30 days).
    #[must_use]
    pub fn recent(&self) -> Vec<GovernmentNotification> {
        self.recent_within(DEFAULT_RECENT_DAYS)
    }

    /// Notifications with critical impact only.
    #[must_use]
    pub fn critical(&self) -> Vec<GovernmentNotification> {
        self.filtered(&NotificationFilter::new().with_impact_level(ImpactLevel::Critical))
    }

    /// Marks one notification as processed, best-effort.
    ///
    /// On success only the matching cached entry is updated in place; all
    /// other entries are untouched and no refetch happens. On failure the
    /// error goes to diagnostics only and the cache is left unchanged.
    pub async fn mark_processed(&self, id: Uuid) {
        match self.gateway.mark_notification_processed(id).await {
            Ok(()) => {
                let mut state = self.state.write();
                if let Some(entry) = state.notifications.iter_mut().find(|n| n.id == id) {
                    entry.processed = true;
                }
            },
            Err(e) => {
                warn!(notification = %id, error = %e, "mark-processed failed (best-effort, dropped)");
            },
        }
    }

    /// Runs the initial fetch. The feed is shared and not keyed by
    /// identity, so there is no change subscription to drive further
    /// refreshes; call [`refresh`](Self::refresh) explicitly to reload.
    pub async fn run(&self) {
        self.refresh().await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;
    use covenant_types::ImpactLevel;

    use super::*;
    use crate::mock::MockGateway;

    fn feed_with(gateway: Arc<MockGateway>) -> NotificationFeed {
        NotificationFeed::new(gateway)
    }

    #[tokio::test]
    async fn refresh_populates_newest_first() {
        let gateway = Arc::new(MockGateway::new());
        let old = gateway.push_notification("FIRS", ImpactLevel::Low, Utc::now() - Duration::days(5));
        let new = gateway.push_notification("CAC", ImpactLevel::High, Utc::now());

        let feed = feed_with(gateway);
        feed.refresh().await;

        let cached = feed.notifications();
        assert_eq!(cached.len(), 2);
        assert_eq!(cached[0].id, new);
        assert_eq!(cached[1].id, old);
    }

    #[tokio::test]
    async fn filtered_returns_exact_matches_in_cache_order() {
        let gateway = Arc::new(MockGateway::new());
        let now = Utc::now();
        // 2 critical, 3 non-critical.
        gateway.push_notification("FIRS", ImpactLevel::Critical, now);
        gateway.push_notification("FIRS", ImpactLevel::Low, now - Duration::hours(1));
        gateway.push_notification("CAC", ImpactLevel::Critical, now - Duration::hours(2));
        gateway.push_notification("CAC", ImpactLevel::Medium, now - Duration::hours(3));
        gateway.push_notification("NDPC", ImpactLevel::High, now - Duration::hours(4));

        let feed = feed_with(gateway);
        feed.refresh().await;

        let filter = NotificationFilter::new().with_impact_level(ImpactLevel::Critical);
        let critical = feed.filtered(&filter);
        assert_eq!(critical.len(), 2);
        assert!(critical.iter().all(|n| n.impact_level == ImpactLevel::Critical));
        // Order preserved from the cache (newest first).
        assert!(critical[0].notification_date > critical[1].notification_date);
        // The base collection is untouched.
        assert_eq!(feed.notifications().len(), 5);
    }

    #[tokio::test]
    async fn recent_keeps_only_entries_inside_the_window() {
        let gateway = Arc::new(MockGateway::new());
        let three_days = gateway.push_notification(
            "FIRS",
            ImpactLevel::Low,
            Utc::now() - Duration::days(3),
        );
        gateway.push_notification("FIRS", ImpactLevel::Low, Utc::now() - Duration::days(10));

        let feed = feed_with(gateway);
        feed.refresh().await;

        let recent = feed.recent_within(7);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, three_days);
    }

    #[tokio::test]
    async fn critical_is_a_pure_derivation() {
        let gateway = Arc::new(MockGateway::new());
        gateway.push_notification("FIRS", ImpactLevel::Critical, Utc::now());
        gateway.push_notification("FIRS", ImpactLevel::High, Utc::now());

        let feed = feed_with(gateway);
        feed.refresh().await;

        assert_eq!(feed.critical().len(), 1);
        assert_eq!(feed.notifications().len(), 2);
    }

    #[tokio::test]
    async fn mark_processed_updates_only_the_target_in_place() {
        let gateway = Arc::new(MockGateway::new());
        let target = gateway.push_notification("FIRS", ImpactLevel::High, Utc::now());
        let other = gateway.push_notification("CAC", ImpactLevel::Low, Utc::now());

        let feed = feed_with(Arc::clone(&gateway));
        feed.refresh().await;
        let before = feed.notifications();

        feed.mark_processed(target).await;

        let after = feed.notifications();
        let flipped = after.iter().find(|n| n.id == target).unwrap();
        assert!(flipped.processed);
        let untouched = after.iter().find(|n| n.id == other).unwrap();
        assert_eq!(untouched, before.iter().find(|n| n.id == other).unwrap());
        // In-place update, no refetch.
        assert_eq!(gateway.read_count(), 1);
    }

    #[tokio::test]
    async fn mark_processed_failure_leaves_cache_unchanged() {
        let gateway = Arc::new(MockGateway::new());
        let target = gateway.push_notification("FIRS", ImpactLevel::High, Utc::now());

        let feed = feed_with(Arc::clone(&gateway));
        feed.refresh().await;

        gateway.inject_failures(1);
        feed.mark_processed(target).await;

        assert!(!feed.notifications()[0].processed);
        assert!(feed.error().is_none());
    }

    #[tokio::test]
    async fn fetch_failure_sets_error_slot() {
        let gateway = Arc::new(MockGateway::new());
        gateway.inject_failures(1);

        let feed = feed_with(gateway);
        feed.refresh().await;

        assert!(feed.error().is_some());
        assert!(feed.notifications().is_empty());
        assert!(!feed.loading());
    }

    #[tokio::test]
    async fn with_config_applies_the_notification_limit() {
        let gateway = Arc::new(MockGateway::new());
        for i in 0..4 {
            gateway.push_notification(
                "FIRS",
                ImpactLevel::Low,
                Utc::now() - Duration::hours(i),
            );
        }

        let config =
            crate::ClientConfig::builder().with_notification_limit(3).build().unwrap();
        let feed = NotificationFeed::with_config(gateway, &config);
        feed.refresh().await;

        assert_eq!(feed.notifications().len(), 3);
    }

    #[tokio::test]
    async fn limit_caps_the_feed() {
        let gateway = Arc::new(MockGateway::new());
        for i in 0..4 {
            gateway.push_notification(
                "FIRS",
                ImpactLevel::Low,
                Utc::now() - Duration::hours(i),
            );
        }

        let feed = NotificationFeed::new(gateway).with_limit(2);
        feed.refresh().await;

        assert_eq!(feed.notifications().len(), 2);
    }
}
