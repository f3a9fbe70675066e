//! Government notification feed types.
//!
//! Notifications are produced externally (regulatory feeds) and consumed
//! read-mostly by clients. The only client-side mutation permitted is
//! flipping the `processed` flag to true.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Impact severity of a notification.
///
/// Closed set, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    /// Informational, no action expected.
    Low,
    /// May require review.
    Medium,
    /// Likely requires action.
    High,
    /// Requires immediate attention.
    Critical,
}

impl ImpactLevel {
    /// Returns the wire label for this level.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ImpactLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(format!("unknown impact level: {other}")),
        }
    }
}

/// A regulatory notification from a government source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernmentNotification {
    /// Row identifier.
    pub id: Uuid,
    /// Issuing source label, e.g. an agency name.
    pub source: String,
    /// Notification category label.
    pub notification_type: String,
    /// Short title.
    pub title: String,
    /// Full body content.
    pub content: String,
    /// When the notification was issued.
    pub notification_date: DateTime<Utc>,
    /// When the change takes effect, if announced.
    pub effective_date: Option<DateTime<Utc>>,
    /// Applicability tags (sectors, regions, registration classes).
    pub applicable_to: Vec<String>,
    /// Impact severity.
    pub impact_level: ImpactLevel,
    /// Free-form tags.
    pub tags: Option<Vec<String>>,
    /// Link to the source document.
    pub url: Option<String>,
    /// Whether the current business has processed this notification.
    pub processed: bool,
}

/// Criteria for filtering a cached notification list.
///
/// Every supplied criterion must match exactly; omitted criteria are not
/// checked. `applicable_to` matches when the notification's applicability
/// list contains the given tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationFilter {
    /// Required source label.
    pub source: Option<String>,
    /// Required impact level.
    pub impact_level: Option<ImpactLevel>,
    /// Tag that must appear in the applicability list.
    pub applicable_to: Option<String>,
}

impl NotificationFilter {
    /// Creates an empty filter that matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires an exact source match.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Requires an exact impact level match.
    #[must_use]
    pub fn with_impact_level(mut self, level: ImpactLevel) -> Self {
        self.impact_level = Some(level);
        self
    }

    /// Requires the applicability list to contain a tag.
    #[must_use]
    pub fn with_applicable_to(mut self, tag: impl Into<String>) -> Self {
        self.applicable_to = Some(tag.into());
        self
    }

    /// Tests a notification against the supplied criteria.
    #[must_use]
    pub fn matches(&self, notification: &GovernmentNotification) -> bool {
        if let Some(source) = &self.source {
            if notification.source != *source {
                return false;
            }
        }
        if let Some(level) = self.impact_level {
            if notification.impact_level != level {
                return false;
            }
        }
        if let Some(tag) = &self.applicable_to {
            if !notification.applicable_to.iter().any(|t| t == tag) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(source: &str, level: ImpactLevel, tags: &[&str]) -> GovernmentNotification {
        GovernmentNotification {
            id: Uuid::new_v4(),
            source: source.to_owned(),
            notification_type: "regulation".to_owned(),
            title: "Test".to_owned(),
            content: "Body".to_owned(),
            notification_date: Utc::now(),
            effective_date: None,
            applicable_to: tags.iter().map(|t| (*t).to_owned()).collect(),
            impact_level: level,
            tags: None,
            url: None,
            processed: false,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let n = notification("FIRS", ImpactLevel::Low, &["retail"]);
        assert!(NotificationFilter::new().matches(&n));
    }

    #[test]
    fn source_must_match_exactly() {
        let n = notification("FIRS", ImpactLevel::Low, &[]);
        assert!(NotificationFilter::new().with_source("FIRS").matches(&n));
        assert!(!NotificationFilter::new().with_source("CAC").matches(&n));
    }

    #[test]
    fn applicable_to_is_list_containment() {
        let n = notification("FIRS", ImpactLevel::High, &["retail", "energy"]);
        assert!(NotificationFilter::new().with_applicable_to("energy").matches(&n));
        assert!(!NotificationFilter::new().with_applicable_to("mining").matches(&n));
    }

    #[test]
    fn all_criteria_must_hold() {
        let n = notification("FIRS", ImpactLevel::Critical, &["retail"]);
        let filter = NotificationFilter::new()
            .with_source("FIRS")
            .with_impact_level(ImpactLevel::Critical)
            .with_applicable_to("retail");
        assert!(filter.matches(&n));

        let wrong_level = NotificationFilter::new()
            .with_source("FIRS")
            .with_impact_level(ImpactLevel::Low);
        assert!(!wrong_level.matches(&n));
    }

    #[test]
    fn impact_levels_order_by_severity() {
        assert!(ImpactLevel::Critical > ImpactLevel::High);
        assert!(ImpactLevel::High > ImpactLevel::Medium);
        assert!(ImpactLevel::Medium > ImpactLevel::Low);
    }

    #[test]
    fn impact_level_labels_round_trip() {
        for level in [
            ImpactLevel::Low,
            ImpactLevel::Medium,
            ImpactLevel::High,
            ImpactLevel::Critical,
        ] {
            let parsed: ImpactLevel = level.as_str().parse().unwrap();
            assert_eq!(parsed, level);
        }
    }
}
