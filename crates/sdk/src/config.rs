//! Client configuration with builder pattern.
//!
//! Provides type-safe configuration for the store layer:
//! - Fetch limits for the audit trail and notification feed
//! - Diagnostics flag gating failure detail exposure

use snafu::ensure;

use crate::error::{ConfigSnafu, Result};

/// Default cap on fetched audit trail entries.
pub const DEFAULT_AUDIT_LIMIT: u32 = 50;

/// Default cap on fetched notifications.
pub const DEFAULT_NOTIFICATION_LIMIT: u32 = 50;

/// Configuration for the Covenant client stores.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Maximum audit trail entries fetched per refresh.
    pub(crate) audit_limit: u32,

    /// Maximum notifications fetched per refresh.
    pub(crate) notification_limit: u32,

    /// Expose failure detail in render boundaries (development builds).
    pub(crate) diagnostics: bool,
}

impl ClientConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Returns the audit trail fetch limit.
    #[must_use]
    pub fn audit_limit(&self) -> u32 {
        self.audit_limit
    }

    /// Returns the notification feed fetch limit.
    #[must_use]
    pub fn notification_limit(&self) -> u32 {
        self.notification_limit
    }

    /// Returns whether diagnostics detail is exposed.
    #[must_use]
    pub fn diagnostics(&self) -> bool {
        self.diagnostics
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            audit_limit: DEFAULT_AUDIT_LIMIT,
            notification_limit: DEFAULT_NOTIFICATION_LIMIT,
            diagnostics: false,
        }
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    audit_limit: Option<u32>,
    notification_limit: Option<u32>,
    diagnostics: bool,
}

impl ClientConfigBuilder {
    /// Sets the audit trail fetch limit.
    ///
    /// Default: 50. Must be greater than zero.
    #[must_use]
    pub fn with_audit_limit(mut self, limit: u32) -> Self {
        self.audit_limit = Some(limit);
        self
    }

    /// Sets the notification feed fetch limit.
    ///
    /// Default: 50. Must be greater than zero.
    #[must_use]
    pub fn with_notification_limit(mut self, limit: u32) -> Self {
        self.notification_limit = Some(limit);
        self
    }

    /// Enables diagnostics detail in render boundaries.
    ///
    /// Default: disabled. Enable only in development configurations.
    #[must_use]
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    /// Builds the configuration, validating all settings.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`](crate::ClientError::Config) if a
    /// limit is zero.
    pub fn build(self) -> Result<ClientConfig> {
        let audit_limit = self.audit_limit.unwrap_or(DEFAULT_AUDIT_LIMIT);
        let notification_limit = self.notification_limit.unwrap_or(DEFAULT_NOTIFICATION_LIMIT);

        ensure!(
            audit_limit > 0,
            ConfigSnafu { message: "audit_limit must be greater than zero" }
        );
        ensure!(
            notification_limit > 0,
            ConfigSnafu { message: "notification_limit must be greater than zero" }
        );

        Ok(ClientConfig { audit_limit, notification_limit, diagnostics: self.diagnostics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits() {
        let config = ClientConfig::default();
        assert_eq!(config.audit_limit(), 50);
        assert_eq!(config.notification_limit(), 50);
        assert!(!config.diagnostics());
    }

    #[test]
    fn builder_overrides() {
        let config = ClientConfig::builder()
            .with_audit_limit(10)
            .with_notification_limit(25)
            .with_diagnostics(true)
            .build()
            .unwrap();
        assert_eq!(config.audit_limit(), 10);
        assert_eq!(config.notification_limit(), 25);
        assert!(config.diagnostics());
    }

    #[test]
    fn zero_audit_limit_rejected() {
        let result = ClientConfig::builder().with_audit_limit(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn zero_notification_limit_rejected() {
        let result = ClientConfig::builder().with_notification_limit(0).build();
        assert!(result.is_err());
    }
}
