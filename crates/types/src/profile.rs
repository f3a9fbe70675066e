//! User profile row and its partial-update patch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identity::UserId;

/// Business profile attached to a user identity.
///
/// One-to-one with a user; absence is a valid state (the user has not
/// completed onboarding). Profiles are mutated through [`ProfilePatch`]
/// partial updates and never deleted by the client layer. The backend is
/// authoritative for defaulted fields (`timezone`) and timestamps, so a
/// successful update always replaces the cached row with the returned one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Owning user identity.
    pub user_id: UserId,
    /// Registered business name.
    pub business_name: Option<String>,
    /// Business sector label.
    pub sector: Option<String>,
    /// Company size bracket.
    pub company_size: Option<String>,
    /// Primary business location.
    pub location: Option<String>,
    /// Government registration number.
    pub registration_number: Option<String>,
    /// Industry classification.
    pub industry: Option<String>,
    /// Contact email address.
    pub contact_email: Option<String>,
    /// Contact phone number.
    pub contact_phone: Option<String>,
    /// IANA timezone identifier, defaulted by the backend.
    pub timezone: String,
    /// Opaque notification-preferences document. No fixed shape is assumed.
    pub notification_preferences: Value,
    /// Compliance requirement tags applicable to this business.
    pub compliance_requirements: Option<Vec<String>>,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Partial-field update for a [`UserProfile`].
///
/// Every field is optional; `None` fields are omitted from the update
/// entirely (not written as nulls).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePatch {
    /// New business name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    /// New sector label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    /// New company size bracket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_size: Option<String>,
    /// New business location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// New registration number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    /// New industry classification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    /// New contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    /// New contact phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    /// New timezone identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Replacement notification-preferences document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_preferences: Option<Value>,
    /// Replacement compliance requirement tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance_requirements: Option<Vec<String>>,
}

impl ProfilePatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Sets the business name.
    #[must_use]
    pub fn with_business_name(mut self, name: impl Into<String>) -> Self {
        self.business_name = Some(name.into());
        self
    }

    /// Sets the sector label.
    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Sets the timezone identifier.
    #[must_use]
    pub fn with_timezone(mut self, tz: impl Into<String>) -> Self {
        self.timezone = Some(tz.into());
        self
    }

    /// Sets the notification-preferences document.
    #[must_use]
    pub fn with_notification_preferences(mut self, prefs: Value) -> Self {
        self.notification_preferences = Some(prefs);
        self
    }

    /// Sets the compliance requirement tags.
    #[must_use]
    pub fn with_compliance_requirements<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compliance_requirements = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Applies the patch to a profile row, leaving unset fields untouched.
    ///
    /// Mirrors the backend's partial-update semantics; used by in-memory
    /// gateway implementations.
    pub fn apply_to(&self, profile: &mut UserProfile) {
        macro_rules! patch_field {
            ($field:ident) => {
                if let Some(value) = &self.$field {
                    profile.$field = Some(value.clone());
                }
            };
        }
        patch_field!(business_name);
        patch_field!(sector);
        patch_field!(company_size);
        patch_field!(location);
        patch_field!(registration_number);
        patch_field!(industry);
        patch_field!(contact_email);
        patch_field!(contact_phone);
        patch_field!(compliance_requirements);
        if let Some(tz) = &self.timezone {
            profile.timezone = tz.clone();
        }
        if let Some(prefs) = &self.notification_preferences {
            profile.notification_preferences = prefs.clone();
        }
    }
}
