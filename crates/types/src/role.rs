//! Role assignments and the authorization rank order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::UserId;

/// Access role assigned to a user.
///
/// The set is closed and strictly ordered for least-privilege checks:
/// `Admin > User > Viewer`. Use [`Role::grants`] to test whether a held
/// role satisfies a required one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Standard authenticated access.
    User,
    /// Read-only access.
    Viewer,
}

impl Role {
    /// Returns the integer rank used for authorization comparisons.
    ///
    /// Admin = 3, User = 2, Viewer = 1.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::Admin => 3,
            Self::User => 2,
            Self::Viewer => 1,
        }
    }

    /// Returns true iff a holder of `self` satisfies `required`.
    ///
    /// True exactly when `self.rank() >= required.rank()`.
    #[must_use]
    pub fn grants(self, required: Role) -> bool {
        self.rank() >= required.rank()
    }

    /// Returns the wire label for this role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Viewer => "viewer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            "viewer" => Ok(Self::Viewer),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

/// A user's role assignment row.
///
/// At most one assignment exists per user; absence is a valid state and
/// means no role has been granted yet. This layer never mutates role rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRole {
    /// User the role is assigned to.
    pub user_id: UserId,
    /// The assigned role.
    pub role: Role,
    /// Who granted the role, when known.
    pub assigned_by: Option<UserId>,
    /// When the role was granted.
    pub assigned_at: DateTime<Utc>,
}
