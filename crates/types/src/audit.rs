//! Audit trail types for compliance event tracking.
//!
//! Audit entries capture who did what, to which record, with optional
//! before/after snapshots. Entries are append-only and immutable: the
//! client never inserts them directly, it submits an [`ActionLog`] request
//! to the backend's logging procedure, which stamps the authoritative
//! fields (actor, timestamp, network metadata) server-side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::identity::UserId;

/// One immutable row of the append-only audit log.
///
/// Displayed newest-first; never reordered or edited after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditTrailEntry {
    /// Row identifier.
    pub id: Uuid,
    /// Actor who performed the action, when attributable.
    pub user_id: Option<UserId>,
    /// Free-text action label, e.g. `"created"` or `"contract_signed"`.
    pub action: String,
    /// Table the action refers to, if any.
    pub table_name: Option<String>,
    /// Record within that table, if any.
    pub record_id: Option<String>,
    /// Opaque snapshot of the record before the action.
    pub old_values: Option<Value>,
    /// Opaque snapshot of the record after the action.
    pub new_values: Option<Value>,
    /// Client IP address, stamped by the backend.
    pub ip_address: Option<String>,
    /// Client user agent, stamped by the backend.
    pub user_agent: Option<String>,
    /// Creation time, stamped by the backend.
    pub created_at: DateTime<Utc>,
}

/// Request payload for the audit-logging procedure.
///
/// Only the fields the client legitimately knows. Actor identity,
/// timestamps, and network metadata are attached server-side so they
/// cannot be forged by the caller.
///
/// # Example
///
/// ```
/// use covenant_types::ActionLog;
/// use serde_json::json;
///
/// let log = ActionLog::new("created")
///     .table("contracts")
///     .record("c1")
///     .new_values(json!({"status": "draft"}));
/// assert_eq!(log.action, "created");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionLog {
    /// Free-text action label.
    pub action: String,
    /// Table the action refers to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    /// Record within that table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    /// Snapshot before the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_values: Option<Value>,
    /// Snapshot after the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_values: Option<Value>,
}

impl ActionLog {
    /// Creates a log request for an action label.
    #[must_use]
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            table_name: None,
            record_id: None,
            old_values: None,
            new_values: None,
        }
    }

    /// Sets the table the action refers to.
    #[must_use]
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table_name = Some(table.into());
        self
    }

    /// Sets the record the action refers to.
    #[must_use]
    pub fn record(mut self, record: impl Into<String>) -> Self {
        self.record_id = Some(record.into());
        self
    }

    /// Attaches a before-snapshot of the record.
    #[must_use]
    pub fn old_values(mut self, values: Value) -> Self {
        self.old_values = Some(values);
        self
    }

    /// Attaches an after-snapshot of the record.
    #[must_use]
    pub fn new_values(mut self, values: Value) -> Self {
        self.new_values = Some(values);
        self
    }
}
