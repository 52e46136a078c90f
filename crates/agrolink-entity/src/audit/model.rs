//! Admin activity log entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::action::AdminAction;

/// An immutable activity log entry recording one admin action.
///
/// Append-only: no update or delete path exists for this entity anywhere
/// in the codebase. Corrections are made with compensating entries.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminActivityLog {
    /// Unique entry identifier.
    pub id: Uuid,
    /// The acting admin.
    pub admin_id: Uuid,
    /// The action that was performed.
    pub action: AdminAction,
    /// Human-readable description of what happened.
    pub description: String,
    /// Type of the target entity (e.g. "user", "admin", "rating").
    pub target_type: Option<String>,
    /// Target entity ID.
    pub target_id: Option<Uuid>,
    /// Target entity display name.
    pub target_name: Option<String>,
    /// Structured snapshot of values before the action.
    pub previous_values: Option<serde_json::Value>,
    /// Structured snapshot of values after the action.
    pub new_values: Option<serde_json::Value>,
    /// Names of the fields that changed.
    pub changed_fields: Option<Vec<String>>,
    /// Requester IP when available.
    pub ip_address: Option<String>,
    /// When the action occurred.
    pub created_at: DateTime<Utc>,
}

/// Data required to append an activity log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdminActivityLog {
    /// The acting admin.
    pub admin_id: Uuid,
    /// The action performed.
    pub action: AdminAction,
    /// Human-readable description.
    pub description: String,
    /// Target entity type.
    pub target_type: Option<String>,
    /// Target entity ID.
    pub target_id: Option<Uuid>,
    /// Target entity display name.
    pub target_name: Option<String>,
    /// Snapshot before the action.
    pub previous_values: Option<serde_json::Value>,
    /// Snapshot after the action.
    pub new_values: Option<serde_json::Value>,
    /// Names of the fields that changed.
    pub changed_fields: Option<Vec<String>>,
    /// Requester IP.
    pub ip_address: Option<String>,
}

impl CreateAdminActivityLog {
    /// Minimal entry: actor, action, and description only.
    pub fn brief(admin_id: Uuid, action: AdminAction, description: impl Into<String>) -> Self {
        Self {
            admin_id,
            action,
            description: description.into(),
            target_type: None,
            target_id: None,
            target_name: None,
            previous_values: None,
            new_values: None,
            changed_fields: None,
            ip_address: None,
        }
    }

    /// Attach a target reference.
    pub fn target(
        mut self,
        target_type: impl Into<String>,
        target_id: Uuid,
        target_name: impl Into<String>,
    ) -> Self {
        self.target_type = Some(target_type.into());
        self.target_id = Some(target_id);
        self.target_name = Some(target_name.into());
        self
    }

    /// Attach before/after snapshots and the changed field names.
    pub fn changes(
        mut self,
        previous: serde_json::Value,
        new: serde_json::Value,
        fields: Vec<String>,
    ) -> Self {
        self.previous_values = Some(previous);
        self.new_values = Some(new);
        self.changed_fields = Some(fields);
        self
    }
}
