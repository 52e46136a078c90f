//! Password reset request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status of an admin-mediated password reset request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "password_reset_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PasswordResetStatus {
    /// Waiting for an admin to process it.
    Pending,
    /// Processed; a temporary password was issued.
    Completed,
    /// Rejected by an admin.
    Rejected,
}

/// A request filed by a user who cannot self-serve a password reset.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PasswordResetRequest {
    /// Unique request identifier.
    pub id: Uuid,
    /// The requesting user.
    pub user_id: Uuid,
    /// Phone number the request was filed under.
    pub phone_number: String,
    /// Why the user says they need a reset.
    pub request_reason: Option<String>,
    /// Processing status.
    pub status: PasswordResetStatus,
    /// Hash of the temporary password issued on completion.
    #[serde(skip_serializing)]
    pub temporary_password_hash: Option<String>,
    /// Notes left by the processing admin.
    pub admin_notes: Option<String>,
    /// The admin who processed the request.
    pub processed_by_admin_id: Option<Uuid>,
    /// When the request was processed.
    pub processed_at: Option<DateTime<Utc>>,
    /// When the request stops being processable.
    pub expires_at: DateTime<Utc>,
    /// When the request was filed.
    pub created_at: DateTime<Utc>,
}

impl PasswordResetRequest {
    /// Check whether the request can still be processed.
    pub fn is_processable(&self) -> bool {
        self.status == PasswordResetStatus::Pending && self.expires_at > Utc::now()
    }
}
