//! Admin account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::capabilities::AdminCapabilities;
use super::role::AdminRole;

/// An administrator account, in a separate identity space from `User`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminUser {
    /// Unique admin identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Argon2id password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Full name.
    pub full_name: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Phone number (optional).
    pub phone_number: Option<String>,
    /// Advisory role; capability flags are enforced.
    pub role: AdminRole,
    /// Enforced capability flags.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub capabilities: AdminCapabilities,
    /// Whether the account may log in.
    pub is_active: bool,
    /// Whether the admin must change their password at next login.
    pub must_change_password: bool,
    /// Number of consecutive failed login attempts.
    pub failed_login_attempts: i32,
    /// Account locked until this time (if locked).
    pub locked_until: Option<DateTime<Utc>>,
    /// Total successful logins.
    pub login_count: i32,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
    /// When the account was deactivated (if it was).
    pub deactivated_at: Option<DateTime<Utc>>,
    /// The admin who created this account.
    pub created_by_admin_id: Option<Uuid>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl AdminUser {
    /// Check if the account is currently locked out of login.
    pub fn is_locked(&self) -> bool {
        self.locked_until.is_some_and(|until| Utc::now() < until)
    }

    /// Remaining lockout time in whole minutes (0 if not locked).
    pub fn lock_remaining_minutes(&self) -> i64 {
        self.locked_until
            .map(|until| (until - Utc::now()).num_minutes().max(0))
            .unwrap_or(0)
    }
}

/// Data required to create a new admin account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdminUser {
    /// Username (unique).
    pub username: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Full name.
    pub full_name: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Phone number (optional).
    pub phone_number: Option<String>,
    /// Assigned role.
    pub role: AdminRole,
    /// Resolved capability flags (defaults already merged with overrides).
    pub capabilities: AdminCapabilities,
    /// The creating admin.
    pub created_by_admin_id: Uuid,
}
