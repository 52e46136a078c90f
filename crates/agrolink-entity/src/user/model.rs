//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::user_type::UserType;
use super::verification_status::VerificationStatus;

/// A registered marketplace user (member or client).
///
/// Verification fields are mutated only through the verification service;
/// accounts are never hard-deleted — suspension is the soft path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique phone number used as the login identifier.
    pub phone_number: String,
    /// Argon2id password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Full legal name.
    pub full_name: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Member or client.
    pub user_type: UserType,
    /// Current verification status.
    pub verification_status: VerificationStatus,
    /// Whether the account may act on the platform.
    pub is_active: bool,
    /// Number of consecutive failed login attempts.
    pub failed_login_attempts: i32,
    /// Account locked until this time (if locked).
    pub locked_until: Option<DateTime<Utc>>,
    /// Total successful logins.
    pub login_count: i32,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
    /// When the user submitted their registration for verification.
    pub verification_submitted_at: Option<DateTime<Utc>>,
    /// When an admin started reviewing this user.
    pub verification_started_at: Option<DateTime<Utc>>,
    /// When the user was verified.
    pub verified_at: Option<DateTime<Utc>>,
    /// The admin who last acted on this user's verification.
    pub verified_by_admin_id: Option<Uuid>,
    /// Reason given on rejection.
    pub rejection_reason: Option<String>,
    /// Detailed explanation given on rejection.
    pub rejection_details: Option<String>,
    /// How many times the user has resubmitted documents.
    pub resubmission_count: i32,
    /// When the account was suspended.
    pub suspended_at: Option<DateTime<Utc>>,
    /// Reason for suspension.
    pub suspended_reason: Option<String>,
    /// The admin who suspended the account.
    pub suspended_by_admin_id: Option<Uuid>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
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

    /// Check if the account has passed verification.
    pub fn is_verified(&self) -> bool {
        self.verification_status == VerificationStatus::Verified
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Phone number (unique).
    pub phone_number: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Full name.
    pub full_name: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Member or client.
    pub user_type: UserType,
}
