//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use agrolink_entity::admin::AdminUser;
use agrolink_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Count response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    /// Count value.
    pub count: i64,
}

/// Public view of a user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Phone number.
    pub phone_number: String,
    /// Full name.
    pub full_name: String,
    /// Email.
    pub email: Option<String>,
    /// Member or client.
    pub user_type: String,
    /// Verification status.
    pub verification_status: String,
    /// Whether the account is active.
    pub is_active: bool,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Last login.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            phone_number: user.phone_number,
            full_name: user.full_name,
            email: user.email,
            user_type: user.user_type.to_string(),
            verification_status: user.verification_status.to_string(),
            is_active: user.is_active,
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}

/// User login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiration.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration.
    pub refresh_expires_at: DateTime<Utc>,
    /// User info.
    pub user: UserResponse,
}

/// Public view of an admin account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminResponse {
    /// Admin ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Full name.
    pub full_name: String,
    /// Email.
    pub email: Option<String>,
    /// Role.
    pub role: String,
    /// Whether the account is active.
    pub is_active: bool,
    /// Whether a password change is required.
    pub must_change_password: bool,
    /// Capability flags.
    pub capabilities: agrolink_entity::admin::AdminCapabilities,
    /// Last login.
    pub last_login_at: Option<DateTime<Utc>>,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<AdminUser> for AdminResponse {
    fn from(admin: AdminUser) -> Self {
        Self {
            id: admin.id,
            username: admin.username,
            full_name: admin.full_name,
            email: admin.email,
            role: admin.role.to_string(),
            is_active: admin.is_active,
            must_change_password: admin.must_change_password,
            capabilities: admin.capabilities,
            last_login_at: admin.last_login_at,
            created_at: admin.created_at,
        }
    }
}

/// Admin login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginResponse {
    /// Admin token.
    pub access_token: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
    /// Admin info.
    pub admin: AdminResponse,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Database reachability.
    pub database: String,
}
