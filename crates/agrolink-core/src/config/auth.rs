//! Authentication configuration.
//!
//! User tokens and admin tokens are signed with independent secrets and
//! carry distinct expiry policies.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for user access tokens (HMAC-SHA256).
    #[serde(default = "default_user_secret")]
    pub user_jwt_secret: String,
    /// Secret key for user refresh tokens.
    #[serde(default = "default_refresh_secret")]
    pub user_refresh_secret: String,
    /// Secret key for admin tokens.
    #[serde(default = "default_admin_secret")]
    pub admin_jwt_secret: String,
    /// User access token TTL in hours.
    #[serde(default = "default_user_access_ttl")]
    pub user_access_ttl_hours: u64,
    /// User refresh token TTL in days.
    #[serde(default = "default_user_refresh_ttl")]
    pub user_refresh_ttl_days: u64,
    /// Admin token TTL in hours.
    #[serde(default = "default_admin_ttl")]
    pub admin_token_ttl_hours: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Maximum failed login attempts before lockout.
    #[serde(default = "default_max_failed")]
    pub max_failed_attempts: i32,
    /// Lockout duration for regular users, in minutes.
    #[serde(default = "default_user_lockout")]
    pub user_lockout_minutes: i64,
    /// Lockout duration for admin accounts, in minutes.
    #[serde(default = "default_admin_lockout")]
    pub admin_lockout_minutes: i64,
}

fn default_user_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_refresh_secret() -> String {
    "CHANGE_ME_TOO_IN_PRODUCTION".to_string()
}

fn default_admin_secret() -> String {
    "CHANGE_ME_ADMIN_IN_PRODUCTION".to_string()
}

fn default_user_access_ttl() -> u64 {
    24
}

fn default_user_refresh_ttl() -> u64 {
    7
}

fn default_admin_ttl() -> u64 {
    8
}

fn default_password_min() -> usize {
    8
}

fn default_max_failed() -> i32 {
    5
}

fn default_user_lockout() -> i64 {
    30
}

fn default_admin_lockout() -> i64 {
    60
}
