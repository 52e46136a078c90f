//! User session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A tracked user session, created at login.
///
/// Exists primarily so that suspending an account can force-terminate
/// everything the user currently holds.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserSession {
    /// Unique session identifier.
    pub id: Uuid,
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// SHA-256 hex digest of the issued access token.
    pub token_hash: String,
    /// IP address from which the session was opened.
    pub ip_address: Option<String>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// Whether the session is still alive.
    pub is_active: bool,
    /// When the session was terminated.
    pub terminated_at: Option<DateTime<Utc>>,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
    /// When the session was opened.
    pub created_at: DateTime<Utc>,
}

/// Data required to record a new user session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserSession {
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// SHA-256 hex digest of the issued access token.
    pub token_hash: String,
    /// Client IP address.
    pub ip_address: Option<String>,
    /// User-Agent header.
    pub user_agent: Option<String>,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
}
