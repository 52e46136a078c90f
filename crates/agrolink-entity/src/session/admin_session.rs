//! Admin session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A server-tracked admin session, one row per issued admin token.
///
/// Distinguishes "token cryptographically valid" from "session
/// administratively still alive": a token whose session row is inactive
/// must be rejected even if its signature and expiry check out.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminSession {
    /// Unique session identifier.
    pub id: Uuid,
    /// The admin this session belongs to.
    pub admin_id: Uuid,
    /// SHA-256 hex digest of the issued token.
    pub token_hash: String,
    /// IP address from which the session was opened.
    pub ip_address: Option<String>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// Whether the session is still administratively alive.
    pub is_active: bool,
    /// When the session was revoked.
    pub terminated_at: Option<DateTime<Utc>>,
    /// Reason the session was revoked.
    pub termination_reason: Option<String>,
    /// Token expiry (mirrors the JWT `exp` claim).
    pub expires_at: DateTime<Utc>,
    /// When the session was opened (login time).
    pub created_at: DateTime<Utc>,
}

impl AdminSession {
    /// Check whether the session is alive: active and not past expiry.
    pub fn is_alive(&self) -> bool {
        self.is_active && self.expires_at > Utc::now()
    }
}

/// Data required to open a new admin session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdminSession {
    /// The admin this session belongs to.
    pub admin_id: Uuid,
    /// SHA-256 hex digest of the issued token.
    pub token_hash: String,
    /// Client IP address.
    pub ip_address: Option<String>,
    /// User-Agent header.
    pub user_agent: Option<String>,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
}
