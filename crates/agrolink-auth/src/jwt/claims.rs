//! JWT claims structures for both token namespaces.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use agrolink_entity::admin::AdminRole;
use agrolink_entity::user::UserType;

/// Distinguishes user access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserTokenKind {
    /// Token for API requests.
    Access,
    /// Long-lived token for obtaining new access tokens.
    Refresh,
}

/// Claims payload embedded in every user token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// Phone number for convenience.
    pub phone_number: String,
    /// Member or client.
    pub user_type: UserType,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Access or refresh.
    pub token_kind: UserTokenKind,
}

impl UserClaims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }
}

/// Claims payload embedded in every admin token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Subject — the admin ID.
    pub sub: Uuid,
    /// Server-tracked session this token belongs to.
    pub sid: Uuid,
    /// Username for convenience.
    pub username: String,
    /// Role at issuance; capability flags are reloaded per request.
    pub role: AdminRole,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl AdminClaims {
    /// Returns the admin ID from the subject claim.
    pub fn admin_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the session ID.
    pub fn session_id(&self) -> Uuid {
        self.sid
    }
}
