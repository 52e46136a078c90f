//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use agrolink_core::config::AuthConfig;
use agrolink_core::error::AppError;
use agrolink_entity::admin::AdminRole;
use agrolink_entity::user::UserType;

use super::claims::{AdminClaims, UserClaims, UserTokenKind};

/// Result of a successful user token pair generation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UserTokenPair {
    /// API access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

/// Creates signed tokens in the user namespace.
#[derive(Clone)]
pub struct UserTokenIssuer {
    access_key: EncodingKey,
    refresh_key: EncodingKey,
    access_ttl_hours: i64,
    refresh_ttl_days: i64,
}

impl std::fmt::Debug for UserTokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserTokenIssuer")
            .field("access_ttl_hours", &self.access_ttl_hours)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .finish()
    }
}

impl UserTokenIssuer {
    /// Creates a new issuer from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_key: EncodingKey::from_secret(config.user_jwt_secret.as_bytes()),
            refresh_key: EncodingKey::from_secret(config.user_refresh_secret.as_bytes()),
            access_ttl_hours: config.user_access_ttl_hours as i64,
            refresh_ttl_days: config.user_refresh_ttl_days as i64,
        }
    }

    /// Generates an access + refresh token pair for the given user.
    pub fn issue_pair(
        &self,
        user_id: Uuid,
        phone_number: &str,
        user_type: UserType,
    ) -> Result<UserTokenPair, AppError> {
        let now = Utc::now();
        let access_exp = now + chrono::Duration::hours(self.access_ttl_hours);
        let refresh_exp = now + chrono::Duration::days(self.refresh_ttl_days);

        let access_claims = UserClaims {
            sub: user_id,
            phone_number: phone_number.to_string(),
            user_type,
            iat: now.timestamp(),
            exp: access_exp.timestamp(),
            token_kind: UserTokenKind::Access,
        };

        let refresh_claims = UserClaims {
            sub: user_id,
            phone_number: phone_number.to_string(),
            user_type,
            iat: now.timestamp(),
            exp: refresh_exp.timestamp(),
            token_kind: UserTokenKind::Refresh,
        };

        let access_token = encode(&Header::default(), &access_claims, &self.access_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        let refresh_token = encode(&Header::default(), &refresh_claims, &self.refresh_key)
            .map_err(|e| AppError::internal(format!("Failed to encode refresh token: {e}")))?;

        Ok(UserTokenPair {
            access_token,
            refresh_token,
            access_expires_at: access_exp,
            refresh_expires_at: refresh_exp,
        })
    }
}

/// Creates signed tokens in the admin namespace.
#[derive(Clone)]
pub struct AdminTokenIssuer {
    key: EncodingKey,
    ttl_hours: i64,
}

impl std::fmt::Debug for AdminTokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminTokenIssuer")
            .field("ttl_hours", &self.ttl_hours)
            .finish()
    }
}

impl AdminTokenIssuer {
    /// Creates a new issuer from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            key: EncodingKey::from_secret(config.admin_jwt_secret.as_bytes()),
            ttl_hours: config.admin_token_ttl_hours as i64,
        }
    }

    /// Generates a token bound to a freshly-opened admin session.
    ///
    /// Returns the token and its expiry (shared with the session row).
    pub fn issue(
        &self,
        admin_id: Uuid,
        session_id: Uuid,
        username: &str,
        role: AdminRole,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = now + chrono::Duration::hours(self.ttl_hours);

        let claims = AdminClaims {
            sub: admin_id,
            sid: session_id,
            username: username.to_string(),
            role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.key)
            .map_err(|e| AppError::internal(format!("Failed to encode admin token: {e}")))?;

        Ok((token, exp))
    }
}
