//! JWT validation for both token namespaces.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use agrolink_core::config::AuthConfig;
use agrolink_core::error::AppError;

use super::claims::{AdminClaims, UserClaims, UserTokenKind};

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 5; // seconds, clock skew
    validation.required_spec_claims.clear();
    validation
}

/// Validates tokens in the user namespace.
#[derive(Clone)]
pub struct UserTokenVerifier {
    access_key: DecodingKey,
    refresh_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for UserTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserTokenVerifier").finish()
    }
}

impl UserTokenVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_key: DecodingKey::from_secret(config.user_jwt_secret.as_bytes()),
            refresh_key: DecodingKey::from_secret(config.user_refresh_secret.as_bytes()),
            validation: validation(),
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode_access(&self, token: &str) -> Result<UserClaims, AppError> {
        let claims = decode::<UserClaims>(token, &self.access_key, &self.validation)
            .map_err(|_| AppError::unauthorized("Invalid or expired token"))?
            .claims;

        if claims.token_kind != UserTokenKind::Access {
            return Err(AppError::unauthorized(
                "Invalid token type: expected access token",
            ));
        }
        Ok(claims)
    }

    /// Decodes and validates a refresh token string.
    pub fn decode_refresh(&self, token: &str) -> Result<UserClaims, AppError> {
        let claims = decode::<UserClaims>(token, &self.refresh_key, &self.validation)
            .map_err(|_| AppError::unauthorized("Invalid refresh token"))?
            .claims;

        if claims.token_kind != UserTokenKind::Refresh {
            return Err(AppError::unauthorized(
                "Invalid token type: expected refresh token",
            ));
        }
        Ok(claims)
    }
}

/// Validates tokens in the admin namespace.
///
/// Cryptographic validity alone is not sufficient for admin requests; the
/// caller must also confirm the session row is still active via
/// [`crate::session::AdminSessionManager`].
#[derive(Clone)]
pub struct AdminTokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for AdminTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminTokenVerifier").finish()
    }
}

impl AdminTokenVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            key: DecodingKey::from_secret(config.admin_jwt_secret.as_bytes()),
            validation: validation(),
        }
    }

    /// Decodes and validates an admin token's signature and expiry.
    pub fn decode(&self, token: &str) -> Result<AdminClaims, AppError> {
        decode::<AdminClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::unauthorized("Invalid or expired admin token"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::issuer::{AdminTokenIssuer, UserTokenIssuer};
    use agrolink_core::config::AuthConfig;
    use agrolink_entity::admin::AdminRole;
    use agrolink_entity::user::UserType;
    use uuid::Uuid;

    fn test_config() -> AuthConfig {
        AuthConfig {
            user_jwt_secret: "user-secret-for-tests".into(),
            user_refresh_secret: "refresh-secret-for-tests".into(),
            admin_jwt_secret: "admin-secret-for-tests".into(),
            user_access_ttl_hours: 24,
            user_refresh_ttl_days: 7,
            admin_token_ttl_hours: 8,
            password_min_length: 8,
            max_failed_attempts: 5,
            user_lockout_minutes: 30,
            admin_lockout_minutes: 60,
        }
    }

    #[test]
    fn test_user_access_token_roundtrip() {
        let config = test_config();
        let issuer = UserTokenIssuer::new(&config);
        let verifier = UserTokenVerifier::new(&config);

        let user_id = Uuid::new_v4();
        let pair = issuer
            .issue_pair(user_id, "08012345678", UserType::Member)
            .unwrap();

        let claims = verifier.decode_access(&pair.access_token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.user_type, UserType::Member);
        assert_eq!(claims.phone_number, "08012345678");
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let config = test_config();
        let issuer = UserTokenIssuer::new(&config);
        let verifier = UserTokenVerifier::new(&config);

        let pair = issuer
            .issue_pair(Uuid::new_v4(), "08012345678", UserType::Client)
            .unwrap();

        assert!(verifier.decode_access(&pair.refresh_token).is_err());
        assert!(verifier.decode_refresh(&pair.refresh_token).is_ok());
    }

    #[test]
    fn test_admin_token_roundtrip() {
        let config = test_config();
        let issuer = AdminTokenIssuer::new(&config);
        let verifier = AdminTokenVerifier::new(&config);

        let admin_id = Uuid::new_v4();
        let session_id = Uuid::new_v4();
        let (token, _exp) = issuer
            .issue(admin_id, session_id, "rootadmin", AdminRole::SuperAdmin)
            .unwrap();

        let claims = verifier.decode(&token).unwrap();
        assert_eq!(claims.admin_id(), admin_id);
        assert_eq!(claims.session_id(), session_id);
        assert_eq!(claims.role, AdminRole::SuperAdmin);
    }

    #[test]
    fn test_namespaces_are_isolated() {
        let config = test_config();
        let user_issuer = UserTokenIssuer::new(&config);
        let admin_verifier = AdminTokenVerifier::new(&config);

        let pair = user_issuer
            .issue_pair(Uuid::new_v4(), "08012345678", UserType::Member)
            .unwrap();

        // A user token must never verify as an admin token.
        assert!(admin_verifier.decode(&pair.access_token).is_err());
    }
}
