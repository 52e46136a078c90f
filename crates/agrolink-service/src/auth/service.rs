//! Registration, login, token refresh, and password self-service for
//! marketplace users.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use agrolink_auth::jwt::{UserTokenIssuer, UserTokenVerifier, token_fingerprint};
use agrolink_auth::lockout::LockoutPolicy;
use agrolink_auth::password::{PasswordHasher, PasswordValidator};
use agrolink_core::error::AppError;
use agrolink_database::repositories::client_profile::ClientProfileRepository;
use agrolink_database::repositories::member_profile::MemberProfileRepository;
use agrolink_database::repositories::password_reset::PasswordResetRepository;
use agrolink_database::repositories::user::UserRepository;
use agrolink_database::repositories::user_session::UserSessionRepository;
use agrolink_entity::profile::client::CreateClientProfile;
use agrolink_entity::profile::member::CreateMemberProfile;
use agrolink_entity::session::user_session::CreateUserSession;
use agrolink_entity::user::{CreateUser, User, UserType};

use agrolink_auth::jwt::issuer::UserTokenPair;

/// Registration data for a member account.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegisterMember {
    /// Phone number (unique).
    pub phone_number: String,
    /// Password in the clear; hashed here.
    pub password: String,
    /// Full name.
    pub full_name: String,
    /// Email (optional).
    pub email: Option<String>,
    /// What the member provides.
    pub provider_type: String,
    /// Street address.
    pub address: Option<String>,
    /// Local government area.
    pub local_government_area: String,
    /// State of operation.
    pub state: String,
}

/// Registration data for a client account.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegisterClient {
    /// Phone number (unique).
    pub phone_number: String,
    /// Password in the clear; hashed here.
    pub password: String,
    /// Full name.
    pub full_name: String,
    /// Email (optional).
    pub email: Option<String>,
    /// State of residence.
    pub state: String,
    /// Local government area.
    pub local_government_area: String,
}

/// Result of a successful login.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LoginResult {
    /// Issued token pair.
    pub tokens: UserTokenPair,
    /// The authenticated user.
    pub user: User,
}

/// User authentication and self-service flows.
#[derive(Debug, Clone)]
pub struct AuthService {
    pool: PgPool,
    users: Arc<UserRepository>,
    members: Arc<MemberProfileRepository>,
    clients: Arc<ClientProfileRepository>,
    sessions: Arc<UserSessionRepository>,
    resets: Arc<PasswordResetRepository>,
    issuer: Arc<UserTokenIssuer>,
    verifier: Arc<UserTokenVerifier>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    lockout: LockoutPolicy,
}

impl AuthService {
    /// Creates a new auth service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        users: Arc<UserRepository>,
        members: Arc<MemberProfileRepository>,
        clients: Arc<ClientProfileRepository>,
        sessions: Arc<UserSessionRepository>,
        resets: Arc<PasswordResetRepository>,
        issuer: Arc<UserTokenIssuer>,
        verifier: Arc<UserTokenVerifier>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        lockout: LockoutPolicy,
    ) -> Self {
        Self {
            pool,
            users,
            members,
            clients,
            sessions,
            resets,
            issuer,
            verifier,
            hasher,
            validator,
            lockout,
        }
    }

    /// Register a member: user row + member profile in one transaction,
    /// landing in PENDING.
    pub async fn register_member(&self, data: RegisterMember) -> Result<User, AppError> {
        self.ensure_phone_free(&data.phone_number).await?;
        self.validator.validate(&data.password)?;
        let password_hash = self.hasher.hash_password(&data.password)?;

        let mut tx = self.begin().await?;

        let user = self
            .users
            .create_in_tx(
                tx.as_mut(),
                &CreateUser {
                    phone_number: data.phone_number,
                    password_hash,
                    full_name: data.full_name,
                    email: data.email,
                    user_type: UserType::Member,
                },
            )
            .await?;

        self.members
            .create_in_tx(
                tx.as_mut(),
                &CreateMemberProfile {
                    user_id: user.id,
                    provider_type: data.provider_type,
                    address: data.address,
                    local_government_area: data.local_government_area,
                    state: data.state,
                },
            )
            .await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit registration: {e}")))?;

        info!(user_id = %user.id, "Member registered");
        Ok(user)
    }

    /// Register a client: user row + client profile in one transaction,
    /// landing in PENDING.
    pub async fn register_client(&self, data: RegisterClient) -> Result<User, AppError> {
        self.ensure_phone_free(&data.phone_number).await?;
        self.validator.validate(&data.password)?;
        let password_hash = self.hasher.hash_password(&data.password)?;

        let mut tx = self.begin().await?;

        let user = self
            .users
            .create_in_tx(
                tx.as_mut(),
                &CreateUser {
                    phone_number: data.phone_number,
                    password_hash,
                    full_name: data.full_name,
                    email: data.email,
                    user_type: UserType::Client,
                },
            )
            .await?;

        self.clients
            .create_in_tx(
                tx.as_mut(),
                &CreateClientProfile {
                    user_id: user.id,
                    state: data.state,
                    local_government_area: data.local_government_area,
                },
            )
            .await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit registration: {e}")))?;

        info!(user_id = %user.id, "Client registered");
        Ok(user)
    }

    /// Log a user in.
    ///
    /// The lock check happens before password verification, so attempts
    /// during the lock window fail fast with the remaining time and do
    /// not move the counter. A failed attempt increments the counter and
    /// arms the lock exactly when the threshold is reached.
    pub async fn login(
        &self,
        phone_number: &str,
        password: &str,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<LoginResult, AppError> {
        let user = self
            .users
            .find_by_phone(phone_number)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid phone number or password"))?;

        if user.is_locked() {
            return Err(AppError::unauthorized(format!(
                "Account locked. Try again in {} minutes.",
                user.lock_remaining_minutes().max(1)
            )));
        }

        let valid = self.hasher.verify_password(password, &user.password_hash)?;
        if !valid {
            let outcome = self.lockout.register_failure(user.failed_login_attempts);
            self.users
                .record_failed_login(user.id, outcome.attempts, outcome.locked_until)
                .await?;
            warn!(
                user_id = %user.id,
                attempts = outcome.attempts,
                locked = outcome.locked_until.is_some(),
                "Failed login attempt"
            );
            return Err(AppError::unauthorized("Invalid phone number or password"));
        }

        if !user.is_active {
            return Err(AppError::unauthorized("Account suspended"));
        }

        let tokens = self
            .issuer
            .issue_pair(user.id, &user.phone_number, user.user_type)?;

        self.users.record_successful_login(user.id).await?;

        self.sessions
            .create(&CreateUserSession {
                user_id: user.id,
                token_hash: token_fingerprint(&tokens.access_token),
                ip_address,
                user_agent,
                expires_at: tokens.access_expires_at,
            })
            .await?;

        info!(user_id = %user.id, "User logged in");
        Ok(LoginResult { tokens, user })
    }

    /// Exchange a refresh token for a new token pair.
    pub async fn refresh(&self, refresh_token: &str) -> Result<UserTokenPair, AppError> {
        let claims = self.verifier.decode_refresh(refresh_token)?;

        let user = self
            .users
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid refresh token"))?;

        if !user.is_active {
            return Err(AppError::unauthorized("Account suspended"));
        }

        self.issuer
            .issue_pair(user.id, &user.phone_number, user.user_type)
    }

    /// Change the caller's own password after verifying the current one.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let valid = self
            .hasher
            .verify_password(current_password, &user.password_hash)?;
        if !valid {
            return Err(AppError::validation("Current password is incorrect"));
        }

        self.validator.validate_not_same(current_password, new_password)?;
        self.validator.validate(new_password)?;

        let hash = self.hasher.hash_password(new_password)?;
        self.users.update_password(user_id, &hash).await?;

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    /// File a password reset request for admin processing.
    pub async fn request_password_reset(
        &self,
        phone_number: &str,
        reason: Option<&str>,
    ) -> Result<(), AppError> {
        let user = self
            .users
            .find_by_phone(phone_number)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        self.resets.create(user.id, phone_number, reason).await?;

        info!(user_id = %user.id, "Password reset requested");
        Ok(())
    }

    /// Load the caller's own account.
    pub async fn get_profile(&self, user_id: Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    async fn ensure_phone_free(&self, phone_number: &str) -> Result<(), AppError> {
        if self.users.find_by_phone(phone_number).await?.is_some() {
            return Err(AppError::conflict("Phone number is already registered"));
        }
        Ok(())
    }

    async fn begin(&self) -> Result<sqlx::Transaction<'_, sqlx::Postgres>, AppError> {
        self.pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))
    }
}
