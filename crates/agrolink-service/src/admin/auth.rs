//! Admin login, logout, and session termination.

use std::sync::Arc;

use tracing::{info, warn};

use chrono::{DateTime, Utc};

use agrolink_auth::jwt::{AdminTokenIssuer, token_fingerprint};
use agrolink_auth::lockout::LockoutPolicy;
use agrolink_auth::password::{PasswordHasher, PasswordValidator};
use agrolink_auth::session::AdminSessionManager;
use agrolink_core::error::AppError;
use agrolink_database::repositories::admin::AdminRepository;
use agrolink_database::repositories::admin_session::AdminSessionRepository;
use agrolink_database::repositories::audit::AuditLogRepository;
use agrolink_entity::admin::AdminUser;
use agrolink_entity::audit::{AdminAction, CreateAdminActivityLog};
use agrolink_entity::session::admin_session::CreateAdminSession;

use crate::context::AdminContext;

/// Result of a successful admin login.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AdminLoginResult {
    /// Issued admin token.
    pub token: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
    /// The authenticated admin.
    pub admin: AdminUser,
}

/// Admin authentication over server-tracked sessions.
#[derive(Debug, Clone)]
pub struct AdminAuthService {
    admins: Arc<AdminRepository>,
    sessions: Arc<AdminSessionRepository>,
    session_manager: Arc<AdminSessionManager>,
    audit: Arc<AuditLogRepository>,
    issuer: Arc<AdminTokenIssuer>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    lockout: LockoutPolicy,
}

impl AdminAuthService {
    /// Creates a new admin auth service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        admins: Arc<AdminRepository>,
        sessions: Arc<AdminSessionRepository>,
        session_manager: Arc<AdminSessionManager>,
        audit: Arc<AuditLogRepository>,
        issuer: Arc<AdminTokenIssuer>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        lockout: LockoutPolicy,
    ) -> Self {
        Self {
            admins,
            sessions,
            session_manager,
            audit,
            issuer,
            hasher,
            validator,
            lockout,
        }
    }

    /// Log an admin in, opening a server-tracked session scoped to the
    /// issued token's lifetime.
    ///
    /// The lock check precedes password verification; attempts during the
    /// lock window neither increment the counter nor extend the lock.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<AdminLoginResult, AppError> {
        let admin = self
            .admins
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

        if admin.is_locked() {
            return Err(AppError::unauthorized(format!(
                "Account locked. Try again in {} minutes.",
                admin.lock_remaining_minutes().max(1)
            )));
        }

        let valid = self.hasher.verify_password(password, &admin.password_hash)?;
        if !valid {
            let outcome = self.lockout.register_failure(admin.failed_login_attempts);
            self.admins
                .record_failed_login(admin.id, outcome.attempts, outcome.locked_until)
                .await?;
            warn!(
                admin_id = %admin.id,
                attempts = outcome.attempts,
                locked = outcome.locked_until.is_some(),
                "Failed admin login attempt"
            );
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        if !admin.is_active {
            return Err(AppError::unauthorized("Account deactivated"));
        }

        // Open the session row first so the token can carry its id.
        let placeholder_expiry = Utc::now();
        let session = self
            .sessions
            .create(&CreateAdminSession {
                admin_id: admin.id,
                token_hash: String::new(),
                ip_address: ip_address.clone(),
                user_agent: user_agent.clone(),
                expires_at: placeholder_expiry,
            })
            .await?;

        let (token, expires_at) =
            self.issuer
                .issue(admin.id, session.id, &admin.username, admin.role)?;

        self.sessions
            .bind_token(session.id, &token_fingerprint(&token), expires_at)
            .await?;

        self.admins.record_successful_login(admin.id).await?;

        let mut entry = CreateAdminActivityLog::brief(
            admin.id,
            AdminAction::Login,
            format!("Admin {} logged in", admin.username),
        );
        entry.ip_address = ip_address;
        self.audit.create(&entry).await?;

        info!(admin_id = %admin.id, session_id = %session.id, "Admin logged in");
        Ok(AdminLoginResult {
            token,
            expires_at,
            admin,
        })
    }

    /// Log out: revoke the session behind the presented token.
    pub async fn logout(&self, ctx: &AdminContext) -> Result<(), AppError> {
        self.session_manager.close(ctx.session_id, "Logout").await?;

        let mut entry = CreateAdminActivityLog::brief(
            ctx.admin_id,
            AdminAction::Logout,
            format!("Admin {} logged out", ctx.username),
        );
        entry.ip_address = ctx.ip_address.clone();
        self.audit.create(&entry).await?;
        Ok(())
    }

    /// Revoke every active session for the calling admin, on demand.
    pub async fn terminate_all_sessions(&self, ctx: &AdminContext) -> Result<u64, AppError> {
        let terminated = self
            .session_manager
            .close_all(ctx.admin_id, "Terminated on request")
            .await?;

        let mut entry = CreateAdminActivityLog::brief(
            ctx.admin_id,
            AdminAction::SessionsTerminated,
            format!("Terminated {terminated} of own sessions"),
        );
        entry.ip_address = ctx.ip_address.clone();
        self.audit.create(&entry).await?;

        Ok(terminated)
    }

    /// Change the caller's own password, clearing the must-change flag.
    pub async fn change_password(
        &self,
        ctx: &AdminContext,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let admin = self
            .admins
            .find_by_id(ctx.admin_id)
            .await?
            .ok_or_else(|| AppError::not_found("Admin not found"))?;

        let valid = self
            .hasher
            .verify_password(current_password, &admin.password_hash)?;
        if !valid {
            return Err(AppError::validation("Current password is incorrect"));
        }

        self.validator.validate_not_same(current_password, new_password)?;
        self.validator.validate(new_password)?;

        let hash = self.hasher.hash_password(new_password)?;
        self.admins.update_password(ctx.admin_id, &hash, false).await?;

        info!(admin_id = %ctx.admin_id, "Admin password changed");
        Ok(())
    }

    /// Load the caller's own account.
    pub async fn get_profile(&self, ctx: &AdminContext) -> Result<AdminUser, AppError> {
        self.admins
            .find_by_id(ctx.admin_id)
            .await?
            .ok_or_else(|| AppError::not_found("Admin not found"))
    }
}
