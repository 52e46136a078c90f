//! Admin-mediated password reset workflow.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use agrolink_auth::password::PasswordHasher;
use agrolink_core::error::AppError;
use agrolink_core::types::pagination::{PageRequest, PageResponse};
use agrolink_database::repositories::audit::AuditLogRepository;
use agrolink_database::repositories::notification::NotificationRepository;
use agrolink_database::repositories::password_reset::PasswordResetRepository;
use agrolink_database::repositories::user::UserRepository;
use agrolink_entity::audit::{AdminAction, CreateAdminActivityLog};
use agrolink_entity::notification::{CreateNotification, NotificationKind};
use agrolink_entity::password_reset::{PasswordResetRequest, PasswordResetStatus};

use crate::context::AdminContext;

/// Processes password reset requests filed by users who cannot
/// self-serve.
#[derive(Debug, Clone)]
pub struct PasswordResetService {
    pool: PgPool,
    requests: Arc<PasswordResetRepository>,
    users: Arc<UserRepository>,
    notifications: Arc<NotificationRepository>,
    audit: Arc<AuditLogRepository>,
    hasher: Arc<PasswordHasher>,
}

impl PasswordResetService {
    /// Creates a new password reset service.
    pub fn new(
        pool: PgPool,
        requests: Arc<PasswordResetRepository>,
        users: Arc<UserRepository>,
        notifications: Arc<NotificationRepository>,
        audit: Arc<AuditLogRepository>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            pool,
            requests,
            users,
            notifications,
            audit,
            hasher,
        }
    }

    /// PENDING requests, oldest first.
    pub async fn pending(
        &self,
        ctx: &AdminContext,
        page: PageRequest,
    ) -> Result<PageResponse<PasswordResetRequest>, AppError> {
        ctx.require_reset_passwords()?;
        self.requests.find_pending(&page).await
    }

    /// Process a request: hash the temporary password, mark COMPLETED,
    /// notify the user, and audit — one transaction.
    pub async fn process(
        &self,
        ctx: &AdminContext,
        request_id: Uuid,
        temporary_password: &str,
        admin_notes: Option<&str>,
    ) -> Result<(), AppError> {
        ctx.require_reset_passwords()?;

        let request = self.load(request_id).await?;
        if request.status != PasswordResetStatus::Pending {
            return Err(AppError::conflict("Request already processed"));
        }

        let user = self
            .users
            .find_by_id(request.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let hash = self.hasher.hash_password(temporary_password)?;

        let mut tx = self.begin().await?;

        self.users
            .reset_password_in_tx(tx.as_mut(), request.user_id, &hash)
            .await?;

        self.requests
            .resolve_in_tx(
                tx.as_mut(),
                request_id,
                ctx.admin_id,
                PasswordResetStatus::Completed,
                Some(&hash),
                admin_notes,
            )
            .await?;

        self.notifications
            .create_in_tx(
                tx.as_mut(),
                &CreateNotification {
                    user_id: request.user_id,
                    kind: NotificationKind::PasswordResetReady,
                    title: "Password Reset Complete".to_string(),
                    message: "Your password has been reset by the admin. Please login with \
                              your temporary password and change it immediately."
                        .to_string(),
                    payload: None,
                },
            )
            .await?;

        let mut entry = CreateAdminActivityLog::brief(
            ctx.admin_id,
            AdminAction::UserPasswordReset,
            format!(
                "Processed password reset for {} ({})",
                user.full_name, user.phone_number
            ),
        )
        .target("user", request.user_id, &user.full_name);
        entry.ip_address = ctx.ip_address.clone();
        self.audit.create_in_tx(tx.as_mut(), &entry).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit password reset: {e}")))?;

        info!(admin_id = %ctx.admin_id, request_id = %request_id, "Password reset processed");
        Ok(())
    }

    /// Reject a request with a reason, notifying the user.
    pub async fn reject(
        &self,
        ctx: &AdminContext,
        request_id: Uuid,
        reason: &str,
    ) -> Result<(), AppError> {
        ctx.require_reset_passwords()?;

        let request = self.load(request_id).await?;
        if request.status != PasswordResetStatus::Pending {
            return Err(AppError::conflict("Request already processed"));
        }

        let mut tx = self.begin().await?;

        self.requests
            .resolve_in_tx(
                tx.as_mut(),
                request_id,
                ctx.admin_id,
                PasswordResetStatus::Rejected,
                None,
                Some(reason),
            )
            .await?;

        self.notifications
            .create_in_tx(
                tx.as_mut(),
                &CreateNotification {
                    user_id: request.user_id,
                    kind: NotificationKind::SystemAnnouncement,
                    title: "Password Reset Request Rejected".to_string(),
                    message: format!("Your password reset request was rejected. Reason: {reason}"),
                    payload: None,
                },
            )
            .await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit rejection: {e}")))?;

        info!(admin_id = %ctx.admin_id, request_id = %request_id, "Password reset rejected");
        Ok(())
    }

    /// Directly reset a user's password without a filed request, clearing
    /// any lockout.
    pub async fn reset_directly(
        &self,
        ctx: &AdminContext,
        user_id: Uuid,
        new_password: &str,
    ) -> Result<(), AppError> {
        ctx.require_reset_passwords()?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let hash = self.hasher.hash_password(new_password)?;

        let mut tx = self.begin().await?;

        self.users
            .reset_password_in_tx(tx.as_mut(), user_id, &hash)
            .await?;

        self.notifications
            .create_in_tx(
                tx.as_mut(),
                &CreateNotification {
                    user_id,
                    kind: NotificationKind::PasswordResetReady,
                    title: "Password Reset by Admin".to_string(),
                    message: "Your password has been reset. Please login and change it."
                        .to_string(),
                    payload: None,
                },
            )
            .await?;

        let mut entry = CreateAdminActivityLog::brief(
            ctx.admin_id,
            AdminAction::UserPasswordReset,
            format!("Directly reset password for {}", user.full_name),
        )
        .target("user", user_id, &user.full_name);
        entry.ip_address = ctx.ip_address.clone();
        self.audit.create_in_tx(tx.as_mut(), &entry).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit password reset: {e}")))?;

        info!(admin_id = %ctx.admin_id, user_id = %user_id, "Password directly reset");
        Ok(())
    }

    async fn load(&self, request_id: Uuid) -> Result<PasswordResetRequest, AppError> {
        self.requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found("Reset request not found"))
    }

    async fn begin(&self) -> Result<sqlx::Transaction<'_, sqlx::Postgres>, AppError> {
        self.pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))
    }
}
