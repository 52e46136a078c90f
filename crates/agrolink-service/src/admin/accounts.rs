//! Admin account management, gated to SUPER_ADMIN.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use agrolink_auth::password::{PasswordHasher, PasswordValidator};
use agrolink_auth::session::AdminSessionManager;
use agrolink_core::error::AppError;
use agrolink_database::repositories::admin::AdminRepository;
use agrolink_database::repositories::audit::AuditLogRepository;
use agrolink_entity::admin::{
    AdminRole, AdminUser, CreateAdminUser, capabilities::CapabilityOverrides,
};
use agrolink_entity::audit::{AdminAction, CreateAdminActivityLog};

use crate::context::AdminContext;

/// Request to create a new admin account.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateAdminRequest {
    /// Username (unique).
    pub username: String,
    /// Initial password.
    pub password: String,
    /// Full name.
    pub full_name: String,
    /// Email (optional).
    pub email: Option<String>,
    /// Phone number (optional).
    pub phone_number: Option<String>,
    /// Role; seeds default capability flags.
    pub role: AdminRole,
    /// Per-flag overrides of the role defaults.
    #[serde(default)]
    pub capabilities: CapabilityOverrides,
}

/// Request to update an admin account.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdateAdminRequest {
    /// New full name.
    pub full_name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New phone number.
    pub phone_number: Option<String>,
    /// New role.
    pub role: Option<AdminRole>,
    /// Per-flag capability overrides applied on top of the current set.
    #[serde(default)]
    pub capabilities: CapabilityOverrides,
}

/// Manages admin accounts behind the SUPER_ADMIN gate.
#[derive(Debug, Clone)]
pub struct AdminAccountService {
    admins: Arc<AdminRepository>,
    audit: Arc<AuditLogRepository>,
    session_manager: Arc<AdminSessionManager>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
}

impl AdminAccountService {
    /// Creates a new admin account service.
    pub fn new(
        admins: Arc<AdminRepository>,
        audit: Arc<AuditLogRepository>,
        session_manager: Arc<AdminSessionManager>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            admins,
            audit,
            session_manager,
            hasher,
            validator,
        }
    }

    /// List all admin accounts.
    pub async fn list(&self, ctx: &AdminContext) -> Result<Vec<AdminUser>, AppError> {
        ctx.require_super_admin()?;
        self.admins.find_all().await
    }

    /// Create a new admin. Capability flags are seeded from the role's
    /// fixed default table; explicit flags in the request override
    /// per-flag. The new account must change its password on first login.
    pub async fn create(
        &self,
        ctx: &AdminContext,
        req: CreateAdminRequest,
    ) -> Result<AdminUser, AppError> {
        ctx.require_super_admin()?;

        if req.username.trim().len() < 3 {
            return Err(AppError::validation(
                "Username must be at least 3 characters",
            ));
        }
        if self.admins.find_by_username(&req.username).await?.is_some() {
            return Err(AppError::conflict("Username already exists"));
        }

        self.validator.validate(&req.password)?;
        let password_hash = self.hasher.hash_password(&req.password)?;

        let capabilities = req
            .role
            .default_capabilities()
            .with_overrides(&req.capabilities);

        let admin = self
            .admins
            .create(&CreateAdminUser {
                username: req.username,
                password_hash,
                full_name: req.full_name,
                email: req.email,
                phone_number: req.phone_number,
                role: req.role,
                capabilities,
                created_by_admin_id: ctx.admin_id,
            })
            .await?;

        let mut entry = CreateAdminActivityLog::brief(
            ctx.admin_id,
            AdminAction::AdminCreated,
            format!("Created admin {}", admin.username),
        )
        .target("admin", admin.id, &admin.full_name);
        entry.ip_address = ctx.ip_address.clone();
        self.audit.create(&entry).await?;

        info!(admin_id = %ctx.admin_id, new_admin_id = %admin.id, "Admin created");
        Ok(admin)
    }

    /// Update an admin's profile, role, and capability flags, capturing
    /// before/after snapshots in the audit trail.
    pub async fn update(
        &self,
        ctx: &AdminContext,
        admin_id: Uuid,
        req: UpdateAdminRequest,
    ) -> Result<AdminUser, AppError> {
        ctx.require_super_admin()?;

        let before = self
            .admins
            .find_by_id(admin_id)
            .await?
            .ok_or_else(|| AppError::not_found("Admin not found"))?;

        let capabilities = before.capabilities.with_overrides(&req.capabilities);

        let after = self
            .admins
            .update(
                admin_id,
                req.full_name.as_deref(),
                req.email.as_deref(),
                req.phone_number.as_deref(),
                req.role,
                Some(&capabilities),
            )
            .await?;

        let changed = changed_fields(&before, &after);
        let mut entry = CreateAdminActivityLog::brief(
            ctx.admin_id,
            AdminAction::AdminUpdated,
            format!("Updated admin {}", after.username),
        )
        .target("admin", admin_id, &after.full_name)
        .changes(
            serde_json::json!({
                "full_name": before.full_name,
                "email": before.email,
                "phone_number": before.phone_number,
                "role": before.role,
                "capabilities": before.capabilities,
            }),
            serde_json::json!({
                "full_name": after.full_name,
                "email": after.email,
                "phone_number": after.phone_number,
                "role": after.role,
                "capabilities": after.capabilities,
            }),
            changed,
        );
        entry.ip_address = ctx.ip_address.clone();
        self.audit.create(&entry).await?;

        info!(admin_id = %ctx.admin_id, target = %admin_id, "Admin updated");
        Ok(after)
    }

    /// Toggle another admin's active status.
    ///
    /// Self-deactivation is forbidden. Deactivation cascades to every
    /// active session the target holds.
    pub async fn toggle_status(
        &self,
        ctx: &AdminContext,
        admin_id: Uuid,
    ) -> Result<AdminUser, AppError> {
        ctx.require_super_admin()?;
        ctx.require_not_self(admin_id)?;

        let admin = self
            .admins
            .find_by_id(admin_id)
            .await?
            .ok_or_else(|| AppError::not_found("Admin not found"))?;

        let updated = self.admins.set_active(admin_id, !admin.is_active).await?;

        if !updated.is_active {
            self.session_manager
                .close_all(admin_id, "Account deactivated")
                .await?;
        }

        let action = if updated.is_active {
            AdminAction::AdminReactivated
        } else {
            AdminAction::AdminDeactivated
        };
        let mut entry = CreateAdminActivityLog::brief(
            ctx.admin_id,
            action,
            format!(
                "{} admin {}",
                if updated.is_active {
                    "Reactivated"
                } else {
                    "Deactivated"
                },
                admin.username
            ),
        )
        .target("admin", admin_id, &admin.full_name);
        entry.ip_address = ctx.ip_address.clone();
        self.audit.create(&entry).await?;

        info!(
            admin_id = %ctx.admin_id,
            target = %admin_id,
            active = updated.is_active,
            "Admin status toggled"
        );
        Ok(updated)
    }

    /// Reset another admin's password. The target must change it at next
    /// login; their sessions are revoked.
    pub async fn reset_password(
        &self,
        ctx: &AdminContext,
        admin_id: Uuid,
        new_password: &str,
    ) -> Result<(), AppError> {
        ctx.require_super_admin()?;
        ctx.require_not_self(admin_id)?;

        let admin = self
            .admins
            .find_by_id(admin_id)
            .await?
            .ok_or_else(|| AppError::not_found("Admin not found"))?;

        self.validator.validate(new_password)?;
        let hash = self.hasher.hash_password(new_password)?;
        self.admins.update_password(admin_id, &hash, true).await?;

        self.session_manager
            .close_all(admin_id, "Password reset by super admin")
            .await?;

        let mut entry = CreateAdminActivityLog::brief(
            ctx.admin_id,
            AdminAction::AdminPasswordReset,
            format!("Reset password for admin {}", admin.username),
        )
        .target("admin", admin_id, &admin.full_name);
        entry.ip_address = ctx.ip_address.clone();
        self.audit.create(&entry).await?;

        info!(admin_id = %ctx.admin_id, target = %admin_id, "Admin password reset");
        Ok(())
    }
}

/// Field names that differ between two snapshots of an admin account.
fn changed_fields(before: &AdminUser, after: &AdminUser) -> Vec<String> {
    let mut changed = Vec::new();
    if before.full_name != after.full_name {
        changed.push("full_name".to_string());
    }
    if before.email != after.email {
        changed.push("email".to_string());
    }
    if before.phone_number != after.phone_number {
        changed.push("phone_number".to_string());
    }
    if before.role != after.role {
        changed.push("role".to_string());
    }
    if before.capabilities != after.capabilities {
        changed.push("capabilities".to_string());
    }
    changed
}
