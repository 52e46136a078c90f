//! Admin account repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use agrolink_core::error::{AppError, ErrorKind};
use agrolink_core::result::AppResult;
use agrolink_entity::admin::{AdminCapabilities, AdminRole, AdminUser, CreateAdminUser};

/// Repository for admin accounts.
#[derive(Debug, Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    /// Create a new admin repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an admin by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AdminUser>> {
        sqlx::query_as::<_, AdminUser>("SELECT * FROM admin_users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find admin", e))
    }

    /// Find an admin by username.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<AdminUser>> {
        sqlx::query_as::<_, AdminUser>("SELECT * FROM admin_users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find admin by username", e)
            })
    }

    /// List all admin accounts, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<AdminUser>> {
        sqlx::query_as::<_, AdminUser>("SELECT * FROM admin_users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list admins", e))
    }

    /// Create a new admin account.
    pub async fn create(&self, data: &CreateAdminUser) -> AppResult<AdminUser> {
        sqlx::query_as::<_, AdminUser>(
            "INSERT INTO admin_users (username, password_hash, full_name, email, phone_number, role, \
                                      can_verify_members, can_verify_clients, can_reset_passwords, \
                                      can_manage_content, can_manage_events, can_manage_admins, \
                                      can_export_data, can_access_reports, must_change_password, \
                                      created_by_admin_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, TRUE, $15) \
             RETURNING *",
        )
        .bind(&data.username)
        .bind(&data.password_hash)
        .bind(&data.full_name)
        .bind(&data.email)
        .bind(&data.phone_number)
        .bind(data.role)
        .bind(data.capabilities.can_verify_members)
        .bind(data.capabilities.can_verify_clients)
        .bind(data.capabilities.can_reset_passwords)
        .bind(data.capabilities.can_manage_content)
        .bind(data.capabilities.can_manage_events)
        .bind(data.capabilities.can_manage_admins)
        .bind(data.capabilities.can_export_data)
        .bind(data.capabilities.can_access_reports)
        .bind(data.created_by_admin_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("admin_users_username_key") =>
            {
                AppError::conflict(format!("Username '{}' already exists", data.username))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create admin", e),
        })
    }

    /// Update an admin's profile fields, role, and capability flags.
    pub async fn update(
        &self,
        id: Uuid,
        full_name: Option<&str>,
        email: Option<&str>,
        phone_number: Option<&str>,
        role: Option<AdminRole>,
        capabilities: Option<&AdminCapabilities>,
    ) -> AppResult<AdminUser> {
        let mut admin = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Admin not found"))?;

        if let Some(v) = full_name {
            admin.full_name = v.to_string();
        }
        if let Some(v) = email {
            admin.email = Some(v.to_string());
        }
        if let Some(v) = phone_number {
            admin.phone_number = Some(v.to_string());
        }
        if let Some(v) = role {
            admin.role = v;
        }
        if let Some(v) = capabilities {
            admin.capabilities = *v;
        }

        sqlx::query_as::<_, AdminUser>(
            "UPDATE admin_users SET full_name = $2, email = $3, phone_number = $4, role = $5, \
                                    can_verify_members = $6, can_verify_clients = $7, \
                                    can_reset_passwords = $8, can_manage_content = $9, \
                                    can_manage_events = $10, can_manage_admins = $11, \
                                    can_export_data = $12, can_access_reports = $13, \
                                    updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&admin.full_name)
        .bind(&admin.email)
        .bind(&admin.phone_number)
        .bind(admin.role)
        .bind(admin.capabilities.can_verify_members)
        .bind(admin.capabilities.can_verify_clients)
        .bind(admin.capabilities.can_reset_passwords)
        .bind(admin.capabilities.can_manage_content)
        .bind(admin.capabilities.can_manage_events)
        .bind(admin.capabilities.can_manage_admins)
        .bind(admin.capabilities.can_export_data)
        .bind(admin.capabilities.can_access_reports)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update admin", e))
    }

    /// Flip an admin's active flag, stamping deactivation time.
    pub async fn set_active(&self, id: Uuid, active: bool) -> AppResult<AdminUser> {
        sqlx::query_as::<_, AdminUser>(
            "UPDATE admin_users SET is_active = $2, \
                                    deactivated_at = CASE WHEN $2 THEN NULL ELSE NOW() END, \
                                    updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to toggle admin", e))?
        .ok_or_else(|| AppError::not_found("Admin not found"))
    }

    /// Record a failed login attempt, locking the account when the
    /// increment reaches the threshold.
    pub async fn record_failed_login(
        &self,
        id: Uuid,
        attempts: i32,
        locked_until: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE admin_users SET failed_login_attempts = $2, \
                                    locked_until = COALESCE($3, locked_until), \
                                    updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(attempts)
        .bind(locked_until)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record failed login", e)
        })?;
        Ok(())
    }

    /// Record a successful login: clears the failure counter and lock,
    /// stamps the login time, and bumps the login counter.
    pub async fn record_successful_login(&self, id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE admin_users SET failed_login_attempts = 0, locked_until = NULL, \
                                    last_login_at = NOW(), login_count = login_count + 1, \
                                    updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record successful login", e)
        })?;
        Ok(())
    }

    /// Replace the password hash; optionally clear the must-change flag.
    pub async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
        must_change_password: bool,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE admin_users SET password_hash = $2, must_change_password = $3, \
                                    failed_login_attempts = 0, locked_until = NULL, \
                                    updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .bind(must_change_password)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update admin password", e)
        })?;
        Ok(())
    }
}
