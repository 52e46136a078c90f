//! Password reset request repository implementation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use agrolink_core::error::{AppError, ErrorKind};
use agrolink_core::result::AppResult;
use agrolink_core::types::pagination::{PageRequest, PageResponse};
use agrolink_entity::password_reset::{PasswordResetRequest, PasswordResetStatus};

/// Repository for admin-mediated password reset requests.
#[derive(Debug, Clone)]
pub struct PasswordResetRepository {
    pool: PgPool,
}

impl PasswordResetRepository {
    /// Create a new password reset repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a request by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<PasswordResetRequest>> {
        sqlx::query_as::<_, PasswordResetRequest>(
            "SELECT * FROM password_reset_requests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find reset request", e))
    }

    /// File a new request expiring in 24 hours.
    pub async fn create(
        &self,
        user_id: Uuid,
        phone_number: &str,
        reason: Option<&str>,
    ) -> AppResult<PasswordResetRequest> {
        sqlx::query_as::<_, PasswordResetRequest>(
            "INSERT INTO password_reset_requests (user_id, phone_number, request_reason, expires_at) \
             VALUES ($1, $2, $3, NOW() + INTERVAL '24 hours') RETURNING *",
        )
        .bind(user_id)
        .bind(phone_number)
        .bind(reason)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create reset request", e)
        })
    }

    /// List PENDING requests, oldest first.
    pub async fn find_pending(
        &self,
        page: &PageRequest,
    ) -> AppResult<PageResponse<PasswordResetRequest>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM password_reset_requests WHERE status = 'PENDING'",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count reset requests", e)
        })?;

        let requests = sqlx::query_as::<_, PasswordResetRequest>(
            "SELECT * FROM password_reset_requests WHERE status = 'PENDING' \
             ORDER BY created_at ASC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list reset requests", e)
        })?;

        Ok(PageResponse::new(
            requests,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Count PENDING requests.
    pub async fn count_pending(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM password_reset_requests WHERE status = 'PENDING'")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count reset requests", e)
            })
    }

    /// Resolve a request inside an open transaction.
    pub async fn resolve_in_tx(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        admin_id: Uuid,
        status: PasswordResetStatus,
        temporary_password_hash: Option<&str>,
        admin_notes: Option<&str>,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE password_reset_requests \
             SET status = $3, processed_by_admin_id = $2, processed_at = NOW(), \
                 temporary_password_hash = $4, admin_notes = $5 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(admin_id)
        .bind(status)
        .bind(temporary_password_hash)
        .bind(admin_notes)
        .execute(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to resolve reset request", e)
        })?;
        Ok(())
    }
}
