//! Admin session repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use agrolink_core::error::{AppError, ErrorKind};
use agrolink_core::result::AppResult;
use agrolink_core::types::pagination::{PageRequest, PageResponse};
use agrolink_entity::session::admin_session::{AdminSession, CreateAdminSession};

/// Repository for server-tracked admin sessions.
#[derive(Debug, Clone)]
pub struct AdminSessionRepository {
    pool: PgPool,
}

impl AdminSessionRepository {
    /// Create a new admin session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a session by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AdminSession>> {
        sqlx::query_as::<_, AdminSession>("SELECT * FROM admin_sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find admin session", e)
            })
    }

    /// Open a new session row for an issued token.
    pub async fn create(&self, data: &CreateAdminSession) -> AppResult<AdminSession> {
        sqlx::query_as::<_, AdminSession>(
            "INSERT INTO admin_sessions (admin_id, token_hash, ip_address, user_agent, expires_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.admin_id)
        .bind(&data.token_hash)
        .bind(&data.ip_address)
        .bind(&data.user_agent)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create admin session", e)
        })
    }

    /// Bind the issued token's fingerprint and expiry to a freshly-opened
    /// session row.
    ///
    /// The row is created before the token so the token can carry the
    /// session id in its claims.
    pub async fn bind_token(
        &self,
        session_id: Uuid,
        token_hash: &str,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> AppResult<()> {
        sqlx::query("UPDATE admin_sessions SET token_hash = $2, expires_at = $3 WHERE id = $1")
            .bind(session_id)
            .bind(token_hash)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to bind session token", e)
            })?;
        Ok(())
    }

    /// List sessions for one admin, newest first.
    pub async fn find_by_admin(
        &self,
        admin_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AdminSession>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM admin_sessions WHERE admin_id = $1")
                .bind(admin_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count sessions", e)
                })?;

        let sessions = sqlx::query_as::<_, AdminSession>(
            "SELECT * FROM admin_sessions WHERE admin_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(admin_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list sessions", e))?;

        Ok(PageResponse::new(
            sessions,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Whether the session behind a token hash is still administratively
    /// alive and unexpired.
    pub async fn is_alive(&self, session_id: Uuid, token_hash: &str) -> AppResult<bool> {
        let alive: Option<bool> = sqlx::query_scalar(
            "SELECT is_active AND expires_at > NOW() FROM admin_sessions \
             WHERE id = $1 AND token_hash = $2",
        )
        .bind(session_id)
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check admin session", e)
        })?;
        Ok(alive.unwrap_or(false))
    }

    /// Revoke one session with a reason.
    pub async fn terminate(&self, session_id: Uuid, reason: &str) -> AppResult<()> {
        sqlx::query(
            "UPDATE admin_sessions SET is_active = FALSE, terminated_at = NOW(), \
                                       termination_reason = $2 \
             WHERE id = $1 AND is_active = TRUE",
        )
        .bind(session_id)
        .bind(reason)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to terminate session", e)
        })?;
        Ok(())
    }

    /// Revoke every active session belonging to an admin. Returns the
    /// number of sessions terminated.
    pub async fn terminate_all_for_admin(&self, admin_id: Uuid, reason: &str) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE admin_sessions SET is_active = FALSE, terminated_at = NOW(), \
                                       termination_reason = $2 \
             WHERE admin_id = $1 AND is_active = TRUE",
        )
        .bind(admin_id)
        .bind(reason)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to terminate admin sessions", e)
        })?;
        Ok(result.rows_affected())
    }
}
