//! User session repository implementation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use agrolink_core::error::{AppError, ErrorKind};
use agrolink_core::result::AppResult;
use agrolink_entity::session::user_session::{CreateUserSession, UserSession};

/// Repository for tracked user sessions.
#[derive(Debug, Clone)]
pub struct UserSessionRepository {
    pool: PgPool,
}

impl UserSessionRepository {
    /// Create a new user session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a session for an issued token.
    pub async fn create(&self, data: &CreateUserSession) -> AppResult<UserSession> {
        sqlx::query_as::<_, UserSession>(
            "INSERT INTO user_sessions (user_id, token_hash, ip_address, user_agent, expires_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.token_hash)
        .bind(&data.ip_address)
        .bind(&data.user_agent)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create user session", e)
        })
    }

    /// Count active sessions for a user.
    pub async fn count_active(&self, user_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM user_sessions \
             WHERE user_id = $1 AND is_active = TRUE AND expires_at > NOW()",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count sessions", e))
    }

    /// Terminate every active session for a user inside an open
    /// transaction (used by account suspension). Returns the number of
    /// sessions terminated.
    pub async fn terminate_all_in_tx(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_active = FALSE, terminated_at = NOW() \
             WHERE user_id = $1 AND is_active = TRUE",
        )
        .bind(user_id)
        .execute(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to terminate user sessions", e)
        })?;
        Ok(result.rows_affected())
    }
}
