//! User repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use agrolink_core::error::{AppError, ErrorKind};
use agrolink_core::result::AppResult;
use agrolink_core::types::pagination::{PageRequest, PageResponse};
use agrolink_entity::user::{CreateUser, User, UserType, VerificationStatus};

/// Filters accepted by the user directory listing.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Restrict to one user type.
    pub user_type: Option<UserType>,
    /// Restrict to one verification status.
    pub status: Option<VerificationStatus>,
    /// ILIKE search over name, phone, and email.
    pub search: Option<String>,
}

/// Repository for user accounts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by phone number.
    pub async fn find_by_phone(&self, phone_number: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE phone_number = $1")
            .bind(phone_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by phone", e)
            })
    }

    /// Create a new user inside an open transaction.
    ///
    /// Registration creates the user together with its profile row, so the
    /// insert must be composable into the caller's transaction.
    pub async fn create_in_tx(&self, conn: &mut PgConnection, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (phone_number, password_hash, full_name, email, user_type, \
                                verification_status, verification_submitted_at) \
             VALUES ($1, $2, $3, $4, $5, 'PENDING', NOW()) \
             RETURNING *",
        )
        .bind(&data.phone_number)
        .bind(&data.password_hash)
        .bind(&data.full_name)
        .bind(&data.email)
        .bind(data.user_type)
        .fetch_one(conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("users_phone_number_key") =>
            {
                AppError::conflict("Phone number is already registered")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// List users with optional filters and pagination.
    pub async fn find_all(
        &self,
        filter: &UserFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        let mut conditions = Vec::new();
        let mut param_idx = 1u32;

        if filter.user_type.is_some() {
            conditions.push(format!("user_type = ${param_idx}"));
            param_idx += 1;
        }
        if filter.status.is_some() {
            conditions.push(format!("verification_status = ${param_idx}"));
            param_idx += 1;
        }
        if filter.search.is_some() {
            conditions.push(format!(
                "(full_name ILIKE ${param_idx} OR phone_number ILIKE ${param_idx} OR email ILIKE ${param_idx})"
            ));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM users {where_clause}");
        let select_sql = format!(
            "SELECT * FROM users {where_clause} ORDER BY created_at DESC LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, User>(&select_sql);

        if let Some(ut) = filter.user_type {
            count_query = count_query.bind(ut);
            select_query = select_query.bind(ut);
        }
        if let Some(st) = filter.status {
            count_query = count_query.bind(st);
            select_query = select_query.bind(st);
        }
        if let Some(ref s) = filter.search {
            let pattern = format!("%{s}%");
            count_query = count_query.bind(pattern.clone());
            select_query = select_query.bind(pattern);
        }

        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;

        let users = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))?;

        Ok(PageResponse::new(
            users,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List users waiting in the verification queue (PENDING or
    /// RESUBMITTED), oldest submission first.
    pub async fn find_awaiting_review(
        &self,
        user_type: Option<UserType>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        let filter_sql = if user_type.is_some() {
            " AND user_type = $3"
        } else {
            ""
        };

        let count_sql = format!(
            "SELECT COUNT(*) FROM users \
             WHERE verification_status IN ('PENDING', 'RESUBMITTED'){}",
            if user_type.is_some() { " AND user_type = $1" } else { "" }
        );
        let select_sql = format!(
            "SELECT * FROM users \
             WHERE verification_status IN ('PENDING', 'RESUBMITTED'){filter_sql} \
             ORDER BY verification_submitted_at ASC NULLS LAST LIMIT $1 OFFSET $2"
        );

        let total: i64 = if let Some(ut) = user_type {
            sqlx::query_scalar(&count_sql).bind(ut).fetch_one(&self.pool).await
        } else {
            sqlx::query_scalar(&count_sql).fetch_one(&self.pool).await
        }
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count verification queue", e)
        })?;

        let mut select_query = sqlx::query_as::<_, User>(&select_sql)
            .bind(page.limit() as i64)
            .bind(page.offset() as i64);
        if let Some(ut) = user_type {
            select_query = select_query.bind(ut);
        }

        let users = select_query.fetch_all(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list verification queue", e)
        })?;

        Ok(PageResponse::new(
            users,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List users currently under review, most recently started first.
    pub async fn find_under_review(&self, page: &PageRequest) -> AppResult<PageResponse<User>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE verification_status = 'UNDER_REVIEW'",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count users under review", e)
        })?;

        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE verification_status = 'UNDER_REVIEW' \
             ORDER BY verification_started_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list users under review", e)
        })?;

        Ok(PageResponse::new(
            users,
            page.page,
            page.page_size,
            total as u64,
        ))
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
            "UPDATE users SET failed_login_attempts = $2, \
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
            "UPDATE users SET failed_login_attempts = 0, locked_until = NULL, \
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

    /// Replace the password hash.
    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update password", e)
            })?;
        Ok(())
    }

    /// Replace the password hash and clear lockout state, inside an open
    /// transaction (admin-driven reset).
    pub async fn reset_password_in_tx(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        password_hash: &str,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET password_hash = $2, failed_login_attempts = 0, \
                              locked_until = NULL, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reset password", e))?;
        Ok(())
    }

    /// Move a user into UNDER_REVIEW, stamping start time and acting admin.
    pub async fn mark_under_review(&self, id: Uuid, admin_id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET verification_status = 'UNDER_REVIEW', \
                              verification_started_at = NOW(), \
                              verified_by_admin_id = $2, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(admin_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to start review", e))?;
        Ok(())
    }

    /// Mark a user VERIFIED inside an open transaction, clearing rejection
    /// fields and stamping verification metadata.
    pub async fn approve_in_tx(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        admin_id: Uuid,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET verification_status = 'VERIFIED', verified_at = NOW(), \
                              verified_by_admin_id = $2, rejection_reason = NULL, \
                              rejection_details = NULL, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(admin_id)
        .execute(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to approve user", e))?;
        Ok(())
    }

    /// Mark a user REJECTED inside an open transaction, recording the
    /// reason and details.
    pub async fn reject_in_tx(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        admin_id: Uuid,
        reason: &str,
        details: Option<&str>,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET verification_status = 'REJECTED', rejection_reason = $3, \
                              rejection_details = $4, verified_by_admin_id = $2, \
                              updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(admin_id)
        .bind(reason)
        .bind(details)
        .execute(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reject user", e))?;
        Ok(())
    }

    /// Suspend a user inside an open transaction.
    pub async fn suspend_in_tx(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        admin_id: Uuid,
        reason: &str,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET verification_status = 'SUSPENDED', is_active = FALSE, \
                              suspended_at = NOW(), suspended_reason = $3, \
                              suspended_by_admin_id = $2, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(admin_id)
        .bind(reason)
        .execute(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to suspend user", e))?;
        Ok(())
    }

    /// Reactivate a suspended user inside an open transaction.
    ///
    /// Always lands in VERIFIED, matching the admin workflow.
    pub async fn reactivate_in_tx(&self, conn: &mut PgConnection, id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET verification_status = 'VERIFIED', is_active = TRUE, \
                              suspended_at = NULL, suspended_reason = NULL, \
                              suspended_by_admin_id = NULL, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .execute(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reactivate user", e))?;
        Ok(())
    }

    /// Move a rejected user back to RESUBMITTED after new documents arrive.
    pub async fn mark_resubmitted_in_tx(&self, conn: &mut PgConnection, id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET verification_status = 'RESUBMITTED', \
                              verification_submitted_at = NOW(), \
                              resubmission_count = resubmission_count + 1, \
                              updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .execute(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark resubmitted", e))?;
        Ok(())
    }

    /// Update name/email profile fields.
    pub async fn update_contact(
        &self,
        id: Uuid,
        full_name: Option<&str>,
        email: Option<&str>,
    ) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET full_name = COALESCE($2, full_name), \
                              email = COALESCE($3, email), updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(full_name)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user", e))?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Count users matching an optional type and status.
    pub async fn count(
        &self,
        user_type: Option<UserType>,
        status: Option<VerificationStatus>,
    ) -> AppResult<i64> {
        let sql = match (user_type.is_some(), status.is_some()) {
            (true, true) => {
                "SELECT COUNT(*) FROM users WHERE user_type = $1 AND verification_status = $2"
            }
            (true, false) => "SELECT COUNT(*) FROM users WHERE user_type = $1",
            (false, true) => "SELECT COUNT(*) FROM users WHERE verification_status = $1",
            (false, false) => "SELECT COUNT(*) FROM users",
        };

        let mut query = sqlx::query_scalar::<_, i64>(sql);
        if let Some(ut) = user_type {
            query = query.bind(ut);
        }
        if let Some(st) = status {
            query = query.bind(st);
        }

        query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))
    }

    /// Count users awaiting review (PENDING or RESUBMITTED).
    pub async fn count_awaiting_review(&self) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE verification_status IN ('PENDING', 'RESUBMITTED')",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count awaiting review", e)
        })
    }

    /// Count users registered at or after the given instant.
    pub async fn count_registered_since(&self, since: DateTime<Utc>) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE created_at >= $1")
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count registrations", e)
            })
    }

    /// Per-status user counts, optionally restricted to one user type.
    pub async fn status_breakdown(
        &self,
        user_type: Option<UserType>,
    ) -> AppResult<Vec<(VerificationStatus, i64)>> {
        let sql = if user_type.is_some() {
            "SELECT verification_status, COUNT(*) FROM users WHERE user_type = $1 \
             GROUP BY verification_status"
        } else {
            "SELECT verification_status, COUNT(*) FROM users GROUP BY verification_status"
        };

        let mut query = sqlx::query_as::<_, (VerificationStatus, i64)>(sql);
        if let Some(ut) = user_type {
            query = query.bind(ut);
        }

        query.fetch_all(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to compute status breakdown", e)
        })
    }

    /// Average hours between submission and verification for users
    /// verified since the given instant.
    pub async fn average_verification_hours(&self, since: DateTime<Utc>) -> AppResult<f64> {
        let avg: Option<f64> = sqlx::query_scalar(
            "SELECT AVG(EXTRACT(EPOCH FROM (verified_at - verification_submitted_at)) / 3600.0)\
             ::double precision \
             FROM users \
             WHERE verification_status = 'VERIFIED' AND verified_at >= $1 \
               AND verification_submitted_at IS NOT NULL",
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to compute average verification time",
                e,
            )
        })?;
        Ok(avg.unwrap_or(0.0))
    }

    /// The most recent registrations, newest first.
    pub async fn recent(&self, limit: i64) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC LIMIT $1")
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list recent users", e)
            })
    }
}
