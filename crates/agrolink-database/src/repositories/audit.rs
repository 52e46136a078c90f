//! Admin activity log repository implementation.
//!
//! Append-only by construction: this repository exposes no update or
//! delete operations, and none exist elsewhere.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use agrolink_core::error::{AppError, ErrorKind};
use agrolink_core::result::AppResult;
use agrolink_core::types::pagination::{PageRequest, PageResponse};
use agrolink_entity::audit::{AdminAction, AdminActivityLog, CreateAdminActivityLog};

/// Repository for the admin activity log.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    /// Create a new audit log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append an entry.
    pub async fn create(&self, data: &CreateAdminActivityLog) -> AppResult<AdminActivityLog> {
        let mut conn = self.pool.acquire().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to acquire connection", e)
        })?;
        self.create_in_tx(&mut conn, data).await
    }

    /// Append an entry inside an open transaction.
    ///
    /// Verification transitions require the audit write to commit or roll
    /// back together with the status change.
    pub async fn create_in_tx(
        &self,
        conn: &mut PgConnection,
        data: &CreateAdminActivityLog,
    ) -> AppResult<AdminActivityLog> {
        sqlx::query_as::<_, AdminActivityLog>(
            "INSERT INTO admin_activity_log (admin_id, action, description, target_type, \
                                             target_id, target_name, previous_values, \
                                             new_values, changed_fields, ip_address) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(data.admin_id)
        .bind(data.action)
        .bind(&data.description)
        .bind(&data.target_type)
        .bind(data.target_id)
        .bind(&data.target_name)
        .bind(&data.previous_values)
        .bind(&data.new_values)
        .bind(&data.changed_fields)
        .bind(&data.ip_address)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to append audit entry", e))
    }

    /// Search the log with optional filters, newest first.
    pub async fn search(
        &self,
        admin_id: Option<Uuid>,
        action: Option<AdminAction>,
        target_type: Option<&str>,
        target_id: Option<Uuid>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AdminActivityLog>> {
        let mut conditions = Vec::new();
        let mut param_idx = 1u32;

        if admin_id.is_some() {
            conditions.push(format!("admin_id = ${param_idx}"));
            param_idx += 1;
        }
        if action.is_some() {
            conditions.push(format!("action = ${param_idx}"));
            param_idx += 1;
        }
        if target_type.is_some() {
            conditions.push(format!("target_type = ${param_idx}"));
            param_idx += 1;
        }
        if target_id.is_some() {
            conditions.push(format!("target_id = ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM admin_activity_log {where_clause}");
        let select_sql = format!(
            "SELECT * FROM admin_activity_log {where_clause} \
             ORDER BY created_at DESC LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, AdminActivityLog>(&select_sql);

        if let Some(aid) = admin_id {
            count_query = count_query.bind(aid);
            select_query = select_query.bind(aid);
        }
        if let Some(a) = action {
            count_query = count_query.bind(a);
            select_query = select_query.bind(a);
        }
        if let Some(tt) = target_type {
            count_query = count_query.bind(tt.to_string());
            select_query = select_query.bind(tt.to_string());
        }
        if let Some(tid) = target_id {
            count_query = count_query.bind(tid);
            select_query = select_query.bind(tid);
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count audit entries", e)
        })?;

        let entries = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to search audit log", e)
            })?;

        Ok(PageResponse::new(
            entries,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// The most recent entries, newest first.
    pub async fn recent(&self, limit: i64) -> AppResult<Vec<AdminActivityLog>> {
        sqlx::query_as::<_, AdminActivityLog>(
            "SELECT * FROM admin_activity_log ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list recent activity", e)
        })
    }
}
