//! Transaction repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use agrolink_core::error::{AppError, ErrorKind};
use agrolink_core::result::AppResult;
use agrolink_core::types::pagination::{PageRequest, PageResponse};
use agrolink_entity::transaction::{CreateTransaction, Transaction, TransactionStatus};

/// Repository for marketplace transactions.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    /// Create a new transaction repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a transaction by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Transaction>> {
        sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find transaction", e)
            })
    }

    /// Record a new transaction.
    pub async fn create(&self, data: &CreateTransaction) -> AppResult<Transaction> {
        sqlx::query_as::<_, Transaction>(
            "INSERT INTO transactions (client_id, member_id, product_id, service_id, amount, notes) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.client_id)
        .bind(data.member_id)
        .bind(data.product_id)
        .bind(data.service_id)
        .bind(data.amount)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create transaction", e))
    }

    /// Advance a transaction's status.
    pub async fn set_status(&self, id: Uuid, status: TransactionStatus) -> AppResult<Transaction> {
        sqlx::query_as::<_, Transaction>(
            "UPDATE transactions SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update transaction", e)
        })?
        .ok_or_else(|| AppError::not_found("Transaction not found"))
    }

    /// List transactions where the given profile is the client or member,
    /// newest first.
    pub async fn find_by_party(
        &self,
        profile_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Transaction>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM transactions WHERE client_id = $1 OR member_id = $1",
        )
        .bind(profile_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count transactions", e)
        })?;

        let transactions = sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions WHERE client_id = $1 OR member_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(profile_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list transactions", e)
        })?;

        Ok(PageResponse::new(
            transactions,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Count all transactions.
    pub async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count transactions", e)
            })
    }
}
