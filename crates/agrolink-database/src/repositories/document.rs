//! Verification document repository implementation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use agrolink_core::error::{AppError, ErrorKind};
use agrolink_core::result::AppResult;
use agrolink_entity::document::{DocumentStatus, VerificationDocument};

/// Repository for verification documents.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a document by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<VerificationDocument>> {
        sqlx::query_as::<_, VerificationDocument>(
            "SELECT * FROM verification_documents WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find document", e))
    }

    /// List all documents submitted by a user, newest first.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<VerificationDocument>> {
        sqlx::query_as::<_, VerificationDocument>(
            "SELECT * FROM verification_documents WHERE user_id = $1 ORDER BY uploaded_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))
    }

    /// Record a newly uploaded document inside an open transaction.
    pub async fn create_in_tx(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        document_type: &str,
        document_url: &str,
    ) -> AppResult<VerificationDocument> {
        sqlx::query_as::<_, VerificationDocument>(
            "INSERT INTO verification_documents (user_id, document_type, document_url) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(user_id)
        .bind(document_type)
        .bind(document_url)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create document", e))
    }

    /// Set one document's review outcome, stamping verifier and time.
    pub async fn review(
        &self,
        id: Uuid,
        admin_id: Uuid,
        status: DocumentStatus,
        rejection_reason: Option<&str>,
    ) -> AppResult<VerificationDocument> {
        sqlx::query_as::<_, VerificationDocument>(
            "UPDATE verification_documents SET verification_status = $3, verified_at = NOW(), \
                                               verified_by_admin_id = $2, rejection_reason = $4 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(admin_id)
        .bind(status)
        .bind(rejection_reason)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to review document", e))?
        .ok_or_else(|| AppError::not_found("Document not found"))
    }

    /// Bulk-approve every PENDING document for a user inside an open
    /// transaction (part of account approval). Returns the number updated.
    pub async fn approve_pending_in_tx(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        admin_id: Uuid,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE verification_documents \
             SET verification_status = 'APPROVED', verified_at = NOW(), verified_by_admin_id = $2 \
             WHERE user_id = $1 AND verification_status = 'PENDING'",
        )
        .bind(user_id)
        .bind(admin_id)
        .execute(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to approve pending documents", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Flag specific documents for resubmission inside an open transaction.
    pub async fn require_resubmission_in_tx(
        &self,
        conn: &mut PgConnection,
        document_ids: &[Uuid],
        admin_id: Uuid,
        reason: &str,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE verification_documents \
             SET verification_status = 'RESUBMISSION_REQUIRED', rejection_reason = $3, \
                 verified_by_admin_id = $2 \
             WHERE id = ANY($1)",
        )
        .bind(document_ids)
        .bind(admin_id)
        .bind(reason)
        .execute(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to flag documents", e)
        })?;
        Ok(result.rows_affected())
    }
}
