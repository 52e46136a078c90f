//! Rating repository implementation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use agrolink_core::error::{AppError, ErrorKind};
use agrolink_core::result::AppResult;
use agrolink_core::types::pagination::{PageRequest, PageResponse};
use agrolink_entity::rating::{
    CreateRating, Rating, RatingAggregate, RatingCategory, RatingStatus,
};

/// Repository for ratings.
#[derive(Debug, Clone)]
pub struct RatingRepository {
    pool: PgPool,
}

impl RatingRepository {
    /// Create a new rating repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a rating by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Rating>> {
        sqlx::query_as::<_, Rating>("SELECT * FROM ratings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find rating", e))
    }

    /// Whether this client already rated the same
    /// (member, category, product, service) combination.
    pub async fn exists_duplicate(
        &self,
        client_id: Uuid,
        member_id: Uuid,
        category: RatingCategory,
        product_id: Option<Uuid>,
        service_id: Option<Uuid>,
    ) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM ratings \
             WHERE client_id = $1 AND member_id = $2 AND rating_category = $3 \
               AND product_id IS NOT DISTINCT FROM $4 \
               AND service_id IS NOT DISTINCT FROM $5",
        )
        .bind(client_id)
        .bind(member_id)
        .bind(category)
        .bind(product_id)
        .bind(service_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check duplicate rating", e)
        })?;
        Ok(count > 0)
    }

    /// Insert a rating inside an open transaction.
    pub async fn create_in_tx(
        &self,
        conn: &mut PgConnection,
        data: &CreateRating,
    ) -> AppResult<Rating> {
        sqlx::query_as::<_, Rating>(
            "INSERT INTO ratings (client_id, member_id, rating_category, product_id, service_id, \
                                  overall_rating, quality_rating, communication_rating, \
                                  value_rating, timeliness_rating, review_title, review_text) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
        )
        .bind(data.client_id)
        .bind(data.member_id)
        .bind(data.rating_category)
        .bind(data.product_id)
        .bind(data.service_id)
        .bind(data.overall_rating)
        .bind(data.quality_rating)
        .bind(data.communication_rating)
        .bind(data.value_rating)
        .bind(data.timeliness_rating)
        .bind(&data.review_title)
        .bind(&data.review_text)
        .fetch_one(conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("idx_ratings_dedup") =>
            {
                AppError::conflict("You have already rated this")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create rating", e),
        })
    }

    /// Change a rating's moderation status inside an open transaction.
    pub async fn set_status_in_tx(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        admin_id: Uuid,
        status: RatingStatus,
    ) -> AppResult<Rating> {
        sqlx::query_as::<_, Rating>(
            "UPDATE ratings SET status = $3, moderated_by_admin_id = $2, moderated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(admin_id)
        .bind(status)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to moderate rating", e))?
        .ok_or_else(|| AppError::not_found("Rating not found"))
    }

    /// Recompute the aggregate over a member's ACTIVE ratings inside an
    /// open transaction.
    pub async fn aggregate_for_member_in_tx(
        &self,
        conn: &mut PgConnection,
        member_id: Uuid,
    ) -> AppResult<RatingAggregate> {
        let stars: Vec<i32> = sqlx::query_scalar(
            "SELECT overall_rating FROM ratings WHERE member_id = $1 AND status = 'ACTIVE'",
        )
        .bind(member_id)
        .fetch_all(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to aggregate member ratings", e)
        })?;
        Ok(RatingAggregate::from_stars(&stars))
    }

    /// Recompute the aggregate over a product's ACTIVE ratings inside an
    /// open transaction.
    pub async fn aggregate_for_product_in_tx(
        &self,
        conn: &mut PgConnection,
        product_id: Uuid,
    ) -> AppResult<RatingAggregate> {
        let stars: Vec<i32> = sqlx::query_scalar(
            "SELECT overall_rating FROM ratings WHERE product_id = $1 AND status = 'ACTIVE'",
        )
        .bind(product_id)
        .fetch_all(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to aggregate product ratings", e)
        })?;
        Ok(RatingAggregate::from_stars(&stars))
    }

    /// Recompute the aggregate over a service's ACTIVE ratings inside an
    /// open transaction.
    pub async fn aggregate_for_service_in_tx(
        &self,
        conn: &mut PgConnection,
        service_id: Uuid,
    ) -> AppResult<RatingAggregate> {
        let stars: Vec<i32> = sqlx::query_scalar(
            "SELECT overall_rating FROM ratings WHERE service_id = $1 AND status = 'ACTIVE'",
        )
        .bind(service_id)
        .fetch_all(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to aggregate service ratings", e)
        })?;
        Ok(RatingAggregate::from_stars(&stars))
    }

    /// List ACTIVE ratings received by a member, newest first.
    pub async fn find_by_member(
        &self,
        member_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Rating>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM ratings WHERE member_id = $1 AND status = 'ACTIVE'",
        )
        .bind(member_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count ratings", e))?;

        let ratings = sqlx::query_as::<_, Rating>(
            "SELECT * FROM ratings WHERE member_id = $1 AND status = 'ACTIVE' \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(member_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list ratings", e))?;

        Ok(PageResponse::new(
            ratings,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List every rating a client has given, newest first.
    pub async fn find_by_client(&self, client_id: Uuid) -> AppResult<Vec<Rating>> {
        sqlx::query_as::<_, Rating>(
            "SELECT * FROM ratings WHERE client_id = $1 ORDER BY created_at DESC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list given ratings", e))
    }

    /// Count ACTIVE ratings platform-wide.
    pub async fn count_active(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM ratings WHERE status = 'ACTIVE'")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count ratings", e))
    }
}
