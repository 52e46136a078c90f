//! Service offering repository implementation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use agrolink_core::error::{AppError, ErrorKind};
use agrolink_core::result::AppResult;
use agrolink_core::types::pagination::{PageRequest, PageResponse};
use agrolink_entity::listing::service::{CreateServiceOffering, ServiceOffering};
use agrolink_entity::rating::RatingAggregate;

use super::product::{ListingFilter, build_listing_where};

/// Repository for service offerings.
#[derive(Debug, Clone)]
pub struct ServiceOfferingRepository {
    pool: PgPool,
}

impl ServiceOfferingRepository {
    /// Create a new service offering repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a service by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ServiceOffering>> {
        sqlx::query_as::<_, ServiceOffering>("SELECT * FROM service_offerings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find service", e))
    }

    /// Create a service offering.
    pub async fn create(&self, data: &CreateServiceOffering) -> AppResult<ServiceOffering> {
        sqlx::query_as::<_, ServiceOffering>(
            "INSERT INTO service_offerings (member_id, name, description, category, price, \
                                            price_unit, image_url, thumbnail_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(data.member_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.category)
        .bind(data.price)
        .bind(&data.price_unit)
        .bind(&data.image_url)
        .bind(&data.thumbnail_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create service", e))
    }

    /// Update a service's mutable fields.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        category: Option<&str>,
        price: Option<f64>,
        price_unit: Option<&str>,
        image_url: Option<&str>,
        thumbnail_url: Option<&str>,
    ) -> AppResult<ServiceOffering> {
        sqlx::query_as::<_, ServiceOffering>(
            "UPDATE service_offerings SET name = COALESCE($2, name), \
                                          description = COALESCE($3, description), \
                                          category = COALESCE($4, category), \
                                          price = COALESCE($5, price), \
                                          price_unit = COALESCE($6, price_unit), \
                                          image_url = COALESCE($7, image_url), \
                                          thumbnail_url = COALESCE($8, thumbnail_url), \
                                          updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(category)
        .bind(price)
        .bind(price_unit)
        .bind(image_url)
        .bind(thumbnail_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update service", e))?
        .ok_or_else(|| AppError::not_found("Service not found"))
    }

    /// Flip a listing's visibility.
    pub async fn set_active(&self, id: Uuid, active: bool) -> AppResult<()> {
        sqlx::query("UPDATE service_offerings SET is_active = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to toggle service", e)
            })?;
        Ok(())
    }

    /// Browse active services with filters and pagination.
    pub async fn browse(
        &self,
        filter: &ListingFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ServiceOffering>> {
        let (where_clause, binds) = build_listing_where(filter);

        let count_sql = format!("SELECT COUNT(*) FROM service_offerings {where_clause}");
        let select_sql = format!(
            "SELECT * FROM service_offerings {where_clause} \
             ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
            binds + 1,
            binds + 2
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, ServiceOffering>(&select_sql);

        if let Some(ref c) = filter.category {
            count_query = count_query.bind(c.clone());
            select_query = select_query.bind(c.clone());
        }
        if let Some(m) = filter.member_id {
            count_query = count_query.bind(m);
            select_query = select_query.bind(m);
        }
        if let Some(ref s) = filter.search {
            let pattern = format!("%{s}%");
            count_query = count_query.bind(pattern.clone());
            select_query = select_query.bind(pattern);
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count services", e)
        })?;

        let services = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to browse services", e)
            })?;

        Ok(PageResponse::new(
            services,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Count active service listings.
    pub async fn count_active(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM service_offerings WHERE is_active = TRUE")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count services", e))
    }

    /// Overwrite the denormalized rating aggregates inside an open
    /// transaction.
    pub async fn write_rating_aggregate_in_tx(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        agg: &RatingAggregate,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE service_offerings SET average_rating = $2, total_ratings = $3, \
                                          updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(agg.average)
        .bind(agg.total)
        .execute(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to write rating aggregate", e)
        })?;
        Ok(())
    }
}
