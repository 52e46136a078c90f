//! Tool listing repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use agrolink_core::error::{AppError, ErrorKind};
use agrolink_core::result::AppResult;
use agrolink_core::types::pagination::{PageRequest, PageResponse};
use agrolink_entity::listing::tool::{CreateTool, Tool, ToolAvailability};

use super::product::{ListingFilter, build_listing_where};

/// Repository for tool listings.
#[derive(Debug, Clone)]
pub struct ToolRepository {
    pool: PgPool,
}

impl ToolRepository {
    /// Create a new tool repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a tool by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Tool>> {
        sqlx::query_as::<_, Tool>("SELECT * FROM tools WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find tool", e))
    }

    /// Create a tool listing.
    pub async fn create(&self, data: &CreateTool) -> AppResult<Tool> {
        sqlx::query_as::<_, Tool>(
            "INSERT INTO tools (member_id, name, description, category, price, price_unit, \
                                availability, rental_period, image_url, thumbnail_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(data.member_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.category)
        .bind(data.price)
        .bind(&data.price_unit)
        .bind(data.availability)
        .bind(&data.rental_period)
        .bind(&data.image_url)
        .bind(&data.thumbnail_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create tool", e))
    }

    /// Update a tool's mutable fields.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        category: Option<&str>,
        price: Option<f64>,
        price_unit: Option<&str>,
        availability: Option<ToolAvailability>,
        rental_period: Option<&str>,
        image_url: Option<&str>,
        thumbnail_url: Option<&str>,
    ) -> AppResult<Tool> {
        sqlx::query_as::<_, Tool>(
            "UPDATE tools SET name = COALESCE($2, name), \
                              description = COALESCE($3, description), \
                              category = COALESCE($4, category), \
                              price = COALESCE($5, price), \
                              price_unit = COALESCE($6, price_unit), \
                              availability = COALESCE($7, availability), \
                              rental_period = COALESCE($8, rental_period), \
                              image_url = COALESCE($9, image_url), \
                              thumbnail_url = COALESCE($10, thumbnail_url), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(category)
        .bind(price)
        .bind(price_unit)
        .bind(availability)
        .bind(rental_period)
        .bind(image_url)
        .bind(thumbnail_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update tool", e))?
        .ok_or_else(|| AppError::not_found("Tool not found"))
    }

    /// Flip a listing's visibility.
    pub async fn set_active(&self, id: Uuid, active: bool) -> AppResult<()> {
        sqlx::query("UPDATE tools SET is_active = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to toggle tool", e))?;
        Ok(())
    }

    /// Browse active tools with filters and pagination.
    pub async fn browse(
        &self,
        filter: &ListingFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Tool>> {
        let (where_clause, binds) = build_listing_where(filter);

        let count_sql = format!("SELECT COUNT(*) FROM tools {where_clause}");
        let select_sql = format!(
            "SELECT * FROM tools {where_clause} ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
            binds + 1,
            binds + 2
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, Tool>(&select_sql);

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

        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count tools", e))?;

        let tools = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to browse tools", e))?;

        Ok(PageResponse::new(
            tools,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Count active tool listings.
    pub async fn count_active(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tools WHERE is_active = TRUE")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count tools", e))
    }
}
