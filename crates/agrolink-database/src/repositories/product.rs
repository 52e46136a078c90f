//! Product listing repository implementation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use agrolink_core::error::{AppError, ErrorKind};
use agrolink_core::result::AppResult;
use agrolink_core::types::pagination::{PageRequest, PageResponse};
use agrolink_entity::listing::product::{CreateProduct, Product};
use agrolink_entity::rating::RatingAggregate;

/// Filters accepted by the product browse endpoint.
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    /// Restrict to one category label.
    pub category: Option<String>,
    /// Restrict to one member.
    pub member_id: Option<Uuid>,
    /// ILIKE search over name and description.
    pub search: Option<String>,
}

/// Repository for product listings.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a product by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find product", e))
    }

    /// Create a product listing.
    pub async fn create(&self, data: &CreateProduct) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(
            "INSERT INTO products (member_id, name, description, category, price, price_unit, \
                                   image_url, thumbnail_url) \
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
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create product", e))
    }

    /// Update a product's mutable fields.
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
    ) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(
            "UPDATE products SET name = COALESCE($2, name), \
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
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update product", e))?
        .ok_or_else(|| AppError::not_found("Product not found"))
    }

    /// Flip a listing's visibility.
    pub async fn set_active(&self, id: Uuid, active: bool) -> AppResult<()> {
        sqlx::query("UPDATE products SET is_active = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to toggle product", e)
            })?;
        Ok(())
    }

    /// Browse active products with filters and pagination.
    pub async fn browse(
        &self,
        filter: &ListingFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Product>> {
        let (where_clause, binds) = build_listing_where(filter);

        let count_sql = format!("SELECT COUNT(*) FROM products {where_clause}");
        let select_sql = format!(
            "SELECT * FROM products {where_clause} ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
            binds + 1,
            binds + 2
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, Product>(&select_sql);

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
            AppError::with_source(ErrorKind::Database, "Failed to count products", e)
        })?;

        let products = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to browse products", e)
            })?;

        Ok(PageResponse::new(
            products,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Count active product listings.
    pub async fn count_active(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_active = TRUE")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count products", e))
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
            "UPDATE products SET average_rating = $2, total_ratings = $3, updated_at = NOW() \
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

/// Build the WHERE clause for listing filters; returns (clause, bind count).
pub(crate) fn build_listing_where(filter: &ListingFilter) -> (String, u32) {
    let mut conditions = vec!["is_active = TRUE".to_string()];
    let mut param_idx = 0u32;

    if filter.category.is_some() {
        param_idx += 1;
        conditions.push(format!("category = ${param_idx}"));
    }
    if filter.member_id.is_some() {
        param_idx += 1;
        conditions.push(format!("member_id = ${param_idx}"));
    }
    if filter.search.is_some() {
        param_idx += 1;
        conditions.push(format!(
            "(name ILIKE ${param_idx} OR description ILIKE ${param_idx})"
        ));
    }

    (format!("WHERE {}", conditions.join(" AND ")), param_idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_listing_where_no_filters() {
        let (clause, binds) = build_listing_where(&ListingFilter::default());
        assert_eq!(clause, "WHERE is_active = TRUE");
        assert_eq!(binds, 0);
    }

    #[test]
    fn test_build_listing_where_all_filters() {
        let filter = ListingFilter {
            category: Some("GRAINS".into()),
            member_id: Some(Uuid::nil()),
            search: Some("maize".into()),
        };
        let (clause, binds) = build_listing_where(&filter);
        assert!(clause.contains("category = $1"));
        assert!(clause.contains("member_id = $2"));
        assert!(clause.contains("name ILIKE $3"));
        assert_eq!(binds, 3);
    }
}
