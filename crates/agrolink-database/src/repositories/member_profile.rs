//! Member profile repository implementation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use agrolink_core::error::{AppError, ErrorKind};
use agrolink_core::result::AppResult;
use agrolink_core::types::pagination::{PageRequest, PageResponse};
use agrolink_entity::profile::member::{CreateMemberProfile, MemberProfile};
use agrolink_entity::rating::RatingAggregate;

/// Filters accepted by the member directory.
#[derive(Debug, Clone, Default)]
pub struct MemberFilter {
    /// Restrict to one provider type.
    pub provider_type: Option<String>,
    /// Restrict to one state.
    pub state: Option<String>,
    /// ILIKE search over the member's name and bio.
    pub search: Option<String>,
}

/// Repository for member profiles.
#[derive(Debug, Clone)]
pub struct MemberProfileRepository {
    pool: PgPool,
}

impl MemberProfileRepository {
    /// Create a new member profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a profile by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MemberProfile>> {
        sqlx::query_as::<_, MemberProfile>("SELECT * FROM member_profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find member profile", e)
            })
    }

    /// Find the profile belonging to a user.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<MemberProfile>> {
        sqlx::query_as::<_, MemberProfile>("SELECT * FROM member_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find member profile", e)
            })
    }

    /// Create a profile inside the registration transaction.
    pub async fn create_in_tx(
        &self,
        conn: &mut PgConnection,
        data: &CreateMemberProfile,
    ) -> AppResult<MemberProfile> {
        sqlx::query_as::<_, MemberProfile>(
            "INSERT INTO member_profiles (user_id, provider_type, address, local_government_area, state) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.provider_type)
        .bind(&data.address)
        .bind(&data.local_government_area)
        .bind(&data.state)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create member profile", e)
        })
    }

    /// Update the mutable profile fields.
    pub async fn update(
        &self,
        user_id: Uuid,
        provider_type: Option<&str>,
        address: Option<&str>,
        local_government_area: Option<&str>,
        state: Option<&str>,
        bio: Option<&str>,
    ) -> AppResult<MemberProfile> {
        sqlx::query_as::<_, MemberProfile>(
            "UPDATE member_profiles SET provider_type = COALESCE($2, provider_type), \
                                        address = COALESCE($3, address), \
                                        local_government_area = COALESCE($4, local_government_area), \
                                        state = COALESCE($5, state), \
                                        bio = COALESCE($6, bio), \
                                        updated_at = NOW() \
             WHERE user_id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(provider_type)
        .bind(address)
        .bind(local_government_area)
        .bind(state)
        .bind(bio)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update member profile", e)
        })?
        .ok_or_else(|| AppError::not_found("Member profile not found"))
    }

    /// Browse verified members with filters and pagination.
    ///
    /// Joins on the owning user so only VERIFIED, active members appear.
    pub async fn browse(
        &self,
        filter: &MemberFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<MemberProfile>> {
        let mut conditions = vec![
            "u.verification_status = 'VERIFIED'".to_string(),
            "u.is_active = TRUE".to_string(),
        ];
        let mut param_idx = 1u32;

        if filter.provider_type.is_some() {
            conditions.push(format!("m.provider_type = ${param_idx}"));
            param_idx += 1;
        }
        if filter.state.is_some() {
            conditions.push(format!("m.state = ${param_idx}"));
            param_idx += 1;
        }
        if filter.search.is_some() {
            conditions.push(format!(
                "(u.full_name ILIKE ${param_idx} OR m.bio ILIKE ${param_idx})"
            ));
            param_idx += 1;
        }

        let where_clause = format!("WHERE {}", conditions.join(" AND "));
        let count_sql = format!(
            "SELECT COUNT(*) FROM member_profiles m JOIN users u ON u.id = m.user_id {where_clause}"
        );
        let select_sql = format!(
            "SELECT m.* FROM member_profiles m JOIN users u ON u.id = m.user_id {where_clause} \
             ORDER BY m.average_rating DESC, m.total_ratings DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, MemberProfile>(&select_sql);

        if let Some(ref pt) = filter.provider_type {
            count_query = count_query.bind(pt.clone());
            select_query = select_query.bind(pt.clone());
        }
        if let Some(ref st) = filter.state {
            count_query = count_query.bind(st.clone());
            select_query = select_query.bind(st.clone());
        }
        if let Some(ref s) = filter.search {
            let pattern = format!("%{s}%");
            count_query = count_query.bind(pattern.clone());
            select_query = select_query.bind(pattern);
        }

        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count members", e))?;

        let members = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to browse members", e))?;

        Ok(PageResponse::new(
            members,
            page.page,
            page.page_size,
            total as u64,
        ))
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
            "UPDATE member_profiles SET average_rating = $2, total_ratings = $3, \
                                        one_star_count = $4, two_star_count = $5, \
                                        three_star_count = $6, four_star_count = $7, \
                                        five_star_count = $8, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(agg.average)
        .bind(agg.total)
        .bind(agg.one_star)
        .bind(agg.two_star)
        .bind(agg.three_star)
        .bind(agg.four_star)
        .bind(agg.five_star)
        .execute(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to write rating aggregate", e)
        })?;
        Ok(())
    }
}
