//! Client profile repository implementation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use agrolink_core::error::{AppError, ErrorKind};
use agrolink_core::result::AppResult;
use agrolink_entity::profile::client::{ClientProfile, CreateClientProfile};

/// Repository for client profiles.
#[derive(Debug, Clone)]
pub struct ClientProfileRepository {
    pool: PgPool,
}

impl ClientProfileRepository {
    /// Create a new client profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a profile by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ClientProfile>> {
        sqlx::query_as::<_, ClientProfile>("SELECT * FROM client_profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find client profile", e)
            })
    }

    /// Find the profile belonging to a user.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<ClientProfile>> {
        sqlx::query_as::<_, ClientProfile>("SELECT * FROM client_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find client profile", e)
            })
    }

    /// Create a profile inside the registration transaction.
    pub async fn create_in_tx(
        &self,
        conn: &mut PgConnection,
        data: &CreateClientProfile,
    ) -> AppResult<ClientProfile> {
        sqlx::query_as::<_, ClientProfile>(
            "INSERT INTO client_profiles (user_id, state, local_government_area) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.state)
        .bind(&data.local_government_area)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create client profile", e)
        })
    }

    /// Update the mutable profile fields.
    pub async fn update(
        &self,
        user_id: Uuid,
        state: Option<&str>,
        local_government_area: Option<&str>,
        nin_photo_url: Option<&str>,
    ) -> AppResult<ClientProfile> {
        sqlx::query_as::<_, ClientProfile>(
            "UPDATE client_profiles SET state = COALESCE($2, state), \
                                        local_government_area = COALESCE($3, local_government_area), \
                                        nin_photo_url = COALESCE($4, nin_photo_url), \
                                        updated_at = NOW() \
             WHERE user_id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(state)
        .bind(local_government_area)
        .bind(nin_photo_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update client profile", e)
        })?
        .ok_or_else(|| AppError::not_found("Client profile not found"))
    }
}
