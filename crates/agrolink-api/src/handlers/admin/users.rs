//! Admin user directory handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use agrolink_core::types::pagination::PageResponse;
use agrolink_database::repositories::user::UserFilter;
use agrolink_entity::user::{UserType, VerificationStatus};

use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthAdmin, PaginationParams};
use crate::state::AppState;

/// User directory query parameters.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UserQuery {
    /// Restrict to one user type.
    pub user_type: Option<UserType>,
    /// Restrict to one verification status.
    pub status: Option<VerificationStatus>,
    /// Search over name, phone, and email.
    pub search: Option<String>,
    /// Page number.
    pub page: Option<u64>,
    /// Items per page.
    pub page_size: Option<u64>,
}

/// GET /api/admin/users
pub async fn list(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Query(query): Query<UserQuery>,
) -> Result<Json<ApiResponse<PageResponse<UserResponse>>>, ApiError> {
    let page = PaginationParams {
        page: query.page,
        page_size: query.page_size,
    }
    .into_page_request();

    let users = state
        .user_service
        .list_users(
            &auth,
            UserFilter {
                user_type: query.user_type,
                status: query.status,
                search: query.search,
            },
            page,
        )
        .await?;

    Ok(Json(ApiResponse::ok(users.map(UserResponse::from))))
}

/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.get_user(&auth, id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}
