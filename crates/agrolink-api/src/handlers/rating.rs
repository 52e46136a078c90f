//! Rating handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use agrolink_core::types::pagination::PageResponse;
use agrolink_entity::rating::Rating;
use agrolink_service::rating::service::SubmitRating;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/ratings
pub async fn submit(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SubmitRating>,
) -> Result<Json<ApiResponse<Rating>>, ApiError> {
    let rating = state.rating_service.submit(&auth, req).await?;
    Ok(Json(ApiResponse::ok(rating)))
}

/// GET /api/ratings/member/{id}
pub async fn for_member(
    State(state): State<AppState>,
    Path(member_id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Rating>>>, ApiError> {
    let ratings = state
        .rating_service
        .ratings_for_member(member_id, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(ratings)))
}

/// GET /api/ratings/given
pub async fn given(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Rating>>>, ApiError> {
    let ratings = state.rating_service.ratings_given(&auth).await?;
    Ok(Json(ApiResponse::ok(ratings)))
}

/// GET /api/ratings/received
pub async fn received(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Rating>>>, ApiError> {
    let ratings = state
        .rating_service
        .ratings_received(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(ratings)))
}
