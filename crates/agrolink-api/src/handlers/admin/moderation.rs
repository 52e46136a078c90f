//! Content moderation handlers.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;

use agrolink_entity::rating::Rating;

use crate::dto::request::ModerateRatingRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthAdmin;
use crate::state::AppState;

/// PUT /api/admin/ratings/{id}/moderate
pub async fn moderate_rating(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(id): Path<Uuid>,
    Json(req): Json<ModerateRatingRequest>,
) -> Result<Json<ApiResponse<Rating>>, ApiError> {
    let rating = state
        .rating_service
        .moderate(&auth, id, req.status, req.reason.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(rating)))
}

/// Listing visibility body.
#[derive(Debug, Clone, Deserialize)]
pub struct SetActiveRequest {
    /// Whether the listing should be visible.
    pub active: bool,
}

/// PUT /api/admin/products/{id}/visibility
pub async fn set_product_visibility(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(id): Path<Uuid>,
    Json(req): Json<SetActiveRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .listing_service
        .moderate_product(&auth, id, req.active)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Product visibility updated",
    ))))
}
