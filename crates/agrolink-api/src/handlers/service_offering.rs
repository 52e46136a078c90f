//! Service offering handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use agrolink_core::types::pagination::PageResponse;
use agrolink_entity::listing::service::ServiceOffering;
use agrolink_service::listing::service::NewListing;

use super::product::ListingQuery;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/services
pub async fn browse(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ApiResponse<PageResponse<ServiceOffering>>>, ApiError> {
    let (filter, page) = query.into_parts();
    let services = state.listing_service.browse_services(filter, page).await?;
    Ok(Json(ApiResponse::ok(services)))
}

/// GET /api/services/{id}
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ServiceOffering>>, ApiError> {
    let service = state.listing_service.get_service(id).await?;
    Ok(Json(ApiResponse::ok(service)))
}

/// POST /api/services
pub async fn create_service(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<NewListing>,
) -> Result<Json<ApiResponse<ServiceOffering>>, ApiError> {
    let service = state.listing_service.create_service(&auth, req).await?;
    Ok(Json(ApiResponse::ok(service)))
}

/// PUT /api/services/{id}
pub async fn update_service(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<NewListing>,
) -> Result<Json<ApiResponse<ServiceOffering>>, ApiError> {
    let service = state.listing_service.update_service(&auth, id, req).await?;
    Ok(Json(ApiResponse::ok(service)))
}

/// DELETE /api/services/{id}
pub async fn deactivate_service(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.listing_service.deactivate_service(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Service deactivated",
    ))))
}
