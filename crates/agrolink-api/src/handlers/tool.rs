//! Tool listing handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use agrolink_core::types::pagination::PageResponse;
use agrolink_entity::listing::tool::{Tool, ToolAvailability};
use agrolink_service::listing::service::NewListing;

use super::product::ListingQuery;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Tool creation/update body: the common listing fields plus
/// availability.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolBody {
    /// Common listing fields.
    #[serde(flatten)]
    pub listing: NewListing,
    /// Sale or rental.
    pub availability: ToolAvailability,
    /// Rental period when rented.
    pub rental_period: Option<String>,
}

/// GET /api/tools
pub async fn browse(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ApiResponse<PageResponse<Tool>>>, ApiError> {
    let (filter, page) = query.into_parts();
    let tools = state.listing_service.browse_tools(filter, page).await?;
    Ok(Json(ApiResponse::ok(tools)))
}

/// GET /api/tools/{id}
pub async fn get_tool(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Tool>>, ApiError> {
    let tool = state.listing_service.get_tool(id).await?;
    Ok(Json(ApiResponse::ok(tool)))
}

/// POST /api/tools
pub async fn create_tool(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ToolBody>,
) -> Result<Json<ApiResponse<Tool>>, ApiError> {
    let tool = state
        .listing_service
        .create_tool(&auth, req.listing, req.availability, req.rental_period)
        .await?;
    Ok(Json(ApiResponse::ok(tool)))
}

/// PUT /api/tools/{id}
pub async fn update_tool(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ToolBody>,
) -> Result<Json<ApiResponse<Tool>>, ApiError> {
    let tool = state
        .listing_service
        .update_tool(
            &auth,
            id,
            req.listing,
            Some(req.availability),
            req.rental_period,
        )
        .await?;
    Ok(Json(ApiResponse::ok(tool)))
}

/// DELETE /api/tools/{id}
pub async fn deactivate_tool(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.listing_service.deactivate_tool(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Tool deactivated",
    ))))
}
