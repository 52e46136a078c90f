//! Product listing handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use agrolink_core::types::pagination::PageResponse;
use agrolink_database::repositories::product::ListingFilter;
use agrolink_entity::listing::product::Product;
use agrolink_service::listing::service::NewListing;

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// Listing browse query parameters.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListingQuery {
    /// Restrict to one category label.
    pub category: Option<String>,
    /// Restrict to one member.
    pub member_id: Option<Uuid>,
    /// Search over name and description.
    pub search: Option<String>,
    /// Page number.
    pub page: Option<u64>,
    /// Items per page.
    pub page_size: Option<u64>,
}

impl ListingQuery {
    /// Split into filter and page request.
    pub fn into_parts(self) -> (ListingFilter, agrolink_core::types::pagination::PageRequest) {
        let page = PaginationParams {
            page: self.page,
            page_size: self.page_size,
        }
        .into_page_request();
        (
            ListingFilter {
                category: self.category,
                member_id: self.member_id,
                search: self.search,
            },
            page,
        )
    }
}

/// GET /api/products
pub async fn browse(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ApiResponse<PageResponse<Product>>>, ApiError> {
    let (filter, page) = query.into_parts();
    let products = state.listing_service.browse_products(filter, page).await?;
    Ok(Json(ApiResponse::ok(products)))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Product>>, ApiError> {
    let product = state.listing_service.get_product(id).await?;
    Ok(Json(ApiResponse::ok(product)))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<NewListing>,
) -> Result<Json<ApiResponse<Product>>, ApiError> {
    let product = state.listing_service.create_product(&auth, req).await?;
    Ok(Json(ApiResponse::ok(product)))
}

/// PUT /api/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<NewListing>,
) -> Result<Json<ApiResponse<Product>>, ApiError> {
    let product = state.listing_service.update_product(&auth, id, req).await?;
    Ok(Json(ApiResponse::ok(product)))
}

/// DELETE /api/products/{id}
pub async fn deactivate_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.listing_service.deactivate_product(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Product deactivated",
    ))))
}
