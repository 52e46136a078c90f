//! Transaction handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use agrolink_core::types::pagination::PageResponse;
use agrolink_entity::transaction::Transaction;
use agrolink_service::transaction::service::NewTransaction;

use crate::dto::request::AdvanceTransactionRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/transactions
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<NewTransaction>,
) -> Result<Json<ApiResponse<Transaction>>, ApiError> {
    let transaction = state.transaction_service.create(&auth, req).await?;
    Ok(Json(ApiResponse::ok(transaction)))
}

/// PUT /api/transactions/{id}/status
pub async fn advance(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<AdvanceTransactionRequest>,
) -> Result<Json<ApiResponse<Transaction>>, ApiError> {
    let transaction = state
        .transaction_service
        .advance(&auth, id, req.status)
        .await?;
    Ok(Json(ApiResponse::ok(transaction)))
}

/// GET /api/transactions
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Transaction>>>, ApiError> {
    let transactions = state
        .transaction_service
        .list_mine(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(transactions)))
}
