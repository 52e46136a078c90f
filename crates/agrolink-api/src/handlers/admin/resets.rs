//! Admin password reset processing handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use agrolink_core::types::pagination::PageResponse;
use agrolink_entity::password_reset::PasswordResetRequest;

use crate::dto::request::{ProcessResetRequest, RejectResetRequest, ResetUserPasswordRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::dto::validate_body;
use crate::error::ApiError;
use crate::extractors::{AuthAdmin, PaginationParams};
use crate::state::AppState;

/// GET /api/admin/password-resets
pub async fn pending(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<PasswordResetRequest>>>, ApiError> {
    let requests = state
        .password_reset_service
        .pending(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(requests)))
}

/// POST /api/admin/password-resets/{id}/process
pub async fn process(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(id): Path<Uuid>,
    Json(req): Json<ProcessResetRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    validate_body(&req)?;
    state
        .password_reset_service
        .process(&auth, id, &req.temporary_password, req.admin_notes.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Password reset processed successfully",
    ))))
}

/// POST /api/admin/password-resets/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(id): Path<Uuid>,
    Json(req): Json<RejectResetRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    validate_body(&req)?;
    state
        .password_reset_service
        .reject(&auth, id, &req.reason)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Password reset request rejected",
    ))))
}

/// PUT /api/admin/users/{id}/password
pub async fn reset_user_password(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(id): Path<Uuid>,
    Json(req): Json<ResetUserPasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    validate_body(&req)?;
    state
        .password_reset_service
        .reset_directly(&auth, id, &req.new_password)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "User password reset successfully",
    ))))
}
