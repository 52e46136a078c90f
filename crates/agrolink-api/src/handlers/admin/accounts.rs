//! Admin account management handlers (SUPER_ADMIN only).

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use agrolink_service::admin::accounts::{CreateAdminRequest, UpdateAdminRequest};

use crate::dto::request::ResetUserPasswordRequest;
use crate::dto::response::{AdminResponse, ApiResponse, MessageResponse};
use crate::dto::validate_body;
use crate::error::ApiError;
use crate::extractors::AuthAdmin;
use crate::state::AppState;

/// GET /api/admin/admins
pub async fn list(
    State(state): State<AppState>,
    auth: AuthAdmin,
) -> Result<Json<ApiResponse<Vec<AdminResponse>>>, ApiError> {
    let admins = state.admin_account_service.list(&auth).await?;
    Ok(Json(ApiResponse::ok(
        admins.into_iter().map(AdminResponse::from).collect(),
    )))
}

/// POST /api/admin/admins
pub async fn create(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Json(req): Json<CreateAdminRequest>,
) -> Result<Json<ApiResponse<AdminResponse>>, ApiError> {
    let admin = state.admin_account_service.create(&auth, req).await?;
    Ok(Json(ApiResponse::ok(admin.into())))
}

/// PUT /api/admin/admins/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAdminRequest>,
) -> Result<Json<ApiResponse<AdminResponse>>, ApiError> {
    let admin = state.admin_account_service.update(&auth, id, req).await?;
    Ok(Json(ApiResponse::ok(admin.into())))
}

/// PUT /api/admin/admins/{id}/toggle-status
pub async fn toggle_status(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AdminResponse>>, ApiError> {
    let admin = state.admin_account_service.toggle_status(&auth, id).await?;
    Ok(Json(ApiResponse::ok(admin.into())))
}

/// PUT /api/admin/admins/{id}/password
pub async fn reset_password(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(id): Path<Uuid>,
    Json(req): Json<ResetUserPasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    validate_body(&req)?;
    state
        .admin_account_service
        .reset_password(&auth, id, &req.new_password)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Admin password reset",
    ))))
}
