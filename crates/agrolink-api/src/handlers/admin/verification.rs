//! Admin verification workflow handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use agrolink_core::types::pagination::PageResponse;
use agrolink_entity::document::VerificationDocument;
use agrolink_entity::user::UserType;

use crate::dto::request::{
    ApproveUserRequest, RejectUserRequest, RequestResubmissionRequest, SuspendUserRequest,
    VerifyDocumentRequest,
};
use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::dto::validate_body;
use crate::error::ApiError;
use crate::extractors::{AuthAdmin, PaginationParams};
use crate::state::AppState;

/// Verification queue query parameters.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct QueueQuery {
    /// Restrict to one user type.
    pub user_type: Option<UserType>,
    /// Page number.
    pub page: Option<u64>,
    /// Items per page.
    pub page_size: Option<u64>,
}

/// GET /api/admin/verification/pending
pub async fn pending(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Query(query): Query<QueueQuery>,
) -> Result<Json<ApiResponse<PageResponse<UserResponse>>>, ApiError> {
    let page = PaginationParams {
        page: query.page,
        page_size: query.page_size,
    }
    .into_page_request();

    let users = state
        .verification_service
        .pending_queue(&auth, query.user_type, page)
        .await?;

    Ok(Json(ApiResponse::ok(users.map(UserResponse::from))))
}

/// GET /api/admin/verification/under-review
pub async fn under_review(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<UserResponse>>>, ApiError> {
    let users = state
        .verification_service
        .under_review(&auth, params.into_page_request())
        .await?;

    Ok(Json(ApiResponse::ok(users.map(UserResponse::from))))
}

/// GET /api/admin/verification/{user_id}
pub async fn detail(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let (user, documents) = state.verification_service.detail(&auth, user_id).await?;

    Ok(Json(ApiResponse::ok(serde_json::json!({
        "user": UserResponse::from(user),
        "documents": documents,
    }))))
}

/// POST /api/admin/verification/{user_id}/start-review
pub async fn start_review(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.verification_service.start_review(&auth, user_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Verification review started",
    ))))
}

/// POST /api/admin/verification/{user_id}/approve
pub async fn approve(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(user_id): Path<Uuid>,
    Json(req): Json<ApproveUserRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .verification_service
        .approve(&auth, user_id, req.notes)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "User verified successfully",
    ))))
}

/// POST /api/admin/verification/{user_id}/reject
pub async fn reject(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(user_id): Path<Uuid>,
    Json(req): Json<RejectUserRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    validate_body(&req)?;
    state
        .verification_service
        .reject(&auth, user_id, &req.reason, &req.details)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "User verification rejected",
    ))))
}

/// POST /api/admin/verification/{user_id}/request-resubmission
pub async fn request_resubmission(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(user_id): Path<Uuid>,
    Json(req): Json<RequestResubmissionRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    validate_body(&req)?;
    state
        .verification_service
        .request_resubmission(&auth, user_id, &req.reason, req.document_ids)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Resubmission request sent to user",
    ))))
}

/// PUT /api/admin/verification/documents/{document_id}
pub async fn verify_document(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(document_id): Path<Uuid>,
    Json(req): Json<VerifyDocumentRequest>,
) -> Result<Json<ApiResponse<VerificationDocument>>, ApiError> {
    let document = state
        .verification_service
        .verify_document(&auth, document_id, req.status, req.rejection_reason.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(document)))
}

/// POST /api/admin/verification/{user_id}/suspend
pub async fn suspend(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(user_id): Path<Uuid>,
    Json(req): Json<SuspendUserRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    validate_body(&req)?;
    state
        .verification_service
        .suspend(&auth, user_id, &req.reason)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("User suspended"))))
}

/// POST /api/admin/verification/{user_id}/reactivate
pub async fn reactivate(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.verification_service.reactivate(&auth, user_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "User reactivated",
    ))))
}
