//! User auth handlers — registration, login, refresh, self-service.

use axum::Json;
use axum::extract::State;

use agrolink_service::auth::service::{RegisterClient, RegisterMember};
use agrolink_service::verification::service::DocumentUpload;

use crate::dto::request::{
    ChangePasswordRequest, LoginRequest, RefreshRequest, RegisterClientRequest,
    RegisterMemberRequest, RequestPasswordResetRequest, ResubmitDocumentsRequest,
};
use crate::dto::response::{ApiResponse, LoginResponse, MessageResponse, UserResponse};
use crate::dto::validate_body;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register/member
pub async fn register_member(
    State(state): State<AppState>,
    Json(req): Json<RegisterMemberRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    validate_body(&req)?;

    let user = state
        .auth_service
        .register_member(RegisterMember {
            phone_number: req.phone_number,
            password: req.password,
            full_name: req.full_name,
            email: req.email,
            provider_type: req.provider_type,
            address: req.address,
            local_government_area: req.local_government_area,
            state: req.state,
        })
        .await?;

    Ok(Json(ApiResponse::ok(user.into())))
}

/// POST /api/auth/register/client
pub async fn register_client(
    State(state): State<AppState>,
    Json(req): Json<RegisterClientRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    validate_body(&req)?;

    let user = state
        .auth_service
        .register_client(RegisterClient {
            phone_number: req.phone_number,
            password: req.password,
            full_name: req.full_name,
            email: req.email,
            state: req.state,
            local_government_area: req.local_government_area,
        })
        .await?;

    Ok(Json(ApiResponse::ok(user.into())))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    validate_body(&req)?;

    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').next().unwrap_or(v).trim().to_string());
    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let result = state
        .auth_service
        .login(&req.phone_number, &req.password, ip, user_agent)
        .await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        access_token: result.tokens.access_token,
        refresh_token: result.tokens.refresh_token,
        access_expires_at: result.tokens.access_expires_at,
        refresh_expires_at: result.tokens.refresh_expires_at,
        user: result.user.into(),
    })))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let tokens = state.auth_service.refresh(&req.refresh_token).await?;

    Ok(Json(ApiResponse::ok(serde_json::json!({
        "access_token": tokens.access_token,
        "refresh_token": tokens.refresh_token,
        "access_expires_at": tokens.access_expires_at,
        "refresh_expires_at": tokens.refresh_expires_at,
    }))))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.auth_service.get_profile(auth.user_id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/auth/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    validate_body(&req)?;

    state
        .auth_service
        .change_password(auth.user_id, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Password changed successfully",
    ))))
}

/// POST /api/auth/password-reset
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(req): Json<RequestPasswordResetRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    validate_body(&req)?;

    state
        .auth_service
        .request_password_reset(&req.phone_number, req.reason.as_deref())
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Password reset request submitted. An admin will process it.",
    ))))
}

/// POST /api/auth/resubmit-documents
pub async fn resubmit_documents(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ResubmitDocumentsRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    validate_body(&req)?;

    let documents = req
        .documents
        .into_iter()
        .map(|d| DocumentUpload {
            document_type: d.document_type,
            document_url: d.document_url,
        })
        .collect();

    state
        .verification_service
        .resubmit_documents(auth.user_id, documents)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Documents resubmitted for review",
    ))))
}
