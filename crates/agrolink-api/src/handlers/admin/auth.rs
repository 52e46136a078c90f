//! Admin auth handlers — login, logout, session termination, profile.

use axum::Json;
use axum::extract::State;

use crate::dto::request::{AdminLoginRequest, ChangePasswordRequest};
use crate::dto::response::{AdminLoginResponse, AdminResponse, ApiResponse, MessageResponse};
use crate::dto::validate_body;
use crate::error::ApiError;
use crate::extractors::AuthAdmin;
use crate::state::AppState;

/// POST /api/admin/auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    Json(req): Json<AdminLoginRequest>,
) -> Result<Json<ApiResponse<AdminLoginResponse>>, ApiError> {
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
        .admin_auth_service
        .login(&req.username, &req.password, ip, user_agent)
        .await?;

    Ok(Json(ApiResponse::ok(AdminLoginResponse {
        access_token: result.token,
        expires_at: result.expires_at,
        admin: result.admin.into(),
    })))
}

/// POST /api/admin/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthAdmin,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.admin_auth_service.logout(&auth).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Logged out successfully",
    ))))
}

/// POST /api/admin/auth/terminate-sessions
pub async fn terminate_sessions(
    State(state): State<AppState>,
    auth: AuthAdmin,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let terminated = state.admin_auth_service.terminate_all_sessions(&auth).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(format!(
        "{terminated} sessions terminated"
    )))))
}

/// GET /api/admin/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthAdmin,
) -> Result<Json<ApiResponse<AdminResponse>>, ApiError> {
    let admin = state.admin_auth_service.get_profile(&auth).await?;
    Ok(Json(ApiResponse::ok(admin.into())))
}

/// PUT /api/admin/auth/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    validate_body(&req)?;

    state
        .admin_auth_service
        .change_password(&auth, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Password changed successfully",
    ))))
}
