//! Admin dashboard handlers.

use axum::Json;
use axum::extract::State;

use agrolink_service::dashboard::service::{DashboardOverview, VerificationStats};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthAdmin;
use crate::state::AppState;

/// GET /api/admin/dashboard
pub async fn overview(
    State(state): State<AppState>,
    auth: AuthAdmin,
) -> Result<Json<ApiResponse<DashboardOverview>>, ApiError> {
    let overview = state.dashboard_service.overview(&auth).await?;
    Ok(Json(ApiResponse::ok(overview)))
}

/// GET /api/admin/dashboard/verification-stats
pub async fn verification_stats(
    State(state): State<AppState>,
    auth: AuthAdmin,
) -> Result<Json<ApiResponse<VerificationStats>>, ApiError> {
    let stats = state.dashboard_service.verification_stats(&auth).await?;
    Ok(Json(ApiResponse::ok(stats)))
}
