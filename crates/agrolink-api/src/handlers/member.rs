//! Member directory and profile handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use agrolink_core::types::pagination::PageResponse;
use agrolink_database::repositories::member_profile::MemberFilter;
use agrolink_entity::profile::client::ClientProfile;
use agrolink_entity::profile::member::MemberProfile;
use agrolink_service::user::service::{UpdateClientProfile, UpdateMemberProfile};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// Member directory query parameters.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MemberQuery {
    /// Restrict to one provider type.
    pub provider_type: Option<String>,
    /// Restrict to one state.
    pub state: Option<String>,
    /// Search over name and bio.
    pub search: Option<String>,
    /// Page number.
    pub page: Option<u64>,
    /// Items per page.
    pub page_size: Option<u64>,
}

/// GET /api/members
pub async fn browse(
    State(state): State<AppState>,
    Query(query): Query<MemberQuery>,
) -> Result<Json<ApiResponse<PageResponse<MemberProfile>>>, ApiError> {
    let page = PaginationParams {
        page: query.page,
        page_size: query.page_size,
    }
    .into_page_request();

    let members = state
        .user_service
        .browse_members(
            MemberFilter {
                provider_type: query.provider_type,
                state: query.state,
                search: query.search,
            },
            page,
        )
        .await?;

    Ok(Json(ApiResponse::ok(members)))
}

/// GET /api/members/{id}
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MemberProfile>>, ApiError> {
    let member = state.user_service.member_profile(id).await?;
    Ok(Json(ApiResponse::ok(member)))
}

/// PUT /api/members/me
pub async fn update_my_member_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateMemberProfile>,
) -> Result<Json<ApiResponse<MemberProfile>>, ApiError> {
    let profile = state.user_service.update_member_profile(&auth, req).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// PUT /api/clients/me
pub async fn update_my_client_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateClientProfile>,
) -> Result<Json<ApiResponse<ClientProfile>>, ApiError> {
    let profile = state.user_service.update_client_profile(&auth, req).await?;
    Ok(Json(ApiResponse::ok(profile)))
}
