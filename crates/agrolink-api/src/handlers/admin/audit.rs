//! Audit log search handlers.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use uuid::Uuid;

use agrolink_core::types::pagination::PageResponse;
use agrolink_entity::audit::{AdminAction, AdminActivityLog};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthAdmin, PaginationParams};
use crate::state::AppState;

/// Audit log search parameters.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuditQuery {
    /// Restrict to one acting admin.
    pub admin_id: Option<Uuid>,
    /// Restrict to one action kind.
    pub action: Option<AdminAction>,
    /// Restrict to one target type.
    pub target_type: Option<String>,
    /// Restrict to one target entity.
    pub target_id: Option<Uuid>,
    /// Page number.
    pub page: Option<u64>,
    /// Items per page.
    pub page_size: Option<u64>,
}

/// GET /api/admin/audit-log
pub async fn search(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Query(query): Query<AuditQuery>,
) -> Result<Json<ApiResponse<PageResponse<AdminActivityLog>>>, ApiError> {
    let page = PaginationParams {
        page: query.page,
        page_size: query.page_size,
    }
    .into_page_request();

    let entries = state
        .dashboard_service
        .search_audit_log(
            &auth,
            query.admin_id,
            query.action,
            query.target_type.as_deref(),
            query.target_id,
            page,
        )
        .await?;

    Ok(Json(ApiResponse::ok(entries)))
}
