//! Image upload handler.

use axum::Json;
use axum::extract::{Multipart, Query, State};
use serde::Deserialize;

use agrolink_core::error::AppError;
use agrolink_storage::UploadedImage;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Upload query parameters.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UploadQuery {
    /// Target folder (defaults to "general").
    pub folder: Option<String>,
}

/// POST /api/upload
///
/// Multipart body with a single `file` field.
pub async fn upload(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadedImage>>, ApiError> {
    let folder = query.folder.unwrap_or_else(|| "general".to_string());
    if folder.contains("..") || folder.contains('\\') {
        return Err(AppError::validation("Invalid folder name").into());
    }

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Failed to read upload: {e}")))?;

            let uploaded = state.uploader.upload(data, &folder).await?;
            return Ok(Json(ApiResponse::ok(uploaded)));
        }
    }

    Err(AppError::validation("Missing 'file' field").into())
}
