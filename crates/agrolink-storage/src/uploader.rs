//! Image upload pipeline: decode, derive variants, store, return URLs.

use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use agrolink_core::error::AppError;
use agrolink_core::result::AppResult;

use crate::store::ImageStore;
use crate::variants;

/// Result of a successful image upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedImage {
    /// Public URL of the full-size image.
    pub url: String,
    /// Public URL of the 150x150 thumbnail.
    pub thumbnail_url: String,
    /// Public URL of the width-capped medium variant.
    pub medium_url: String,
    /// Source width in pixels.
    pub width: u32,
    /// Source height in pixels.
    pub height: u32,
    /// Source size in bytes.
    pub size_bytes: u64,
    /// Source format name.
    pub format: String,
}

/// Uploads images and their derived variants to the configured store.
#[derive(Clone)]
pub struct ImageUploader {
    store: Arc<dyn ImageStore>,
    max_upload_size_bytes: u64,
}

impl std::fmt::Debug for ImageUploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUploader")
            .field("provider", &self.store.provider_type())
            .finish()
    }
}

impl ImageUploader {
    /// Creates a new uploader over the given store.
    pub fn new(store: Arc<dyn ImageStore>, max_upload_size_bytes: u64) -> Self {
        Self {
            store,
            max_upload_size_bytes,
        }
    }

    /// Upload an image into a folder, deriving thumbnail and medium
    /// variants.
    ///
    /// Variant generation is CPU-bound and runs on a blocking thread.
    pub async fn upload(&self, data: Bytes, folder: &str) -> AppResult<UploadedImage> {
        if data.len() as u64 > self.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "Upload exceeds the {} byte limit",
                self.max_upload_size_bytes
            )));
        }
        if data.is_empty() {
            return Err(AppError::validation("Empty upload"));
        }

        let size_bytes = data.len() as u64;
        let source = data.clone();
        let (decoded_meta, thumb_bytes, medium_bytes) =
            tokio::task::spawn_blocking(move || -> AppResult<_> {
                let decoded = variants::decode(&source)?;
                let thumb = variants::thumbnail(&decoded.image)?;
                let medium = variants::medium(&decoded.image)?;
                Ok(((decoded.width, decoded.height, decoded.format), thumb, medium))
            })
            .await
            .map_err(|e| AppError::internal(format!("Variant generation task panicked: {e}")))??;

        let (width, height, format) = decoded_meta;
        let id = Uuid::new_v4();
        let folder = folder.trim_matches('/');

        let original_key = format!("{folder}/{id}/original.{format}");
        let thumb_key = format!("{folder}/{id}/thumb.jpg");
        let medium_key = format!("{folder}/{id}/medium.jpg");

        let content_type = format!("image/{format}");
        self.store.put(&original_key, data, &content_type).await?;
        self.store.put(&thumb_key, thumb_bytes, "image/jpeg").await?;
        self.store
            .put(&medium_key, medium_bytes, "image/jpeg")
            .await?;

        tracing::debug!(
            folder,
            id = %id,
            width,
            height,
            size_bytes,
            "Uploaded image with variants"
        );

        Ok(UploadedImage {
            url: self.store.public_url(&original_key),
            thumbnail_url: self.store.public_url(&thumb_key),
            medium_url: self.store.public_url(&medium_key),
            width,
            height,
            size_bytes,
            format,
        })
    }
}
