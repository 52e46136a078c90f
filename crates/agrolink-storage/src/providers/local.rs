//! Local filesystem storage provider.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;

use agrolink_core::config::StorageConfig;
use agrolink_core::error::{AppError, ErrorKind};
use agrolink_core::result::AppResult;

use crate::store::ImageStore;

/// Stores images under a local directory, served by the HTTP layer.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalImageStore {
    /// Create a local provider, ensuring the root directory exists.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.local_root);
        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create upload root '{}'", root.display()),
                e,
            )
        })?;

        tracing::info!(root = %root.display(), "Initialized local image storage");
        Ok(Self {
            root,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn put(&self, key: &str, data: Bytes, _content_type: &str) -> AppResult<()> {
        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write '{}'", path.display()),
                e,
            )
        })?;
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base_url)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(tokio::fs::metadata(&self.root).await.is_ok())
    }
}
