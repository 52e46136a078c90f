//! Storage provider implementations.

pub mod local;
pub mod s3;

use std::sync::Arc;

use agrolink_core::config::StorageConfig;
use agrolink_core::error::AppError;

use crate::store::ImageStore;

/// Construct the configured provider.
pub async fn from_config(config: &StorageConfig) -> Result<Arc<dyn ImageStore>, AppError> {
    match config.provider.as_str() {
        "local" => Ok(Arc::new(local::LocalImageStore::new(config).await?)),
        "s3" => Ok(Arc::new(s3::S3ImageStore::new(config).await?)),
        other => Err(AppError::configuration(format!(
            "Unknown storage provider: '{other}'. Expected one of: local, s3"
        ))),
    }
}
