//! S3-compatible storage provider.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;

use agrolink_core::config::StorageConfig;
use agrolink_core::error::{AppError, ErrorKind};
use agrolink_core::result::AppResult;

use crate::store::ImageStore;

/// Stores images in an S3 (or S3-compatible) bucket.
#[derive(Debug, Clone)]
pub struct S3ImageStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3ImageStore {
    /// Create an S3 provider from configuration.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        if config.s3_bucket.is_empty() {
            return Err(AppError::configuration(
                "storage.s3_bucket must be set for the s3 provider",
            ));
        }

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if !config.s3_region.is_empty() {
            loader = loader.region(aws_sdk_s3::config::Region::new(config.s3_region.clone()));
        }
        if let Some(ref endpoint) = config.s3_endpoint {
            loader = loader.endpoint_url(endpoint.clone());
        }
        let sdk_config = loader.load().await;

        tracing::info!(
            bucket = %config.s3_bucket,
            region = %config.s3_region,
            "Initialized S3 image storage"
        );

        Ok(Self {
            client: aws_sdk_s3::Client::new(&sdk_config),
            bucket: config.s3_bucket.clone(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ImageStore for S3ImageStore {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to upload '{key}' to S3"),
                    e,
                )
            })?;
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base_url)
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map(|_| true)
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "S3 health check failed", e))
    }
}
