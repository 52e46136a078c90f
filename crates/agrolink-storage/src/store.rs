//! Storage provider trait.

use async_trait::async_trait;
use bytes::Bytes;

use agrolink_core::result::AppResult;

/// Write-side capability every image storage provider implements.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Provider name for logging ("s3", "local").
    fn provider_type(&self) -> &str;

    /// Store a blob at the given key, overwriting any existing object.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()>;

    /// Public URL under which a stored key is served.
    fn public_url(&self, key: &str) -> String;

    /// Check provider availability.
    async fn health_check(&self) -> AppResult<bool>;
}
