//! Image storage configuration.

use serde::{Deserialize, Serialize};

/// Image storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Provider to use: "local" or "s3".
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Base public URL under which uploaded images are served.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Root directory for the local provider.
    #[serde(default = "default_local_root")]
    pub local_root: String,
    /// S3 bucket name.
    #[serde(default)]
    pub s3_bucket: String,
    /// S3 region.
    #[serde(default)]
    pub s3_region: String,
    /// Optional S3-compatible endpoint override (e.g. MinIO).
    #[serde(default)]
    pub s3_endpoint: Option<String>,
    /// Maximum upload size in bytes.
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8080/uploads".to_string()
}

fn default_local_root() -> String {
    "data/uploads".to_string()
}

fn default_max_upload() -> u64 {
    5 * 1024 * 1024
}
