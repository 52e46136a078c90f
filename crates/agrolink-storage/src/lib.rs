//! # agrolink-storage
//!
//! Object-storage uploader for listing and document images. The core
//! capability is `upload(bytes, folder)` returning a public URL plus
//! derived thumbnail/medium variants and basic image metadata. Providers
//! cover S3-compatible storage and the local filesystem.

pub mod providers;
pub mod store;
pub mod uploader;
pub mod variants;

pub use store::ImageStore;
pub use uploader::{ImageUploader, UploadedImage};
