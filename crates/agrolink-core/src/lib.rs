//! # agrolink-core
//!
//! Core crate for Agrolink. Contains configuration schemas,
//! pagination/sorting types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Agrolink crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
