//! Request extractors.

pub mod auth;
pub mod pagination;

pub use auth::{AuthAdmin, AuthUser};
pub use pagination::PaginationParams;
