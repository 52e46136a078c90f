//! HTTP middleware.

pub mod cors;
pub mod error_context;
pub mod logging;
