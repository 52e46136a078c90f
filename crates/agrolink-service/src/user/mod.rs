//! User directory and profile management.

pub mod service;

pub use service::UserService;
