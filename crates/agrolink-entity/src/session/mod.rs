//! Session entities for users and admins.

pub mod admin_session;
pub mod user_session;

pub use admin_session::{AdminSession, CreateAdminSession};
pub use user_session::{CreateUserSession, UserSession};
