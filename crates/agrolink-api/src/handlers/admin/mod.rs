//! Admin-facing handlers, mounted under `/api/admin`.

pub mod accounts;
pub mod audit;
pub mod auth;
pub mod dashboard;
pub mod moderation;
pub mod resets;
pub mod users;
pub mod verification;
