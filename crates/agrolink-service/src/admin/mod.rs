//! Admin-side services: authentication with revocable sessions, and
//! capability-gated admin account management.

pub mod accounts;
pub mod auth;

pub use accounts::AdminAccountService;
pub use auth::AdminAuthService;
