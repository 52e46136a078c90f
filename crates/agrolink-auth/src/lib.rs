//! # agrolink-auth
//!
//! Authentication building blocks: JWT issuing/verification in two
//! independently-keyed namespaces (users and admins), Argon2id password
//! hashing, password policy validation, the login-lockout policy, and the
//! server-tracked admin session manager.

pub mod jwt;
pub mod lockout;
pub mod password;
pub mod session;

pub use jwt::{AdminClaims, AdminTokenIssuer, UserClaims, UserTokenIssuer};
pub use lockout::LockoutPolicy;
pub use password::{PasswordHasher, PasswordValidator};
pub use session::AdminSessionManager;
