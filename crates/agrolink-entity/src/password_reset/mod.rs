//! Password reset request entities.

pub mod model;

pub use model::{PasswordResetRequest, PasswordResetStatus};
