//! Verification state machine and the admin-mediated password reset
//! workflow.

pub mod resets;
pub mod service;

pub use resets::PasswordResetService;
pub use service::VerificationService;
