//! Member and client profile entities.

pub mod client;
pub mod member;

pub use client::ClientProfile;
pub use member::MemberProfile;
