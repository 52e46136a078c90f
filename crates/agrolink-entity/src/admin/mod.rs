//! Admin account entities.

pub mod capabilities;
pub mod model;
pub mod role;

pub use capabilities::AdminCapabilities;
pub use model::{AdminUser, CreateAdminUser};
pub use role::AdminRole;
