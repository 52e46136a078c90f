//! Admin dashboard statistics and audit log access.

pub mod service;

pub use service::DashboardService;
