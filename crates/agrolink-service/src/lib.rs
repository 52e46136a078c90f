//! # agrolink-service
//!
//! Business services carrying the domain logic: registration and login
//! flows, the admin verification state machine, capability-gated admin
//! account management, rating aggregation and moderation, notifications,
//! listings, transactions, and dashboard statistics.

pub mod admin;
pub mod auth;
pub mod context;
pub mod dashboard;
pub mod listing;
pub mod notification;
pub mod rating;
pub mod transaction;
pub mod user;
pub mod verification;

pub use context::{AdminContext, RequestContext};
