//! Rating submission, aggregation, and moderation.

pub mod service;

pub use service::RatingService;
