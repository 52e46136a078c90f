//! Listing services for products, service offerings, and tools.

pub mod service;

pub use service::ListingService;
