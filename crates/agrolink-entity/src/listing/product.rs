//! Product listing entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A product offered by a member.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    /// Unique product identifier.
    pub id: Uuid,
    /// The owning member's profile.
    pub member_id: Uuid,
    /// Product name.
    pub name: String,
    /// Product description.
    pub description: Option<String>,
    /// Category label (e.g. "GRAINS", "LIVESTOCK").
    pub category: String,
    /// Unit price.
    pub price: Option<f64>,
    /// Unit the price applies to (e.g. "per bag").
    pub price_unit: Option<String>,
    /// Main image URL.
    pub image_url: Option<String>,
    /// Derived thumbnail URL.
    pub thumbnail_url: Option<String>,
    /// Whether the listing is visible.
    pub is_active: bool,
    /// Average of ACTIVE ratings referencing this product.
    pub average_rating: f32,
    /// Number of ACTIVE ratings referencing this product.
    pub total_ratings: i32,
    /// When the listing was created.
    pub created_at: DateTime<Utc>,
    /// When the listing was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a product listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProduct {
    /// The owning member's profile.
    pub member_id: Uuid,
    /// Product name.
    pub name: String,
    /// Product description.
    pub description: Option<String>,
    /// Category label.
    pub category: String,
    /// Unit price.
    pub price: Option<f64>,
    /// Unit the price applies to.
    pub price_unit: Option<String>,
    /// Main image URL.
    pub image_url: Option<String>,
    /// Derived thumbnail URL.
    pub thumbnail_url: Option<String>,
}
