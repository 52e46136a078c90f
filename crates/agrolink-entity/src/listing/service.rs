//! Service offering listing entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A service offered by a member.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceOffering {
    /// Unique service identifier.
    pub id: Uuid,
    /// The owning member's profile.
    pub member_id: Uuid,
    /// Service name.
    pub name: String,
    /// Service description.
    pub description: Option<String>,
    /// Category label (e.g. "TRACTOR_HIRE", "WELDING").
    pub category: String,
    /// Base price.
    pub price: Option<f64>,
    /// Unit the price applies to (e.g. "per day").
    pub price_unit: Option<String>,
    /// Main image URL.
    pub image_url: Option<String>,
    /// Derived thumbnail URL.
    pub thumbnail_url: Option<String>,
    /// Whether the listing is visible.
    pub is_active: bool,
    /// Average of ACTIVE ratings referencing this service.
    pub average_rating: f32,
    /// Number of ACTIVE ratings referencing this service.
    pub total_ratings: i32,
    /// When the listing was created.
    pub created_at: DateTime<Utc>,
    /// When the listing was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a service offering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceOffering {
    /// The owning member's profile.
    pub member_id: Uuid,
    /// Service name.
    pub name: String,
    /// Service description.
    pub description: Option<String>,
    /// Category label.
    pub category: String,
    /// Base price.
    pub price: Option<f64>,
    /// Unit the price applies to.
    pub price_unit: Option<String>,
    /// Main image URL.
    pub image_url: Option<String>,
    /// Derived thumbnail URL.
    pub thumbnail_url: Option<String>,
}
