//! Tool listing entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Whether a tool is offered for sale or for rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "tool_availability", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolAvailability {
    /// Sold outright.
    ForSale,
    /// Rented out for a period.
    ForRent,
}

/// A tool offered by a member, for sale or rent.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tool {
    /// Unique tool identifier.
    pub id: Uuid,
    /// The owning member's profile.
    pub member_id: Uuid,
    /// Tool name.
    pub name: String,
    /// Tool description.
    pub description: Option<String>,
    /// Category label (e.g. "IRRIGATION", "HAND_TOOLS").
    pub category: String,
    /// Price.
    pub price: Option<f64>,
    /// Unit the price applies to.
    pub price_unit: Option<String>,
    /// Sale or rental.
    pub availability: ToolAvailability,
    /// Rental period when rented (e.g. "weekly").
    pub rental_period: Option<String>,
    /// Main image URL.
    pub image_url: Option<String>,
    /// Derived thumbnail URL.
    pub thumbnail_url: Option<String>,
    /// Whether the listing is visible.
    pub is_active: bool,
    /// When the listing was created.
    pub created_at: DateTime<Utc>,
    /// When the listing was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a tool listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTool {
    /// The owning member's profile.
    pub member_id: Uuid,
    /// Tool name.
    pub name: String,
    /// Tool description.
    pub description: Option<String>,
    /// Category label.
    pub category: String,
    /// Price.
    pub price: Option<f64>,
    /// Unit the price applies to.
    pub price_unit: Option<String>,
    /// Sale or rental.
    pub availability: ToolAvailability,
    /// Rental period when rented.
    pub rental_period: Option<String>,
    /// Main image URL.
    pub image_url: Option<String>,
    /// Derived thumbnail URL.
    pub thumbnail_url: Option<String>,
}
