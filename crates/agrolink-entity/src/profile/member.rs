//! Member (farmer/artisan) profile entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Profile data for a member account.
///
/// Rating aggregates are denormalized and always recomputed from the
/// currently-ACTIVE ratings for this member, never patched incrementally.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MemberProfile {
    /// Unique profile identifier.
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
    /// What the member provides (e.g. "CROP_FARMER", "BLACKSMITH").
    pub provider_type: String,
    /// Street address.
    pub address: Option<String>,
    /// Local government area.
    pub local_government_area: String,
    /// State of operation.
    pub state: String,
    /// Free-text bio shown on the public profile.
    pub bio: Option<String>,
    /// Average of all ACTIVE overall ratings.
    pub average_rating: f32,
    /// Number of ACTIVE ratings.
    pub total_ratings: i32,
    /// Count of ACTIVE 1-star ratings.
    pub one_star_count: i32,
    /// Count of ACTIVE 2-star ratings.
    pub two_star_count: i32,
    /// Count of ACTIVE 3-star ratings.
    pub three_star_count: i32,
    /// Count of ACTIVE 4-star ratings.
    pub four_star_count: i32,
    /// Count of ACTIVE 5-star ratings.
    pub five_star_count: i32,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a member profile at registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMemberProfile {
    /// The owning user.
    pub user_id: Uuid,
    /// What the member provides.
    pub provider_type: String,
    /// Street address.
    pub address: Option<String>,
    /// Local government area.
    pub local_government_area: String,
    /// State of operation.
    pub state: String,
}
