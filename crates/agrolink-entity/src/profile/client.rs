//! Client profile entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Profile data for a client account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClientProfile {
    /// Unique profile identifier.
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
    /// State of residence.
    pub state: String,
    /// Local government area.
    pub local_government_area: String,
    /// URL of the uploaded NIN photo, if provided.
    pub nin_photo_url: Option<String>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a client profile at registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClientProfile {
    /// The owning user.
    pub user_id: Uuid,
    /// State of residence.
    pub state: String,
    /// Local government area.
    pub local_government_area: String,
}
