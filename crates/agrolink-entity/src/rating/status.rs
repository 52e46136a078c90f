//! Rating status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Moderation state of a rating.
///
/// Only ACTIVE ratings participate in aggregate computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "rating_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RatingStatus {
    /// Visible and counted.
    Active,
    /// Hidden by a moderator; excluded from aggregates.
    Hidden,
    /// Removed by a moderator; excluded from aggregates.
    Removed,
}

impl RatingStatus {
    /// Return the status as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Hidden => "HIDDEN",
            Self::Removed => "REMOVED",
        }
    }
}

impl fmt::Display for RatingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
