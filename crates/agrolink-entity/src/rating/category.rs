//! Rating category enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What aspect of a member's offering a rating targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "rating_category", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RatingCategory {
    /// A product purchase.
    Product,
    /// A service engagement.
    Service,
    /// A tool sale or rental.
    Tool,
    /// The member overall.
    General,
}

impl RatingCategory {
    /// Return the category as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "PRODUCT",
            Self::Service => "SERVICE",
            Self::Tool => "TOOL",
            Self::General => "GENERAL",
        }
    }
}

impl fmt::Display for RatingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
