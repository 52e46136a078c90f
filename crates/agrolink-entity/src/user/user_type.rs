//! User type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether an account belongs to a provider or a consumer of the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    /// A verified farmer or artisan offering products, services, or tools.
    Member,
    /// A client purchasing from members.
    Client,
}

impl UserType {
    /// Return the type as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "MEMBER",
            Self::Client => "CLIENT",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserType {
    type Err = agrolink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MEMBER" => Ok(Self::Member),
            "CLIENT" => Ok(Self::Client),
            _ => Err(agrolink_core::AppError::validation(format!(
                "Invalid user type: '{s}'. Expected one of: MEMBER, CLIENT"
            ))),
        }
    }
}
