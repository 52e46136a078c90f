//! Document verification status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Verification status of an individual document.
///
/// Document-level status is finer-grained than, and independent of, the
/// parent user's account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "document_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    /// Awaiting review.
    Pending,
    /// Accepted by an admin.
    Approved,
    /// Rejected by an admin.
    Rejected,
    /// The user must upload a replacement.
    ResubmissionRequired,
}

impl DocumentStatus {
    /// Return the status as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::ResubmissionRequired => "RESUBMISSION_REQUIRED",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = agrolink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            "RESUBMISSION_REQUIRED" => Ok(Self::ResubmissionRequired),
            _ => Err(agrolink_core::AppError::validation(format!(
                "Invalid document status: '{s}'"
            ))),
        }
    }
}
