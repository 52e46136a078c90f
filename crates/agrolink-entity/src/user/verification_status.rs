//! Account verification status enumeration.
//!
//! The lifecycle a registrant moves through under admin review. Transitions
//! are driven by the verification service; this enum only answers questions
//! about individual states.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Verification status of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "verification_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    /// Freshly registered, awaiting an admin to pick up the review.
    Pending,
    /// User re-submitted documents after a rejection.
    Resubmitted,
    /// An admin is actively reviewing the submission.
    UnderReview,
    /// Account fully verified.
    Verified,
    /// Verification rejected; the user may resubmit.
    Rejected,
    /// Account suspended by an admin.
    Suspended,
}

impl VerificationStatus {
    /// Whether an admin may start a review from this state.
    pub fn review_can_start(&self) -> bool {
        matches!(self, Self::Pending | Self::Resubmitted)
    }

    /// Whether the account is waiting in the admin verification queue.
    pub fn is_awaiting_review(&self) -> bool {
        self.review_can_start()
    }

    /// Return the status as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Resubmitted => "RESUBMITTED",
            Self::UnderReview => "UNDER_REVIEW",
            Self::Verified => "VERIFIED",
            Self::Rejected => "REJECTED",
            Self::Suspended => "SUSPENDED",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = agrolink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "RESUBMITTED" => Ok(Self::Resubmitted),
            "UNDER_REVIEW" => Ok(Self::UnderReview),
            "VERIFIED" => Ok(Self::Verified),
            "REJECTED" => Ok(Self::Rejected),
            "SUSPENDED" => Ok(Self::Suspended),
            _ => Err(agrolink_core::AppError::validation(format!(
                "Invalid verification status: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_can_start() {
        assert!(VerificationStatus::Pending.review_can_start());
        assert!(VerificationStatus::Resubmitted.review_can_start());
        assert!(!VerificationStatus::Verified.review_can_start());
        assert!(!VerificationStatus::UnderReview.review_can_start());
        assert!(!VerificationStatus::Suspended.review_can_start());
    }

    #[test]
    fn test_from_str_roundtrip() {
        for status in [
            VerificationStatus::Pending,
            VerificationStatus::Resubmitted,
            VerificationStatus::UnderReview,
            VerificationStatus::Verified,
            VerificationStatus::Rejected,
            VerificationStatus::Suspended,
        ] {
            assert_eq!(status.as_str().parse::<VerificationStatus>().unwrap(), status);
        }
        assert!("DELETED".parse::<VerificationStatus>().is_err());
    }
}
