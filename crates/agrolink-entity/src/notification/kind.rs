//! Notification kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of notification kinds the platform emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    /// Account verification approved.
    VerificationApproved,
    /// Account verification rejected.
    VerificationRejected,
    /// Documents must be resubmitted.
    ResubmissionRequired,
    /// An admin finished a password reset.
    PasswordResetReady,
    /// Generic platform announcement (suspension, reactivation, etc.).
    SystemAnnouncement,
    /// A client left a new rating.
    NewRating,
    /// A transaction changed status.
    TransactionUpdate,
}

impl NotificationKind {
    /// Return the kind as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VerificationApproved => "VERIFICATION_APPROVED",
            Self::VerificationRejected => "VERIFICATION_REJECTED",
            Self::ResubmissionRequired => "RESUBMISSION_REQUIRED",
            Self::PasswordResetReady => "PASSWORD_RESET_READY",
            Self::SystemAnnouncement => "SYSTEM_ANNOUNCEMENT",
            Self::NewRating => "NEW_RATING",
            Self::TransactionUpdate => "TRANSACTION_UPDATE",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
