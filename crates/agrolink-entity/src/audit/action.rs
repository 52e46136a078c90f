//! Closed set of auditable admin actions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::user::UserType;

/// The closed set of state-changing admin actions recorded in the
/// activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "admin_action", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminAction {
    /// Admin logged in.
    Login,
    /// Admin logged out.
    Logout,
    /// New admin account created.
    AdminCreated,
    /// Admin account updated.
    AdminUpdated,
    /// Admin account deactivated.
    AdminDeactivated,
    /// Admin account reactivated.
    AdminReactivated,
    /// Another admin's password was reset.
    AdminPasswordReset,
    /// Member verification approved.
    MemberVerificationApproved,
    /// Client verification approved.
    ClientVerificationApproved,
    /// Member verification rejected.
    MemberVerificationRejected,
    /// Client verification rejected.
    ClientVerificationRejected,
    /// Member asked to resubmit documents.
    MemberResubmissionRequested,
    /// Client asked to resubmit documents.
    ClientResubmissionRequested,
    /// An individual document was reviewed.
    DocumentReviewed,
    /// User account suspended.
    UserSuspended,
    /// User account reactivated.
    UserReactivated,
    /// A user's password was reset.
    UserPasswordReset,
    /// A rating was moderated.
    RatingModerated,
    /// Sessions were terminated in bulk.
    SessionsTerminated,
}

impl AdminAction {
    /// The approval action for the given user type.
    pub fn verification_approved(user_type: UserType) -> Self {
        match user_type {
            UserType::Member => Self::MemberVerificationApproved,
            UserType::Client => Self::ClientVerificationApproved,
        }
    }

    /// The rejection action for the given user type.
    pub fn verification_rejected(user_type: UserType) -> Self {
        match user_type {
            UserType::Member => Self::MemberVerificationRejected,
            UserType::Client => Self::ClientVerificationRejected,
        }
    }

    /// The resubmission-request action for the given user type.
    pub fn resubmission_requested(user_type: UserType) -> Self {
        match user_type {
            UserType::Member => Self::MemberResubmissionRequested,
            UserType::Client => Self::ClientResubmissionRequested,
        }
    }
}

impl fmt::Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Login => "LOGIN",
            Self::Logout => "LOGOUT",
            Self::AdminCreated => "ADMIN_CREATED",
            Self::AdminUpdated => "ADMIN_UPDATED",
            Self::AdminDeactivated => "ADMIN_DEACTIVATED",
            Self::AdminReactivated => "ADMIN_REACTIVATED",
            Self::AdminPasswordReset => "ADMIN_PASSWORD_RESET",
            Self::MemberVerificationApproved => "MEMBER_VERIFICATION_APPROVED",
            Self::ClientVerificationApproved => "CLIENT_VERIFICATION_APPROVED",
            Self::MemberVerificationRejected => "MEMBER_VERIFICATION_REJECTED",
            Self::ClientVerificationRejected => "CLIENT_VERIFICATION_REJECTED",
            Self::MemberResubmissionRequested => "MEMBER_RESUBMISSION_REQUESTED",
            Self::ClientResubmissionRequested => "CLIENT_RESUBMISSION_REQUESTED",
            Self::DocumentReviewed => "DOCUMENT_REVIEWED",
            Self::UserSuspended => "USER_SUSPENDED",
            Self::UserReactivated => "USER_REACTIVATED",
            Self::UserPasswordReset => "USER_PASSWORD_RESET",
            Self::RatingModerated => "RATING_MODERATED",
            Self::SessionsTerminated => "SESSIONS_TERMINATED",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_tagged_by_user_type() {
        assert_eq!(
            AdminAction::verification_approved(UserType::Member),
            AdminAction::MemberVerificationApproved
        );
        assert_eq!(
            AdminAction::verification_rejected(UserType::Client),
            AdminAction::ClientVerificationRejected
        );
    }
}
