//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use agrolink_entity::document::DocumentStatus;
use agrolink_entity::rating::RatingStatus;
use agrolink_entity::transaction::TransactionStatus;

/// User login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Phone number.
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Member registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterMemberRequest {
    /// Phone number (unique).
    #[validate(length(min = 7, max = 20, message = "Phone number must be 7-20 characters"))]
    pub phone_number: String,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Full name.
    #[validate(length(min = 2, max = 120))]
    pub full_name: String,
    /// Email (optional).
    #[validate(email)]
    pub email: Option<String>,
    /// What the member provides.
    #[validate(length(min = 2, max = 60))]
    pub provider_type: String,
    /// Street address.
    pub address: Option<String>,
    /// Local government area.
    #[validate(length(min = 2, max = 80))]
    pub local_government_area: String,
    /// State of operation.
    #[validate(length(min = 2, max = 40))]
    pub state: String,
}

/// Client registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterClientRequest {
    /// Phone number (unique).
    #[validate(length(min = 7, max = 20, message = "Phone number must be 7-20 characters"))]
    pub phone_number: String,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Full name.
    #[validate(length(min = 2, max = 120))]
    pub full_name: String,
    /// Email (optional).
    #[validate(email)]
    pub email: Option<String>,
    /// State of residence.
    #[validate(length(min = 2, max = 40))]
    pub state: String,
    /// Local government area.
    #[validate(length(min = 2, max = 80))]
    pub local_government_area: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1))]
    pub current_password: String,
    /// New password.
    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Password reset request filing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RequestPasswordResetRequest {
    /// Phone number the account is registered under.
    #[validate(length(min = 7, max = 20))]
    pub phone_number: String,
    /// Why the reset is needed.
    pub reason: Option<String>,
}

/// One document in a resubmission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DocumentUploadRequest {
    /// Kind of document.
    #[validate(length(min = 2, max = 60))]
    pub document_type: String,
    /// Public URL of the uploaded image.
    #[validate(url)]
    pub document_url: String,
}

/// User-side document resubmission after rejection.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResubmitDocumentsRequest {
    /// Replacement documents.
    #[validate(length(min = 1, message = "At least one document is required"), nested)]
    pub documents: Vec<DocumentUploadRequest>,
}

/// Admin login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdminLoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Approve a user's verification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApproveUserRequest {
    /// Optional reviewer notes, captured in the audit entry.
    pub notes: Option<String>,
}

/// Reject a user's verification.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RejectUserRequest {
    /// Rejection reason.
    #[validate(length(min = 3, max = 200))]
    pub reason: String,
    /// Detailed explanation.
    #[validate(length(min = 3, max = 2000))]
    pub details: String,
}

/// Request document resubmission from a user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RequestResubmissionRequest {
    /// Why resubmission is needed.
    #[validate(length(min = 3, max = 2000))]
    pub reason: String,
    /// Specific documents to flag, if any.
    pub document_ids: Option<Vec<Uuid>>,
}

/// Review one verification document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyDocumentRequest {
    /// New document status.
    pub status: DocumentStatus,
    /// Reason when rejecting or flagging.
    pub rejection_reason: Option<String>,
}

/// Suspend a user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SuspendUserRequest {
    /// Suspension reason.
    #[validate(length(min = 3, max = 500))]
    pub reason: String,
}

/// Process a pending password reset request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProcessResetRequest {
    /// Temporary password to issue.
    #[validate(length(min = 8))]
    pub temporary_password: String,
    /// Notes for the record.
    pub admin_notes: Option<String>,
}

/// Reject a pending password reset request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RejectResetRequest {
    /// Rejection reason.
    #[validate(length(min = 3, max = 500))]
    pub reason: String,
}

/// Directly reset a user's password.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetUserPasswordRequest {
    /// New password.
    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Moderate a rating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerateRatingRequest {
    /// New moderation status.
    pub status: RatingStatus,
    /// Reason for the record.
    pub reason: Option<String>,
}

/// Advance a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceTransactionRequest {
    /// Target status.
    pub status: TransactionStatus,
}
