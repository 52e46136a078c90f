//! Verification document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::DocumentStatus;

/// A document submitted by a user as part of verification.
///
/// Documents are created on submission and reviewed by admins; they are
/// never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VerificationDocument {
    /// Unique document identifier.
    pub id: Uuid,
    /// The submitting user.
    pub user_id: Uuid,
    /// Kind of document (e.g. "NIN", "TRADE_CERTIFICATE").
    pub document_type: String,
    /// Public URL of the uploaded document image.
    pub document_url: String,
    /// Review status of this document.
    pub verification_status: DocumentStatus,
    /// Reason given when rejected or flagged for resubmission.
    pub rejection_reason: Option<String>,
    /// When the document was reviewed.
    pub verified_at: Option<DateTime<Utc>>,
    /// The admin who reviewed the document.
    pub verified_by_admin_id: Option<Uuid>,
    /// When the document was uploaded.
    pub uploaded_at: DateTime<Utc>,
}
