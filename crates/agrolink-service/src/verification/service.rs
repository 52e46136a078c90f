//! The verification state machine.
//!
//! Owns the lifecycle of a registrant's trust status:
//! PENDING / RESUBMITTED -> UNDER_REVIEW -> VERIFIED | REJECTED, with
//! SUSPENDED reachable from anywhere and REJECTED re-enterable via user
//! resubmission. Every admin-driven transition commits its status change,
//! document updates, notification, and audit entry in one transaction —
//! a failure in any sub-step rolls the whole transition back.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use agrolink_core::error::AppError;
use agrolink_core::types::pagination::{PageRequest, PageResponse};
use agrolink_database::repositories::audit::AuditLogRepository;
use agrolink_database::repositories::document::DocumentRepository;
use agrolink_database::repositories::notification::NotificationRepository;
use agrolink_database::repositories::user::UserRepository;
use agrolink_database::repositories::user_session::UserSessionRepository;
use agrolink_entity::audit::{AdminAction, CreateAdminActivityLog};
use agrolink_entity::document::{DocumentStatus, VerificationDocument};
use agrolink_entity::notification::{CreateNotification, NotificationKind};
use agrolink_entity::user::{User, UserType, VerificationStatus};

use crate::context::AdminContext;

/// Fixed rejection reason marker used when resubmission is requested.
const RESUBMISSION_REASON: &str = "Resubmission Required";

/// A document uploaded during user-side resubmission.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DocumentUpload {
    /// Kind of document.
    pub document_type: String,
    /// Public URL of the uploaded image.
    pub document_url: String,
}

/// Drives verification status transitions for user accounts.
#[derive(Debug, Clone)]
pub struct VerificationService {
    pool: PgPool,
    users: Arc<UserRepository>,
    documents: Arc<DocumentRepository>,
    notifications: Arc<NotificationRepository>,
    audit: Arc<AuditLogRepository>,
    user_sessions: Arc<UserSessionRepository>,
}

impl VerificationService {
    /// Creates a new verification service.
    pub fn new(
        pool: PgPool,
        users: Arc<UserRepository>,
        documents: Arc<DocumentRepository>,
        notifications: Arc<NotificationRepository>,
        audit: Arc<AuditLogRepository>,
        user_sessions: Arc<UserSessionRepository>,
    ) -> Self {
        Self {
            pool,
            users,
            documents,
            notifications,
            audit,
            user_sessions,
        }
    }

    /// The queue of users awaiting review (PENDING or RESUBMITTED),
    /// oldest submission first.
    pub async fn pending_queue(
        &self,
        ctx: &AdminContext,
        user_type: Option<UserType>,
        page: PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        match user_type {
            Some(ut) => ctx.require_verify(ut)?,
            None => {
                if !ctx.capabilities.can_verify_members && !ctx.capabilities.can_verify_clients {
                    return Err(AppError::forbidden(
                        "You are not permitted to review verifications",
                    ));
                }
            }
        }
        self.users.find_awaiting_review(user_type, &page).await
    }

    /// Users currently under review, most recently started first.
    pub async fn under_review(
        &self,
        ctx: &AdminContext,
        page: PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        if !ctx.capabilities.can_verify_members && !ctx.capabilities.can_verify_clients {
            return Err(AppError::forbidden(
                "You are not permitted to review verifications",
            ));
        }
        self.users.find_under_review(&page).await
    }

    /// Full verification detail for one user: the account plus all of
    /// its submitted documents.
    pub async fn detail(
        &self,
        ctx: &AdminContext,
        user_id: Uuid,
    ) -> Result<(User, Vec<VerificationDocument>), AppError> {
        let user = self.load_user(user_id).await?;
        ctx.require_verify(user.user_type)?;
        let documents = self.documents.find_by_user(user_id).await?;
        Ok((user, documents))
    }

    /// Start reviewing a user.
    ///
    /// Legal only from PENDING or RESUBMITTED; any other source state is a
    /// state conflict reporting the current status.
    pub async fn start_review(&self, ctx: &AdminContext, user_id: Uuid) -> Result<(), AppError> {
        let user = self.load_user(user_id).await?;
        ctx.require_verify(user.user_type)?;

        if !user.verification_status.review_can_start() {
            return Err(AppError::state_conflict(format!(
                "Cannot start review. Current status: {}",
                user.verification_status
            )));
        }

        self.users.mark_under_review(user_id, ctx.admin_id).await?;

        info!(
            admin_id = %ctx.admin_id,
            user_id = %user_id,
            "Verification review started"
        );
        Ok(())
    }

    /// Approve a user's verification.
    ///
    /// Deliberately guard-free on the source state: an already-VERIFIED or
    /// even SUSPENDED user can be (re-)approved. Atomically sets VERIFIED,
    /// clears rejection fields, bulk-approves all PENDING documents, and
    /// writes the notification and audit rows.
    pub async fn approve(
        &self,
        ctx: &AdminContext,
        user_id: Uuid,
        notes: Option<String>,
    ) -> Result<(), AppError> {
        let user = self.load_user(user_id).await?;
        ctx.require_verify(user.user_type)?;

        let mut tx = self.begin().await?;

        self.users
            .approve_in_tx(tx.as_mut(), user_id, ctx.admin_id)
            .await?;

        let approved_docs = self
            .documents
            .approve_pending_in_tx(tx.as_mut(), user_id, ctx.admin_id)
            .await?;

        self.notifications
            .create_in_tx(
                tx.as_mut(),
                &CreateNotification {
                    user_id,
                    kind: NotificationKind::VerificationApproved,
                    title: "🎉 Account Verified!".to_string(),
                    message: "Your account has been verified successfully. You now have full \
                              access to all platform features."
                        .to_string(),
                    payload: None,
                },
            )
            .await?;

        let mut entry = CreateAdminActivityLog::brief(
            ctx.admin_id,
            AdminAction::verification_approved(user.user_type),
            format!(
                "Approved {} verification for {} ({})",
                user.user_type.as_str().to_lowercase(),
                user.full_name,
                user.phone_number
            ),
        )
        .target("user", user_id, &user.full_name);
        entry.ip_address = ctx.ip_address.clone();
        if let Some(ref notes) = notes {
            entry.new_values = Some(serde_json::json!({ "notes": notes }));
        }
        self.audit.create_in_tx(tx.as_mut(), &entry).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit approval: {e}")))?;

        info!(
            admin_id = %ctx.admin_id,
            user_id = %user_id,
            approved_docs,
            "User verification approved"
        );
        Ok(())
    }

    /// Reject a user's verification, recording the reason and details.
    pub async fn reject(
        &self,
        ctx: &AdminContext,
        user_id: Uuid,
        reason: &str,
        details: &str,
    ) -> Result<(), AppError> {
        let user = self.load_user(user_id).await?;
        ctx.require_verify(user.user_type)?;

        let mut tx = self.begin().await?;

        self.users
            .reject_in_tx(tx.as_mut(), user_id, ctx.admin_id, reason, Some(details))
            .await?;

        self.notifications
            .create_in_tx(
                tx.as_mut(),
                &CreateNotification {
                    user_id,
                    kind: NotificationKind::VerificationRejected,
                    title: "Verification Not Approved".to_string(),
                    message: format!(
                        "Your verification was not approved. Reason: {reason}. Details: \
                         {details}. You may resubmit with corrected information."
                    ),
                    payload: None,
                },
            )
            .await?;

        let mut entry = CreateAdminActivityLog::brief(
            ctx.admin_id,
            AdminAction::verification_rejected(user.user_type),
            format!(
                "Rejected {} verification for {}: {reason}",
                user.user_type.as_str().to_lowercase(),
                user.full_name
            ),
        )
        .target("user", user_id, &user.full_name);
        entry.ip_address = ctx.ip_address.clone();
        entry.new_values = Some(serde_json::json!({ "reason": reason, "details": details }));
        self.audit.create_in_tx(tx.as_mut(), &entry).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit rejection: {e}")))?;

        info!(admin_id = %ctx.admin_id, user_id = %user_id, "User verification rejected");
        Ok(())
    }

    /// Ask the user to resubmit documents.
    ///
    /// Lands in REJECTED with the fixed "Resubmission Required" marker;
    /// listed documents are individually flagged with the same reason.
    pub async fn request_resubmission(
        &self,
        ctx: &AdminContext,
        user_id: Uuid,
        reason: &str,
        document_ids: Option<Vec<Uuid>>,
    ) -> Result<(), AppError> {
        let user = self.load_user(user_id).await?;
        ctx.require_verify(user.user_type)?;

        let mut tx = self.begin().await?;

        self.users
            .reject_in_tx(
                tx.as_mut(),
                user_id,
                ctx.admin_id,
                RESUBMISSION_REASON,
                Some(reason),
            )
            .await?;

        if let Some(ref ids) = document_ids {
            if !ids.is_empty() {
                self.documents
                    .require_resubmission_in_tx(tx.as_mut(), ids, ctx.admin_id, reason)
                    .await?;
            }
        }

        let payload = document_ids
            .as_ref()
            .map(|ids| serde_json::json!({ "documentIds": ids }));
        self.notifications
            .create_in_tx(
                tx.as_mut(),
                &CreateNotification {
                    user_id,
                    kind: NotificationKind::ResubmissionRequired,
                    title: "Document Resubmission Required".to_string(),
                    message: format!(
                        "Please resubmit your verification documents. Reason: {reason}"
                    ),
                    payload,
                },
            )
            .await?;

        let mut entry = CreateAdminActivityLog::brief(
            ctx.admin_id,
            AdminAction::resubmission_requested(user.user_type),
            format!("Requested document resubmission from {}", user.full_name),
        )
        .target("user", user_id, &user.full_name);
        entry.ip_address = ctx.ip_address.clone();
        self.audit.create_in_tx(tx.as_mut(), &entry).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit resubmission request: {e}")))?;

        info!(admin_id = %ctx.admin_id, user_id = %user_id, "Resubmission requested");
        Ok(())
    }

    /// Review one document independently of the parent user's status.
    pub async fn verify_document(
        &self,
        ctx: &AdminContext,
        document_id: Uuid,
        status: DocumentStatus,
        rejection_reason: Option<&str>,
    ) -> Result<VerificationDocument, AppError> {
        let doc = self
            .documents
            .find_by_id(document_id)
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))?;
        let owner = self.load_user(doc.user_id).await?;
        ctx.require_verify(owner.user_type)?;

        let updated = self
            .documents
            .review(document_id, ctx.admin_id, status, rejection_reason)
            .await?;

        let mut entry = CreateAdminActivityLog::brief(
            ctx.admin_id,
            AdminAction::DocumentReviewed,
            format!(
                "Marked {} document of {} as {status}",
                doc.document_type, owner.full_name
            ),
        )
        .target("document", document_id, &doc.document_type);
        entry.ip_address = ctx.ip_address.clone();
        self.audit.create(&entry).await?;

        Ok(updated)
    }

    /// Suspend a user from any status.
    ///
    /// Sets SUSPENDED and `is_active = false`, terminates all of the
    /// user's active sessions, notifies, and audits — one transaction.
    pub async fn suspend(
        &self,
        ctx: &AdminContext,
        user_id: Uuid,
        reason: &str,
    ) -> Result<(), AppError> {
        let user = self.load_user(user_id).await?;
        ctx.require_verify(user.user_type)?;

        let mut tx = self.begin().await?;

        self.users
            .suspend_in_tx(tx.as_mut(), user_id, ctx.admin_id, reason)
            .await?;

        let terminated = self
            .user_sessions
            .terminate_all_in_tx(tx.as_mut(), user_id)
            .await?;

        self.notifications
            .create_in_tx(
                tx.as_mut(),
                &CreateNotification {
                    user_id,
                    kind: NotificationKind::SystemAnnouncement,
                    title: "Account Suspended".to_string(),
                    message: format!(
                        "Your account has been suspended. Reason: {reason}. Contact admin for \
                         more information."
                    ),
                    payload: None,
                },
            )
            .await?;

        let mut entry = CreateAdminActivityLog::brief(
            ctx.admin_id,
            AdminAction::UserSuspended,
            format!("Suspended user {}: {reason}", user.full_name),
        )
        .target("user", user_id, &user.full_name);
        entry.ip_address = ctx.ip_address.clone();
        entry.previous_values =
            Some(serde_json::json!({ "verification_status": user.verification_status }));
        entry.new_values =
            Some(serde_json::json!({ "verification_status": VerificationStatus::Suspended }));
        entry.changed_fields = Some(vec![
            "verification_status".to_string(),
            "is_active".to_string(),
        ]);
        self.audit.create_in_tx(tx.as_mut(), &entry).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit suspension: {e}")))?;

        info!(
            admin_id = %ctx.admin_id,
            user_id = %user_id,
            terminated_sessions = terminated,
            "User suspended"
        );
        Ok(())
    }

    /// Reactivate a suspended user.
    ///
    /// Always lands in VERIFIED regardless of the pre-suspension status,
    /// matching the established admin workflow.
    pub async fn reactivate(&self, ctx: &AdminContext, user_id: Uuid) -> Result<(), AppError> {
        let user = self.load_user(user_id).await?;
        ctx.require_verify(user.user_type)?;

        let mut tx = self.begin().await?;

        self.users.reactivate_in_tx(tx.as_mut(), user_id).await?;

        self.notifications
            .create_in_tx(
                tx.as_mut(),
                &CreateNotification {
                    user_id,
                    kind: NotificationKind::SystemAnnouncement,
                    title: "Account Reactivated".to_string(),
                    message: "Your account has been reactivated. You can now access all \
                              platform features."
                        .to_string(),
                    payload: None,
                },
            )
            .await?;

        let mut entry = CreateAdminActivityLog::brief(
            ctx.admin_id,
            AdminAction::UserReactivated,
            format!("Reactivated user {}", user.full_name),
        )
        .target("user", user_id, &user.full_name);
        entry.ip_address = ctx.ip_address.clone();
        self.audit.create_in_tx(tx.as_mut(), &entry).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit reactivation: {e}")))?;

        info!(admin_id = %ctx.admin_id, user_id = %user_id, "User reactivated");
        Ok(())
    }

    /// User-side resubmission after a rejection.
    ///
    /// Uploads replacement documents and moves the account to RESUBMITTED,
    /// bumping the resubmission counter.
    pub async fn resubmit_documents(
        &self,
        user_id: Uuid,
        documents: Vec<DocumentUpload>,
    ) -> Result<(), AppError> {
        let user = self.load_user(user_id).await?;

        if user.verification_status != VerificationStatus::Rejected {
            return Err(AppError::state_conflict(format!(
                "Resubmission is only possible after rejection. Current status: {}",
                user.verification_status
            )));
        }
        if documents.is_empty() {
            return Err(AppError::validation("At least one document is required"));
        }

        let mut tx = self.begin().await?;

        for doc in &documents {
            self.documents
                .create_in_tx(tx.as_mut(), user_id, &doc.document_type, &doc.document_url)
                .await?;
        }

        self.users.mark_resubmitted_in_tx(tx.as_mut(), user_id).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit resubmission: {e}")))?;

        info!(user_id = %user_id, count = documents.len(), "Documents resubmitted");
        Ok(())
    }

    async fn load_user(&self, user_id: Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    async fn begin(&self) -> Result<sqlx::Transaction<'_, sqlx::Postgres>, AppError> {
        self.pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))
    }
}
