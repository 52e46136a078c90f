//! Transactions between clients and members.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use agrolink_core::error::AppError;
use agrolink_core::types::pagination::{PageRequest, PageResponse};
use agrolink_database::repositories::client_profile::ClientProfileRepository;
use agrolink_database::repositories::member_profile::MemberProfileRepository;
use agrolink_database::repositories::notification::NotificationRepository;
use agrolink_database::repositories::transaction::TransactionRepository;
use agrolink_entity::notification::{CreateNotification, NotificationKind};
use agrolink_entity::transaction::{CreateTransaction, Transaction, TransactionStatus};

use crate::context::RequestContext;

/// A transaction creation request from a client.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NewTransaction {
    /// The selling member's profile.
    pub member_id: Uuid,
    /// The product involved, if any.
    pub product_id: Option<Uuid>,
    /// The service involved, if any.
    pub service_id: Option<Uuid>,
    /// Agreed amount.
    pub amount: f64,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Records and advances marketplace transactions.
#[derive(Debug, Clone)]
pub struct TransactionService {
    transactions: Arc<TransactionRepository>,
    members: Arc<MemberProfileRepository>,
    clients: Arc<ClientProfileRepository>,
    notifications: Arc<NotificationRepository>,
}

impl TransactionService {
    /// Creates a new transaction service.
    pub fn new(
        transactions: Arc<TransactionRepository>,
        members: Arc<MemberProfileRepository>,
        clients: Arc<ClientProfileRepository>,
        notifications: Arc<NotificationRepository>,
    ) -> Self {
        Self {
            transactions,
            members,
            clients,
            notifications,
        }
    }

    /// Create a transaction as a verified client.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: NewTransaction,
    ) -> Result<Transaction, AppError> {
        ctx.require_client()?;
        ctx.require_verified()?;

        if data.amount <= 0.0 {
            return Err(AppError::validation("Amount must be positive"));
        }

        let client = self
            .clients
            .find_by_user(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::forbidden("Client profile required"))?;

        let member = self
            .members
            .find_by_id(data.member_id)
            .await?
            .ok_or_else(|| AppError::not_found("Member not found"))?;

        let transaction = self
            .transactions
            .create(&CreateTransaction {
                client_id: client.id,
                member_id: data.member_id,
                product_id: data.product_id,
                service_id: data.service_id,
                amount: data.amount,
                notes: data.notes,
            })
            .await?;

        self.notifications
            .create(&CreateNotification {
                user_id: member.user_id,
                kind: NotificationKind::TransactionUpdate,
                title: "New Transaction".to_string(),
                message: "A client opened a transaction with you.".to_string(),
                payload: Some(serde_json::json!({ "transactionId": transaction.id })),
            })
            .await?;

        info!(transaction_id = %transaction.id, "Transaction created");
        Ok(transaction)
    }

    /// Advance a transaction's status as the selling member.
    ///
    /// Illegal jumps (e.g. PENDING -> COMPLETED) are conflicts.
    pub async fn advance(
        &self,
        ctx: &RequestContext,
        transaction_id: Uuid,
        next: TransactionStatus,
    ) -> Result<Transaction, AppError> {
        ctx.require_member()?;

        let member = self
            .members
            .find_by_user(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::forbidden("Member profile required"))?;

        let transaction = self
            .transactions
            .find_by_id(transaction_id)
            .await?
            .ok_or_else(|| AppError::not_found("Transaction not found"))?;

        if transaction.member_id != member.id {
            return Err(AppError::forbidden("Not your transaction"));
        }
        if !transaction.status.can_advance_to(next) {
            return Err(AppError::conflict(format!(
                "Cannot move transaction from {:?} to {next:?}",
                transaction.status
            )));
        }

        let updated = self.transactions.set_status(transaction_id, next).await?;

        let client = self.clients.find_by_id(transaction.client_id).await?;
        if let Some(client) = client {
            self.notifications
                .create(&CreateNotification {
                    user_id: client.user_id,
                    kind: NotificationKind::TransactionUpdate,
                    title: "Transaction Updated".to_string(),
                    message: format!("Your transaction is now {next:?}."),
                    payload: Some(serde_json::json!({ "transactionId": transaction_id })),
                })
                .await?;
        }

        info!(transaction_id = %transaction_id, status = ?next, "Transaction advanced");
        Ok(updated)
    }

    /// List the caller's transactions (as client or member).
    pub async fn list_mine(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Transaction>, AppError> {
        let profile_id = match self.clients.find_by_user(ctx.user_id).await? {
            Some(client) => client.id,
            None => {
                self.members
                    .find_by_user(ctx.user_id)
                    .await?
                    .ok_or_else(|| AppError::forbidden("Profile required"))?
                    .id
            }
        };
        self.transactions.find_by_party(profile_id, &page).await
    }
}
