//! Transaction entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle status of a marketplace transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transaction_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Created by the client, awaiting the member.
    Pending,
    /// Accepted by the member.
    Confirmed,
    /// Fulfilled.
    Completed,
    /// Called off by either party.
    Cancelled,
}

impl TransactionStatus {
    /// Whether the status may advance to `next`.
    pub fn can_advance_to(&self, next: TransactionStatus) -> bool {
        use TransactionStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
        )
    }
}

/// A recorded transaction between a client and a member.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    /// Unique transaction identifier.
    pub id: Uuid,
    /// The purchasing client's profile.
    pub client_id: Uuid,
    /// The selling member's profile.
    pub member_id: Uuid,
    /// The product involved, if any.
    pub product_id: Option<Uuid>,
    /// The service involved, if any.
    pub service_id: Option<Uuid>,
    /// Agreed amount.
    pub amount: f64,
    /// Lifecycle status.
    pub status: TransactionStatus,
    /// Free-text notes.
    pub notes: Option<String>,
    /// When the transaction was created.
    pub created_at: DateTime<Utc>,
    /// When the transaction was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransaction {
    /// The purchasing client's profile.
    pub client_id: Uuid,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_advancement() {
        use TransactionStatus::*;
        assert!(Pending.can_advance_to(Confirmed));
        assert!(Confirmed.can_advance_to(Completed));
        assert!(Confirmed.can_advance_to(Cancelled));
        assert!(!Completed.can_advance_to(Cancelled));
        assert!(!Cancelled.can_advance_to(Confirmed));
        assert!(!Pending.can_advance_to(Completed));
    }
}
