//! Dashboard overview, verification statistics, and audit log search.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use agrolink_core::error::AppError;
use agrolink_core::types::pagination::{PageRequest, PageResponse};
use agrolink_database::repositories::audit::AuditLogRepository;
use agrolink_database::repositories::password_reset::PasswordResetRepository;
use agrolink_database::repositories::product::ProductRepository;
use agrolink_database::repositories::rating::RatingRepository;
use agrolink_database::repositories::service_offering::ServiceOfferingRepository;
use agrolink_database::repositories::tool::ToolRepository;
use agrolink_database::repositories::transaction::TransactionRepository;
use agrolink_database::repositories::user::UserRepository;
use agrolink_entity::audit::{AdminAction, AdminActivityLog};
use agrolink_entity::user::{User, UserType, VerificationStatus};

use crate::context::AdminContext;

/// Top-level dashboard counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardOverview {
    /// All registered users.
    pub total_users: i64,
    /// Member accounts.
    pub total_members: i64,
    /// Client accounts.
    pub total_clients: i64,
    /// Verified members.
    pub verified_members: i64,
    /// Verified clients.
    pub verified_clients: i64,
    /// Users awaiting review (PENDING or RESUBMITTED).
    pub pending_verifications: i64,
    /// Password reset requests awaiting processing.
    pub pending_password_resets: i64,
    /// Suspended accounts.
    pub suspended_users: i64,
    /// Active product listings.
    pub total_products: i64,
    /// Active service listings.
    pub total_services: i64,
    /// Active tool listings.
    pub total_tools: i64,
    /// ACTIVE ratings.
    pub total_ratings: i64,
    /// All transactions.
    pub total_transactions: i64,
    /// Registrations in the last 24 hours.
    pub new_users_today: i64,
    /// Registrations in the last 7 days.
    pub new_users_this_week: i64,
    /// Registrations in the last 30 days.
    pub new_users_this_month: i64,
    /// Most recent registrations.
    pub recent_users: Vec<User>,
    /// Most recent admin activity.
    pub recent_activity: Vec<AdminActivityLog>,
}

/// Verification workload statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationStats {
    /// Per-status counts over all users.
    pub status_counts: Vec<(VerificationStatus, i64)>,
    /// Per-status counts over members.
    pub member_status_counts: Vec<(VerificationStatus, i64)>,
    /// Per-status counts over clients.
    pub client_status_counts: Vec<(VerificationStatus, i64)>,
    /// Users awaiting review.
    pub pending_count: i64,
    /// Password reset requests awaiting processing.
    pub pending_resets: i64,
    /// Mean hours from submission to verification, last 30 days.
    pub avg_verification_hours: f64,
}

/// Aggregated read-side queries for the admin dashboard.
#[derive(Debug, Clone)]
pub struct DashboardService {
    users: Arc<UserRepository>,
    resets: Arc<PasswordResetRepository>,
    products: Arc<ProductRepository>,
    services: Arc<ServiceOfferingRepository>,
    tools: Arc<ToolRepository>,
    ratings: Arc<RatingRepository>,
    transactions: Arc<TransactionRepository>,
    audit: Arc<AuditLogRepository>,
}

impl DashboardService {
    /// Creates a new dashboard service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<UserRepository>,
        resets: Arc<PasswordResetRepository>,
        products: Arc<ProductRepository>,
        services: Arc<ServiceOfferingRepository>,
        tools: Arc<ToolRepository>,
        ratings: Arc<RatingRepository>,
        transactions: Arc<TransactionRepository>,
        audit: Arc<AuditLogRepository>,
    ) -> Self {
        Self {
            users,
            resets,
            products,
            services,
            tools,
            ratings,
            transactions,
            audit,
        }
    }

    /// The main dashboard overview.
    pub async fn overview(&self, ctx: &AdminContext) -> Result<DashboardOverview, AppError> {
        ctx.require_reports()?;

        let now = Utc::now();
        let today = now - Duration::hours(24);
        let week_ago = now - Duration::days(7);
        let month_ago = now - Duration::days(30);

        Ok(DashboardOverview {
            total_users: self.users.count(None, None).await?,
            total_members: self.users.count(Some(UserType::Member), None).await?,
            total_clients: self.users.count(Some(UserType::Client), None).await?,
            verified_members: self
                .users
                .count(Some(UserType::Member), Some(VerificationStatus::Verified))
                .await?,
            verified_clients: self
                .users
                .count(Some(UserType::Client), Some(VerificationStatus::Verified))
                .await?,
            pending_verifications: self.users.count_awaiting_review().await?,
            pending_password_resets: self.resets.count_pending().await?,
            suspended_users: self
                .users
                .count(None, Some(VerificationStatus::Suspended))
                .await?,
            total_products: self.products.count_active().await?,
            total_services: self.services.count_active().await?,
            total_tools: self.tools.count_active().await?,
            total_ratings: self.ratings.count_active().await?,
            total_transactions: self.transactions.count().await?,
            new_users_today: self.users.count_registered_since(today).await?,
            new_users_this_week: self.users.count_registered_since(week_ago).await?,
            new_users_this_month: self.users.count_registered_since(month_ago).await?,
            recent_users: self.users.recent(10).await?,
            recent_activity: self.audit.recent(15).await?,
        })
    }

    /// Verification workload statistics.
    pub async fn verification_stats(
        &self,
        ctx: &AdminContext,
    ) -> Result<VerificationStats, AppError> {
        ctx.require_reports()?;

        let month_ago = Utc::now() - Duration::days(30);

        Ok(VerificationStats {
            status_counts: self.users.status_breakdown(None).await?,
            member_status_counts: self.users.status_breakdown(Some(UserType::Member)).await?,
            client_status_counts: self.users.status_breakdown(Some(UserType::Client)).await?,
            pending_count: self.users.count_awaiting_review().await?,
            pending_resets: self.resets.count_pending().await?,
            avg_verification_hours: self.users.average_verification_hours(month_ago).await?,
        })
    }

    /// Search the admin activity log.
    pub async fn search_audit_log(
        &self,
        ctx: &AdminContext,
        admin_id: Option<Uuid>,
        action: Option<AdminAction>,
        target_type: Option<&str>,
        target_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<PageResponse<AdminActivityLog>, AppError> {
        ctx.require_reports()?;
        self.audit
            .search(admin_id, action, target_type, target_id, &page)
            .await
    }
}
