//! Rating submission with transactional aggregate recomputation, and
//! admin moderation.
//!
//! Aggregates are recomputed from the currently-ACTIVE ratings on every
//! change, never incremented: a rating hidden by moderation simply
//! vanishes from the next recompute, with no compensating decrement path
//! anywhere.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use agrolink_core::error::AppError;
use agrolink_core::types::pagination::{PageRequest, PageResponse};
use agrolink_database::repositories::audit::AuditLogRepository;
use agrolink_database::repositories::client_profile::ClientProfileRepository;
use agrolink_database::repositories::member_profile::MemberProfileRepository;
use agrolink_database::repositories::notification::NotificationRepository;
use agrolink_database::repositories::product::ProductRepository;
use agrolink_database::repositories::rating::RatingRepository;
use agrolink_database::repositories::service_offering::ServiceOfferingRepository;
use agrolink_entity::audit::{AdminAction, CreateAdminActivityLog};
use agrolink_entity::notification::{CreateNotification, NotificationKind};
use agrolink_entity::rating::{CreateRating, Rating, RatingCategory, RatingStatus};

use crate::context::{AdminContext, RequestContext};

/// A rating submission from a client.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SubmitRating {
    /// The rated member's profile.
    pub member_id: Uuid,
    /// What the rating targets.
    pub rating_category: RatingCategory,
    /// The rated product, if any.
    pub product_id: Option<Uuid>,
    /// The rated service, if any.
    pub service_id: Option<Uuid>,
    /// Overall rating, 1..=5.
    pub overall_rating: i32,
    /// Quality sub-rating.
    pub quality_rating: Option<i32>,
    /// Communication sub-rating.
    pub communication_rating: Option<i32>,
    /// Value-for-money sub-rating.
    pub value_rating: Option<i32>,
    /// Timeliness sub-rating.
    pub timeliness_rating: Option<i32>,
    /// Short review headline.
    pub review_title: Option<String>,
    /// Full review text.
    pub review_text: Option<String>,
}

/// Submits ratings and keeps denormalized aggregates consistent.
#[derive(Debug, Clone)]
pub struct RatingService {
    pool: PgPool,
    ratings: Arc<RatingRepository>,
    members: Arc<MemberProfileRepository>,
    clients: Arc<ClientProfileRepository>,
    products: Arc<ProductRepository>,
    services: Arc<ServiceOfferingRepository>,
    notifications: Arc<NotificationRepository>,
    audit: Arc<AuditLogRepository>,
}

impl RatingService {
    /// Creates a new rating service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        ratings: Arc<RatingRepository>,
        members: Arc<MemberProfileRepository>,
        clients: Arc<ClientProfileRepository>,
        products: Arc<ProductRepository>,
        services: Arc<ServiceOfferingRepository>,
        notifications: Arc<NotificationRepository>,
        audit: Arc<AuditLogRepository>,
    ) -> Self {
        Self {
            pool,
            ratings,
            members,
            clients,
            products,
            services,
            notifications,
            audit,
        }
    }

    /// Submit a rating.
    ///
    /// Only verified clients may rate; a duplicate for the same
    /// (member, category, product, service) combination is a conflict.
    /// The insert and every affected aggregate recompute commit together.
    pub async fn submit(
        &self,
        ctx: &RequestContext,
        data: SubmitRating,
    ) -> Result<Rating, AppError> {
        ctx.require_client()?;
        ctx.require_verified()?;

        if !(1..=5).contains(&data.overall_rating) {
            return Err(AppError::validation("Overall rating must be between 1 and 5"));
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

        let duplicate = self
            .ratings
            .exists_duplicate(
                client.id,
                data.member_id,
                data.rating_category,
                data.product_id,
                data.service_id,
            )
            .await?;
        if duplicate {
            return Err(AppError::conflict("You have already rated this"));
        }

        let mut tx = self.begin().await?;

        let rating = self
            .ratings
            .create_in_tx(
                tx.as_mut(),
                &CreateRating {
                    client_id: client.id,
                    member_id: data.member_id,
                    rating_category: data.rating_category,
                    product_id: data.product_id,
                    service_id: data.service_id,
                    overall_rating: data.overall_rating,
                    quality_rating: data.quality_rating,
                    communication_rating: data.communication_rating,
                    value_rating: data.value_rating,
                    timeliness_rating: data.timeliness_rating,
                    review_title: data.review_title,
                    review_text: data.review_text,
                },
            )
            .await?;

        self.recompute_in_tx(
            tx.as_mut(),
            data.member_id,
            data.product_id,
            data.service_id,
        )
        .await?;

        self.notifications
            .create_in_tx(
                tx.as_mut(),
                &CreateNotification {
                    user_id: member.user_id,
                    kind: NotificationKind::NewRating,
                    title: "New Rating Received".to_string(),
                    message: format!(
                        "A client rated you {} out of 5.",
                        data.overall_rating
                    ),
                    payload: Some(serde_json::json!({ "ratingId": rating.id })),
                },
            )
            .await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit rating: {e}")))?;

        info!(rating_id = %rating.id, member_id = %data.member_id, "Rating submitted");
        Ok(rating)
    }

    /// Moderate a rating (hide, remove, or restore), recomputing every
    /// affected aggregate in the same transaction.
    pub async fn moderate(
        &self,
        ctx: &AdminContext,
        rating_id: Uuid,
        status: RatingStatus,
        reason: Option<&str>,
    ) -> Result<Rating, AppError> {
        ctx.require_manage_content()?;

        let mut tx = self.begin().await?;

        let before = self
            .ratings
            .find_by_id(rating_id)
            .await?
            .ok_or_else(|| AppError::not_found("Rating not found"))?;

        let rating = self
            .ratings
            .set_status_in_tx(tx.as_mut(), rating_id, ctx.admin_id, status)
            .await?;

        self.recompute_in_tx(
            tx.as_mut(),
            rating.member_id,
            rating.product_id,
            rating.service_id,
        )
        .await?;

        let mut entry = CreateAdminActivityLog::brief(
            ctx.admin_id,
            AdminAction::RatingModerated,
            format!(
                "Set rating {} to {status}{}",
                rating.id,
                reason.map(|r| format!(": {r}")).unwrap_or_default()
            ),
        )
        .target("rating", rating_id, rating.id.to_string())
        .changes(
            serde_json::json!({ "status": before.status }),
            serde_json::json!({ "status": status }),
            vec!["status".to_string()],
        );
        entry.ip_address = ctx.ip_address.clone();
        self.audit.create_in_tx(tx.as_mut(), &entry).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit moderation: {e}")))?;

        info!(admin_id = %ctx.admin_id, rating_id = %rating_id, status = %status, "Rating moderated");
        Ok(rating)
    }

    /// ACTIVE ratings received by a member.
    pub async fn ratings_for_member(
        &self,
        member_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResponse<Rating>, AppError> {
        self.ratings.find_by_member(member_id, &page).await
    }

    /// Every rating the calling client has given.
    pub async fn ratings_given(&self, ctx: &RequestContext) -> Result<Vec<Rating>, AppError> {
        let client = self
            .clients
            .find_by_user(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::forbidden("Client profile required"))?;
        self.ratings.find_by_client(client.id).await
    }

    /// Ratings received by the calling member.
    pub async fn ratings_received(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Rating>, AppError> {
        let member = self
            .members
            .find_by_user(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::forbidden("Member profile required"))?;
        self.ratings.find_by_member(member.id, &page).await
    }

    /// Recompute member / product / service aggregates from ACTIVE
    /// ratings inside the caller's transaction.
    async fn recompute_in_tx(
        &self,
        conn: &mut sqlx::PgConnection,
        member_id: Uuid,
        product_id: Option<Uuid>,
        service_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        let member_agg = self
            .ratings
            .aggregate_for_member_in_tx(conn, member_id)
            .await?;
        self.members
            .write_rating_aggregate_in_tx(conn, member_id, &member_agg)
            .await?;

        if let Some(product_id) = product_id {
            let agg = self
                .ratings
                .aggregate_for_product_in_tx(conn, product_id)
                .await?;
            self.products
                .write_rating_aggregate_in_tx(conn, product_id, &agg)
                .await?;
        }

        if let Some(service_id) = service_id {
            let agg = self
                .ratings
                .aggregate_for_service_in_tx(conn, service_id)
                .await?;
            self.services
                .write_rating_aggregate_in_tx(conn, service_id, &agg)
                .await?;
        }

        Ok(())
    }

    async fn begin(&self) -> Result<sqlx::Transaction<'_, sqlx::Postgres>, AppError> {
        self.pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))
    }
}
