//! Notification listing and read-state management.

use std::sync::Arc;

use uuid::Uuid;

use agrolink_core::error::AppError;
use agrolink_core::types::pagination::{PageRequest, PageResponse};
use agrolink_database::repositories::notification::NotificationRepository;
use agrolink_entity::notification::Notification;

use crate::context::RequestContext;

/// Read-side access to a user's notifications.
///
/// Notifications are written by the verification, rating, and
/// transaction services as part of their own transactions; this service
/// only reads and flips read-state.
#[derive(Debug, Clone)]
pub struct NotificationService {
    notifications: Arc<NotificationRepository>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notifications: Arc<NotificationRepository>) -> Self {
        Self { notifications }
    }

    /// List the caller's notifications.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Notification>, AppError> {
        self.notifications.find_by_user(ctx.user_id, &page).await
    }

    /// Unread notification count.
    pub async fn unread_count(&self, ctx: &RequestContext) -> Result<i64, AppError> {
        self.notifications.count_unread(ctx.user_id).await
    }

    /// Mark one notification as read.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> Result<(), AppError> {
        self.notifications.mark_read(notification_id, ctx.user_id).await
    }

    /// Mark every unread notification as read. Returns the number updated.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> Result<u64, AppError> {
        self.notifications.mark_all_read(ctx.user_id).await
    }
}
