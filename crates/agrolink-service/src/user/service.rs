//! Profile management and the public member directory.

use std::sync::Arc;

use uuid::Uuid;

use agrolink_core::error::AppError;
use agrolink_core::types::pagination::{PageRequest, PageResponse};
use agrolink_database::repositories::client_profile::ClientProfileRepository;
use agrolink_database::repositories::member_profile::{MemberFilter, MemberProfileRepository};
use agrolink_database::repositories::user::{UserFilter, UserRepository};
use agrolink_entity::profile::client::ClientProfile;
use agrolink_entity::profile::member::MemberProfile;
use agrolink_entity::user::User;

use crate::context::{AdminContext, RequestContext};

/// Fields a member may change on their own profile.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdateMemberProfile {
    /// New full name (on the account).
    pub full_name: Option<String>,
    /// New email (on the account).
    pub email: Option<String>,
    /// New provider type.
    pub provider_type: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// New local government area.
    pub local_government_area: Option<String>,
    /// New state.
    pub state: Option<String>,
    /// New bio.
    pub bio: Option<String>,
}

/// Fields a client may change on their own profile.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdateClientProfile {
    /// New full name (on the account).
    pub full_name: Option<String>,
    /// New email (on the account).
    pub email: Option<String>,
    /// New state.
    pub state: Option<String>,
    /// New local government area.
    pub local_government_area: Option<String>,
    /// New NIN photo URL.
    pub nin_photo_url: Option<String>,
}

/// Profile management and directory queries.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<UserRepository>,
    members: Arc<MemberProfileRepository>,
    clients: Arc<ClientProfileRepository>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<UserRepository>,
        members: Arc<MemberProfileRepository>,
        clients: Arc<ClientProfileRepository>,
    ) -> Self {
        Self {
            users,
            members,
            clients,
        }
    }

    /// Public member directory: verified, active members only.
    pub async fn browse_members(
        &self,
        filter: MemberFilter,
        page: PageRequest,
    ) -> Result<PageResponse<MemberProfile>, AppError> {
        self.members.browse(&filter, &page).await
    }

    /// A member's public profile.
    pub async fn member_profile(&self, member_id: Uuid) -> Result<MemberProfile, AppError> {
        self.members
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| AppError::not_found("Member not found"))
    }

    /// Update the calling member's account and profile fields.
    pub async fn update_member_profile(
        &self,
        ctx: &RequestContext,
        update: UpdateMemberProfile,
    ) -> Result<MemberProfile, AppError> {
        ctx.require_member()?;

        if update.full_name.is_some() || update.email.is_some() {
            self.users
                .update_contact(
                    ctx.user_id,
                    update.full_name.as_deref(),
                    update.email.as_deref(),
                )
                .await?;
        }

        self.members
            .update(
                ctx.user_id,
                update.provider_type.as_deref(),
                update.address.as_deref(),
                update.local_government_area.as_deref(),
                update.state.as_deref(),
                update.bio.as_deref(),
            )
            .await
    }

    /// Update the calling client's account and profile fields.
    pub async fn update_client_profile(
        &self,
        ctx: &RequestContext,
        update: UpdateClientProfile,
    ) -> Result<ClientProfile, AppError> {
        ctx.require_client()?;

        if update.full_name.is_some() || update.email.is_some() {
            self.users
                .update_contact(
                    ctx.user_id,
                    update.full_name.as_deref(),
                    update.email.as_deref(),
                )
                .await?;
        }

        self.clients
            .update(
                ctx.user_id,
                update.state.as_deref(),
                update.local_government_area.as_deref(),
                update.nin_photo_url.as_deref(),
            )
            .await
    }

    /// Admin directory listing over all users.
    pub async fn list_users(
        &self,
        _ctx: &AdminContext,
        filter: UserFilter,
        page: PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        self.users.find_all(&filter, &page).await
    }

    /// Admin detail view of one user.
    pub async fn get_user(&self, _ctx: &AdminContext, user_id: Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
