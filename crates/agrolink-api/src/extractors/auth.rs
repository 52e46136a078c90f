//! Authentication extractors for both token namespaces.
//!
//! `AuthUser` validates a user access token and loads the account so the
//! context carries the current verification status. `AuthAdmin`
//! additionally confirms the server-tracked session is still alive — a
//! cryptographically valid token with a revoked session is rejected —
//! and reloads capability flags from the account row.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use agrolink_core::error::AppError;
use agrolink_service::context::{AdminContext, RequestContext};

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Extracted authenticated admin context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthAdmin(pub AdminContext);

impl std::ops::Deref for AuthAdmin {
    type Target = AdminContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))
}

fn client_ip(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').next().unwrap_or(v).trim().to_string())
}

fn user_agent(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = state.user_verifier.decode_access(token)?;

        // Load the account so the context reflects the current status.
        let user = state
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("Account no longer exists"))?;

        if !user.is_active {
            return Err(AppError::unauthorized("Account suspended").into());
        }

        Ok(AuthUser(RequestContext::new(
            user.id,
            user.phone_number,
            user.user_type,
            user.verification_status,
            client_ip(parts),
            user_agent(parts),
        )))
    }
}

impl FromRequestParts<AppState> for AuthAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = state.admin_verifier.decode(token)?;

        // Signature and expiry are not enough: the session row must still
        // be administratively alive.
        state
            .admin_sessions
            .validate(claims.session_id(), token)
            .await?;

        let admin = state
            .admin_repo
            .find_by_id(claims.admin_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("Admin not found"))?;

        if !admin.is_active {
            return Err(AppError::unauthorized("Account deactivated").into());
        }

        Ok(AuthAdmin(AdminContext::new(
            admin.id,
            claims.session_id(),
            admin.username,
            admin.role,
            admin.capabilities,
            client_ip(parts),
            user_agent(parts),
        )))
    }
}
