//! Admin session manager — open, validate, and revoke sessions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use agrolink_core::error::AppError;
use agrolink_database::repositories::admin_session::AdminSessionRepository;
use agrolink_entity::session::admin_session::{AdminSession, CreateAdminSession};

use crate::jwt::token_fingerprint;

/// Manages the server-side rows that make admin tokens revocable.
///
/// A cryptographically valid admin token whose session row has been
/// deactivated is rejected here — this is what makes logout, account
/// deactivation, and forced termination effective immediately.
#[derive(Debug, Clone)]
pub struct AdminSessionManager {
    sessions: Arc<AdminSessionRepository>,
}

impl AdminSessionManager {
    /// Creates a new session manager.
    pub fn new(sessions: Arc<AdminSessionRepository>) -> Self {
        Self { sessions }
    }

    /// Open a session row for a freshly-issued token.
    pub async fn open(
        &self,
        admin_id: Uuid,
        token: &str,
        ip_address: Option<String>,
        user_agent: Option<String>,
        expires_at: DateTime<Utc>,
    ) -> Result<AdminSession, AppError> {
        let session = self
            .sessions
            .create(&CreateAdminSession {
                admin_id,
                token_hash: token_fingerprint(token),
                ip_address,
                user_agent,
                expires_at,
            })
            .await?;

        info!(admin_id = %admin_id, session_id = %session.id, "Admin session opened");
        Ok(session)
    }

    /// Confirm that the session behind a presented token is still alive.
    ///
    /// Called on every admin request after signature/expiry validation.
    pub async fn validate(&self, session_id: Uuid, token: &str) -> Result<(), AppError> {
        let alive = self
            .sessions
            .is_alive(session_id, &token_fingerprint(token))
            .await?;

        if !alive {
            return Err(AppError::unauthorized("Session has been revoked"));
        }
        Ok(())
    }

    /// Revoke one session (logout).
    pub async fn close(&self, session_id: Uuid, reason: &str) -> Result<(), AppError> {
        self.sessions.terminate(session_id, reason).await?;
        info!(session_id = %session_id, reason, "Admin session closed");
        Ok(())
    }

    /// Revoke every active session for an admin (deactivation cascade or
    /// explicit terminate-all). Returns the number of sessions revoked.
    pub async fn close_all(&self, admin_id: Uuid, reason: &str) -> Result<u64, AppError> {
        let terminated = self
            .sessions
            .terminate_all_for_admin(admin_id, reason)
            .await?;
        info!(admin_id = %admin_id, terminated, reason, "Admin sessions terminated");
        Ok(terminated)
    }
}
