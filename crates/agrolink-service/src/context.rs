//! Request contexts for authenticated users and admins.
//!
//! The acting identity is passed explicitly into every service call;
//! there is no ambient/global actor state anywhere in the codebase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use agrolink_core::error::AppError;
use agrolink_entity::admin::{AdminCapabilities, AdminRole};
use agrolink_entity::user::{UserType, VerificationStatus};

/// Context for the current authenticated user request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's phone number (from JWT claims).
    pub phone_number: String,
    /// Member or client.
    pub user_type: UserType,
    /// Verification status loaded at request time.
    pub verification_status: VerificationStatus,
    /// IP address of the request origin.
    pub ip_address: Option<String>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user_id: Uuid,
        phone_number: String,
        user_type: UserType,
        verification_status: VerificationStatus,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            user_id,
            phone_number,
            user_type,
            verification_status,
            ip_address,
            user_agent,
            request_time: Utc::now(),
        }
    }

    /// Fail unless the account has passed verification.
    pub fn require_verified(&self) -> Result<(), AppError> {
        if self.verification_status != VerificationStatus::Verified {
            return Err(AppError::forbidden(
                "Your account must be verified to perform this action",
            ));
        }
        Ok(())
    }

    /// Fail unless the account is a member.
    pub fn require_member(&self) -> Result<(), AppError> {
        if self.user_type != UserType::Member {
            return Err(AppError::forbidden("Only members can perform this action"));
        }
        Ok(())
    }

    /// Fail unless the account is a client.
    pub fn require_client(&self) -> Result<(), AppError> {
        if self.user_type != UserType::Client {
            return Err(AppError::forbidden("Only clients can perform this action"));
        }
        Ok(())
    }
}

/// Context for the current authenticated admin request.
///
/// Capability flags are loaded fresh from the account row at token
/// validation time, so revoking a flag takes effect on the next request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminContext {
    /// The authenticated admin's ID.
    pub admin_id: Uuid,
    /// The server-tracked session behind this request.
    pub session_id: Uuid,
    /// Username (from JWT claims).
    pub username: String,
    /// Advisory role.
    pub role: AdminRole,
    /// Enforced capability flags.
    pub capabilities: AdminCapabilities,
    /// IP address of the request origin.
    pub ip_address: Option<String>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl AdminContext {
    /// Creates a new admin context.
    pub fn new(
        admin_id: Uuid,
        session_id: Uuid,
        username: String,
        role: AdminRole,
        capabilities: AdminCapabilities,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            admin_id,
            session_id,
            username,
            role,
            capabilities,
            ip_address,
            user_agent,
            request_time: Utc::now(),
        }
    }

    /// Fail unless the admin is a SUPER_ADMIN.
    ///
    /// Managing other admin accounts is role-gated, not flag-gated.
    pub fn require_super_admin(&self) -> Result<(), AppError> {
        if !self.role.is_super_admin() {
            return Err(AppError::forbidden(
                "Only a super admin can manage admin accounts",
            ));
        }
        Ok(())
    }

    /// Fail unless the admin may verify accounts of the given type.
    pub fn require_verify(&self, user_type: UserType) -> Result<(), AppError> {
        let allowed = match user_type {
            UserType::Member => self.capabilities.can_verify_members,
            UserType::Client => self.capabilities.can_verify_clients,
        };
        if !allowed {
            return Err(AppError::forbidden(format!(
                "You are not permitted to verify {} accounts",
                user_type.as_str().to_lowercase()
            )));
        }
        Ok(())
    }

    /// Fail unless the admin may process password resets.
    pub fn require_reset_passwords(&self) -> Result<(), AppError> {
        if !self.capabilities.can_reset_passwords {
            return Err(AppError::forbidden(
                "You are not permitted to reset passwords",
            ));
        }
        Ok(())
    }

    /// Fail unless the admin may moderate content.
    pub fn require_manage_content(&self) -> Result<(), AppError> {
        if !self.capabilities.can_manage_content {
            return Err(AppError::forbidden(
                "You are not permitted to moderate content",
            ));
        }
        Ok(())
    }

    /// Fail unless the admin may access reports.
    pub fn require_reports(&self) -> Result<(), AppError> {
        if !self.capabilities.can_access_reports {
            return Err(AppError::forbidden(
                "You are not permitted to access reports",
            ));
        }
        Ok(())
    }

    /// Fail when the admin targets their own account.
    pub fn require_not_self(&self, target_admin_id: Uuid) -> Result<(), AppError> {
        if self.admin_id == target_admin_id {
            return Err(AppError::forbidden(
                "You cannot perform this action on your own account",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_ctx(role: AdminRole, capabilities: AdminCapabilities) -> AdminContext {
        AdminContext::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "tester".into(),
            role,
            capabilities,
            None,
            None,
        )
    }

    #[test]
    fn test_super_admin_gate() {
        let ctx = admin_ctx(
            AdminRole::VerificationAdmin,
            AdminRole::VerificationAdmin.default_capabilities(),
        );
        assert!(ctx.require_super_admin().is_err());

        let ctx = admin_ctx(
            AdminRole::SuperAdmin,
            AdminRole::SuperAdmin.default_capabilities(),
        );
        assert!(ctx.require_super_admin().is_ok());
    }

    #[test]
    fn test_verify_gate_by_user_type() {
        let caps = AdminCapabilities {
            can_verify_members: true,
            ..AdminCapabilities::none()
        };
        let ctx = admin_ctx(AdminRole::VerificationAdmin, caps);
        assert!(ctx.require_verify(UserType::Member).is_ok());
        assert!(ctx.require_verify(UserType::Client).is_err());
    }

    #[test]
    fn test_self_action_guard() {
        let ctx = admin_ctx(
            AdminRole::SuperAdmin,
            AdminRole::SuperAdmin.default_capabilities(),
        );
        assert!(ctx.require_not_self(ctx.admin_id).is_err());
        assert!(ctx.require_not_self(Uuid::new_v4()).is_ok());
    }
}
