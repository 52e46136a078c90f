//! Admin role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::capabilities::AdminCapabilities;

/// Roles available to admin accounts.
///
/// Role is advisory: it seeds default capability flags at creation, but
/// the flags themselves are the enforced authorization unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "admin_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminRole {
    /// Full access, including managing other admin accounts.
    SuperAdmin,
    /// Reviews member and client verifications and password resets.
    VerificationAdmin,
    /// Moderates listings and user-generated content.
    ContentAdmin,
    /// Read-only access to reports and exports.
    ReportAdmin,
}

impl AdminRole {
    /// The fixed default capability set seeded for this role at creation.
    ///
    /// Explicit flags in a creation request override these per-flag.
    pub fn default_capabilities(&self) -> AdminCapabilities {
        match self {
            Self::SuperAdmin => AdminCapabilities {
                can_verify_members: true,
                can_verify_clients: true,
                can_reset_passwords: true,
                can_manage_content: true,
                can_manage_events: true,
                can_manage_admins: true,
                can_export_data: true,
                can_access_reports: true,
            },
            Self::VerificationAdmin => AdminCapabilities {
                can_verify_members: true,
                can_verify_clients: true,
                can_reset_passwords: true,
                ..AdminCapabilities::none()
            },
            Self::ContentAdmin => AdminCapabilities {
                can_manage_content: true,
                can_manage_events: true,
                ..AdminCapabilities::none()
            },
            Self::ReportAdmin => AdminCapabilities {
                can_export_data: true,
                can_access_reports: true,
                ..AdminCapabilities::none()
            },
        }
    }

    /// Whether this role may manage other admin accounts.
    pub fn is_super_admin(&self) -> bool {
        matches!(self, Self::SuperAdmin)
    }

    /// Return the role as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::VerificationAdmin => "VERIFICATION_ADMIN",
            Self::ContentAdmin => "CONTENT_ADMIN",
            Self::ReportAdmin => "REPORT_ADMIN",
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AdminRole {
    type Err = agrolink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SUPER_ADMIN" => Ok(Self::SuperAdmin),
            "VERIFICATION_ADMIN" => Ok(Self::VerificationAdmin),
            "CONTENT_ADMIN" => Ok(Self::ContentAdmin),
            "REPORT_ADMIN" => Ok(Self::ReportAdmin),
            _ => Err(agrolink_core::AppError::validation(format!(
                "Invalid admin role: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_super_admin_has_everything() {
        let caps = AdminRole::SuperAdmin.default_capabilities();
        assert!(caps.can_manage_admins);
        assert!(caps.can_verify_members);
        assert!(caps.can_export_data);
    }

    #[test]
    fn test_verification_admin_defaults() {
        let caps = AdminRole::VerificationAdmin.default_capabilities();
        assert!(caps.can_verify_members);
        assert!(caps.can_verify_clients);
        assert!(caps.can_reset_passwords);
        assert!(!caps.can_manage_admins);
        assert!(!caps.can_manage_content);
    }

    #[test]
    fn test_report_admin_defaults() {
        let caps = AdminRole::ReportAdmin.default_capabilities();
        assert!(caps.can_access_reports);
        assert!(caps.can_export_data);
        assert!(!caps.can_verify_members);
    }
}
