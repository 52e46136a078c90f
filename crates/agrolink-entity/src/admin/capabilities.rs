//! Per-capability boolean flags carried on every admin account.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The eight independent capability flags enforced on admin actions.
///
/// These are the actual authorization unit; `AdminRole` only seeds
/// defaults for them at account creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow, Default)]
pub struct AdminCapabilities {
    /// May drive verification transitions for member accounts.
    pub can_verify_members: bool,
    /// May drive verification transitions for client accounts.
    pub can_verify_clients: bool,
    /// May process user password resets.
    pub can_reset_passwords: bool,
    /// May moderate listings, ratings, and other user content.
    pub can_manage_content: bool,
    /// May manage platform events.
    pub can_manage_events: bool,
    /// May create, update, and deactivate other admin accounts.
    pub can_manage_admins: bool,
    /// May export platform data.
    pub can_export_data: bool,
    /// May access reports and dashboards.
    pub can_access_reports: bool,
}

impl AdminCapabilities {
    /// All flags off.
    pub fn none() -> Self {
        Self::default()
    }

    /// Apply per-flag overrides on top of this set.
    ///
    /// `None` leaves the seeded default in place; `Some` replaces it.
    pub fn with_overrides(mut self, overrides: &CapabilityOverrides) -> Self {
        if let Some(v) = overrides.can_verify_members {
            self.can_verify_members = v;
        }
        if let Some(v) = overrides.can_verify_clients {
            self.can_verify_clients = v;
        }
        if let Some(v) = overrides.can_reset_passwords {
            self.can_reset_passwords = v;
        }
        if let Some(v) = overrides.can_manage_content {
            self.can_manage_content = v;
        }
        if let Some(v) = overrides.can_manage_events {
            self.can_manage_events = v;
        }
        if let Some(v) = overrides.can_manage_admins {
            self.can_manage_admins = v;
        }
        if let Some(v) = overrides.can_export_data {
            self.can_export_data = v;
        }
        if let Some(v) = overrides.can_access_reports {
            self.can_access_reports = v;
        }
        self
    }
}

/// Optional per-flag overrides supplied in an admin creation request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct CapabilityOverrides {
    pub can_verify_members: Option<bool>,
    pub can_verify_clients: Option<bool>,
    pub can_reset_passwords: Option<bool>,
    pub can_manage_content: Option<bool>,
    pub can_manage_events: Option<bool>,
    pub can_manage_admins: Option<bool>,
    pub can_export_data: Option<bool>,
    pub can_access_reports: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_only_set_flags() {
        let base = AdminCapabilities {
            can_verify_members: true,
            can_verify_clients: true,
            ..AdminCapabilities::none()
        };
        let overrides = CapabilityOverrides {
            can_verify_clients: Some(false),
            can_export_data: Some(true),
            ..CapabilityOverrides::default()
        };
        let merged = base.with_overrides(&overrides);
        assert!(merged.can_verify_members);
        assert!(!merged.can_verify_clients);
        assert!(merged.can_export_data);
    }
}
