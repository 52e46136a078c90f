//! Login lockout policy.
//!
//! After `max_attempts` consecutive failures an account is locked for a
//! fixed cooldown (30 minutes for users, 60 for admins). The outcome is
//! computed per attempt from the stored counter, never cached, so
//! concurrent failures converge on a consistent locked state.

use chrono::{DateTime, Duration, Utc};

use agrolink_core::config::AuthConfig;

/// Outcome of registering one failed login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureOutcome {
    /// The new value of the consecutive-failure counter.
    pub attempts: i32,
    /// Lock expiry to store, set only when this increment reached the
    /// threshold.
    pub locked_until: Option<DateTime<Utc>>,
}

/// Lockout policy for one account class.
#[derive(Debug, Clone, Copy)]
pub struct LockoutPolicy {
    /// Failures allowed before the lock engages.
    max_attempts: i32,
    /// Lock duration in minutes.
    lockout_minutes: i64,
}

impl LockoutPolicy {
    /// Policy for regular user accounts.
    pub fn for_users(config: &AuthConfig) -> Self {
        Self {
            max_attempts: config.max_failed_attempts,
            lockout_minutes: config.user_lockout_minutes,
        }
    }

    /// Policy for admin accounts.
    pub fn for_admins(config: &AuthConfig) -> Self {
        Self {
            max_attempts: config.max_failed_attempts,
            lockout_minutes: config.admin_lockout_minutes,
        }
    }

    /// Register a failed attempt on top of the stored counter.
    ///
    /// The lock expiry is set exactly when the incremented counter reaches
    /// the threshold; below the threshold only the counter moves.
    pub fn register_failure(&self, current_attempts: i32) -> FailureOutcome {
        let attempts = current_attempts + 1;
        let locked_until = if attempts >= self.max_attempts {
            Some(Utc::now() + Duration::minutes(self.lockout_minutes))
        } else {
            None
        };
        FailureOutcome {
            attempts,
            locked_until,
        }
    }

    /// The configured lock duration in minutes.
    pub fn lockout_minutes(&self) -> i64 {
        self.lockout_minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> LockoutPolicy {
        LockoutPolicy {
            max_attempts: 5,
            lockout_minutes: 30,
        }
    }

    #[test]
    fn test_below_threshold_only_increments() {
        let outcome = policy().register_failure(2);
        assert_eq!(outcome.attempts, 3);
        assert!(outcome.locked_until.is_none());
    }

    #[test]
    fn test_fifth_failure_locks() {
        let outcome = policy().register_failure(4);
        assert_eq!(outcome.attempts, 5);
        let until = outcome.locked_until.expect("should be locked");
        let minutes = (until - Utc::now()).num_minutes();
        assert!((29..=30).contains(&minutes));
    }

    #[test]
    fn test_beyond_threshold_still_locks() {
        // A failure past the threshold re-arms the lock expiry.
        let outcome = policy().register_failure(7);
        assert_eq!(outcome.attempts, 8);
        assert!(outcome.locked_until.is_some());
    }
}
