//! Login attempt ledger and lockout policy.
//!
//! Every login call appends one row. A client IP is locked out while its
//! failures inside the rolling window reach the configured maximum. Blocked
//! calls are recorded as failures too, so an IP that keeps knocking keeps
//! its own lockout alive.
//!
//! The count and the insert are separate statements. Concurrent bursts from
//! one IP can each read a count below the limit before any of them writes,
//! so the limit is a soft bound under concurrency.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::config::SecurityConfig;
use crate::db::{Database, LoginAttemptRepository, NewLoginAttempt};
use crate::Result;

/// Default failures that trigger a lockout.
pub const MAX_FAILED_ATTEMPTS: u32 = 5;

/// Default rolling window in minutes.
pub const LOCKOUT_WINDOW_MINUTES: i64 = 15;

/// Lockout thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutPolicy {
    /// Failures inside the window that lock the IP.
    pub max_failures: u32,
    /// Rolling window length.
    pub window: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_failures: MAX_FAILED_ATTEMPTS,
            window: Duration::minutes(LOCKOUT_WINDOW_MINUTES),
        }
    }
}

impl LockoutPolicy {
    /// Build the policy from the `[security]` config section.
    pub fn from_config(config: &SecurityConfig) -> Result<Self> {
        Ok(Self {
            max_failures: config.max_login_attempts,
            window: config.lockout_window()?,
        })
    }

    /// Window length in whole minutes, for user-facing messages.
    pub fn window_minutes(&self) -> u64 {
        u64::try_from(self.window.num_minutes()).unwrap_or(0)
    }
}

/// Result of a lockout check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockoutStatus {
    /// The IP may attempt a login.
    Open {
        /// Failures counted inside the window.
        failures: u32,
    },
    /// The IP is locked out.
    Locked {
        /// Failures counted inside the window.
        failures: u32,
    },
}

impl LockoutStatus {
    /// Whether the IP is locked out.
    pub fn is_locked(&self) -> bool {
        matches!(self, LockoutStatus::Locked { .. })
    }
}

/// Append-only record of login attempts.
#[derive(Clone)]
pub struct LoginLedger {
    db: Database,
    policy: LockoutPolicy,
}

impl LoginLedger {
    /// Create a ledger over `db`.
    pub fn new(db: Database, policy: LockoutPolicy) -> Self {
        Self { db, policy }
    }

    /// The active policy.
    pub fn policy(&self) -> &LockoutPolicy {
        &self.policy
    }

    /// Record one attempt at the current time.
    pub async fn record(&self, ip: &str, username: Option<&str>, successful: bool) -> Result<()> {
        let attempt = if successful {
            NewLoginAttempt::succeeded(ip, username)
        } else {
            NewLoginAttempt::failed(ip, username)
        };
        self.record_attempt(&attempt).await
    }

    /// Record a prepared attempt.
    pub async fn record_attempt(&self, attempt: &NewLoginAttempt) -> Result<()> {
        let repo = LoginAttemptRepository::new(self.db.pool());
        let id = repo.record(attempt).await?;
        debug!(
            attempt_id = id,
            ip = %attempt.ip_address,
            successful = attempt.successful,
            "Login attempt recorded"
        );
        Ok(())
    }

    /// Count failed attempts from `ip` at or after `since`.
    pub async fn count_recent_failures(&self, ip: &str, since: &DateTime<Utc>) -> Result<u32> {
        LoginAttemptRepository::new(self.db.pool())
            .count_failures_since(ip, since)
            .await
    }

    /// Check the lockout state of `ip` now.
    pub async fn check_lockout(&self, ip: &str) -> Result<LockoutStatus> {
        self.check_lockout_at(ip, Utc::now()).await
    }

    /// Check the lockout state of `ip` at `now`.
    pub async fn check_lockout_at(&self, ip: &str, now: DateTime<Utc>) -> Result<LockoutStatus> {
        let since = now - self.policy.window;
        let failures = self.count_recent_failures(ip, &since).await?;
        if failures >= self.policy.max_failures {
            Ok(LockoutStatus::Locked { failures })
        } else {
            Ok(LockoutStatus::Open { failures })
        }
    }

    /// Delete attempts older than `cutoff`.
    pub async fn prune_before(&self, cutoff: &DateTime<Utc>) -> Result<u64> {
        LoginAttemptRepository::new(self.db.pool())
            .delete_older_than(cutoff)
            .await
    }
}
