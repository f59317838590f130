//! Login, session check and logout orchestration.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use super::context::RequestContext;
use super::credentials::AdminCredentials;
use super::ledger::{LockoutPolicy, LockoutStatus, LoginLedger};
use super::session::{IssuedSession, SessionStatus, SessionStore};
use crate::config::Config;
use crate::db::Database;
use crate::{AdminError, Result};

/// Message for any credential mismatch.
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Message for a missing, expired or revoked session.
pub const UNAUTHORIZED: &str = "unauthorized";

/// Outcome of a retention sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Expired sessions removed.
    pub sessions: u64,
    /// Old login attempts removed.
    pub attempts: u64,
}

/// The single writer of sessions and login attempts.
#[derive(Clone)]
pub struct AuthGateway {
    credentials: Arc<AdminCredentials>,
    ledger: LoginLedger,
    sessions: SessionStore,
}

impl AuthGateway {
    /// Create a gateway from its parts.
    pub fn new(
        db: Database,
        credentials: AdminCredentials,
        policy: LockoutPolicy,
        session_lifetime: Duration,
    ) -> Self {
        Self {
            credentials: Arc::new(credentials),
            ledger: LoginLedger::new(db.clone(), policy),
            sessions: SessionStore::new(db, session_lifetime),
        }
    }

    /// Create a gateway from configuration.
    ///
    /// Fails with [`AdminError::Config`] when a configured duration is out
    /// of range.
    pub fn from_config(db: Database, config: &Config) -> Result<Self> {
        Ok(Self::new(
            db,
            AdminCredentials::from_config(&config.admin),
            LockoutPolicy::from_config(&config.security)?,
            config.security.session_lifetime()?,
        ))
    }

    /// The login ledger.
    pub fn ledger(&self) -> &LoginLedger {
        &self.ledger
    }

    /// The session store.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Authenticate the administrator and issue a session.
    ///
    /// The lockout check runs before the credentials are looked at. Every
    /// outcome, including a blocked call, is recorded in the ledger before
    /// this returns.
    pub async fn login(
        &self,
        ctx: &RequestContext,
        username: &str,
        password: &str,
        security_code: &str,
    ) -> Result<IssuedSession> {
        let ip = ctx.client_ip.as_str();

        if let LockoutStatus::Locked { failures } = self.ledger.check_lockout(ip).await? {
            self.ledger.record(ip, Some(username), false).await?;
            warn!(ip = %ip, username = %username, failures, "Admin login blocked by lockout");
            return Err(AdminError::RateLimited {
                retry_after_minutes: self.ledger.policy().window_minutes(),
            });
        }

        if !self.credentials.verify(username, password, security_code) {
            self.ledger.record(ip, Some(username), false).await?;
            warn!(ip = %ip, username = %username, "Admin login failed: invalid credentials");
            return Err(AdminError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let issued = self
            .sessions
            .create(Some(ip), ctx.user_agent.as_deref())
            .await?;
        self.ledger.record(ip, Some(username), true).await?;

        info!(ip = %ip, username = %username, "Admin logged in");
        Ok(issued)
    }

    /// Check the presented session without failing on its absence.
    pub async fn verify_session(&self, ctx: &RequestContext) -> Result<bool> {
        Ok(self.session_status(ctx).await?.is_valid())
    }

    /// Session status for the request, `Missing` when no token was sent.
    pub async fn session_status(&self, ctx: &RequestContext) -> Result<SessionStatus> {
        match ctx.session_token.as_deref() {
            Some(token) => self.sessions.validate(token, &ctx.client_ip).await,
            None => Ok(SessionStatus::Missing),
        }
    }

    /// Require a valid session for a protected operation.
    pub async fn require_session(&self, ctx: &RequestContext) -> Result<()> {
        match self.session_status(ctx).await? {
            SessionStatus::Valid => Ok(()),
            _ => Err(AdminError::Unauthorized(UNAUTHORIZED.to_string())),
        }
    }

    /// Revoke the presented session, if any.
    ///
    /// Clearing the client cookie is the caller's job and must happen
    /// whatever this returns.
    pub async fn logout(&self, ctx: &RequestContext) -> Result<()> {
        if let Some(token) = ctx.session_token.as_deref() {
            self.sessions.invalidate(token).await?;
            info!(ip = %ctx.client_ip, "Admin logged out");
        }
        Ok(())
    }

    /// Remove expired sessions and login attempts older than `retention`.
    pub async fn cleanup(&self, now: DateTime<Utc>, retention: Duration) -> Result<CleanupReport> {
        let sessions = self.sessions.purge_expired(now).await?;
        let cutoff = now
            .checked_sub_signed(retention)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let attempts = self.ledger.prune_before(&cutoff).await?;
        Ok(CleanupReport { sessions, attempts })
    }
}

impl std::fmt::Debug for AuthGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGateway")
            .field("credentials", &self.credentials)
            .field("policy", self.ledger.policy())
            .field("session_lifetime", &self.sessions.lifetime())
            .finish()
    }
}
