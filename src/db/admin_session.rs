//! Admin session repository.

use chrono::{DateTime, Utc};

use super::DbPool;
use crate::datetime::{from_db_timestamp, to_db_timestamp};
use crate::{AdminError, Result};

/// Admin session entity.
#[derive(Clone, sqlx::FromRow)]
pub struct AdminSession {
    /// Session ID.
    pub id: i64,
    /// Opaque session token.
    pub session_token: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Expiration timestamp.
    pub expires_at: String,
    /// IP the session is bound to.
    pub ip_address: Option<String>,
    /// User agent seen at login.
    pub user_agent: Option<String>,
}

impl AdminSession {
    /// Whether the session has expired at `now`.
    ///
    /// A session expiring exactly at `now` is still valid. An unparseable
    /// expiry counts as expired.
    pub fn is_expired_at(&self, now: &DateTime<Utc>) -> bool {
        match from_db_timestamp(&self.expires_at) {
            Some(expires_at) => expires_at < *now,
            None => true,
        }
    }
}

impl std::fmt::Debug for AdminSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSession")
            .field("id", &self.id)
            .field("session_token", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .field("ip_address", &self.ip_address)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// New admin session for creation.
pub struct NewAdminSession {
    /// Session token.
    pub session_token: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Expiration time.
    pub expires_at: DateTime<Utc>,
    /// Bound IP.
    pub ip_address: Option<String>,
    /// User agent.
    pub user_agent: Option<String>,
}

/// Repository for admin session operations.
pub struct AdminSessionRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> AdminSessionRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new session.
    pub async fn create(&self, new_session: &NewAdminSession) -> Result<AdminSession> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO admin_sessions (session_token, created_at, expires_at, ip_address, user_agent)
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(&new_session.session_token)
        .bind(to_db_timestamp(&new_session.created_at))
        .bind(to_db_timestamp(&new_session.expires_at))
        .bind(&new_session.ip_address)
        .bind(&new_session.user_agent)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| AdminError::Database("admin session vanished after insert".into()))
    }

    /// Get a session by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<AdminSession>> {
        let session = sqlx::query_as::<_, AdminSession>(
            "SELECT id, session_token, created_at, expires_at, ip_address, user_agent
             FROM admin_sessions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(session)
    }

    /// Get a session by token string, expired or not.
    pub async fn get_by_token(&self, token: &str) -> Result<Option<AdminSession>> {
        let session = sqlx::query_as::<_, AdminSession>(
            "SELECT id, session_token, created_at, expires_at, ip_address, user_agent
             FROM admin_sessions WHERE session_token = $1",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(session)
    }

    /// Delete a session by token. Returns whether a row was removed.
    pub async fn delete_by_token(&self, token: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM admin_sessions WHERE session_token = $1")
            .bind(token)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete sessions that expired before `now` (retention cleanup).
    pub async fn delete_expired(&self, now: &DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM admin_sessions WHERE expires_at < $1")
            .bind(to_db_timestamp(now))
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Count stored sessions.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_sessions")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
