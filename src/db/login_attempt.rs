//! Login attempt repository.
//!
//! The table is an append-only audit log: rows are inserted on every login
//! call and only removed by retention pruning.

use chrono::{DateTime, Utc};

use super::DbPool;
use crate::datetime::to_db_timestamp;
use crate::Result;

/// A recorded login attempt.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LoginAttempt {
    /// Attempt ID.
    pub id: i64,
    /// Client IP the attempt came from.
    pub ip_address: String,
    /// When the attempt was made (UTC, storage layout).
    pub attempted_at: String,
    /// Whether the attempt authenticated.
    pub successful: bool,
    /// Username submitted with the attempt.
    pub username: Option<String>,
}

/// New login attempt for insertion.
#[derive(Debug, Clone)]
pub struct NewLoginAttempt {
    /// Client IP.
    pub ip_address: String,
    /// Submitted username.
    pub username: Option<String>,
    /// Outcome.
    pub successful: bool,
    /// Attempt time.
    pub attempted_at: DateTime<Utc>,
}

impl NewLoginAttempt {
    /// A failed attempt happening now.
    pub fn failed(ip_address: impl Into<String>, username: Option<&str>) -> Self {
        Self {
            ip_address: ip_address.into(),
            username: username.map(str::to_string),
            successful: false,
            attempted_at: Utc::now(),
        }
    }

    /// A successful attempt happening now.
    pub fn succeeded(ip_address: impl Into<String>, username: Option<&str>) -> Self {
        Self {
            successful: true,
            ..Self::failed(ip_address, username)
        }
    }

    /// Override the attempt time.
    pub fn at(mut self, attempted_at: DateTime<Utc>) -> Self {
        self.attempted_at = attempted_at;
        self
    }
}

/// Repository for login attempt operations.
pub struct LoginAttemptRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> LoginAttemptRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Append an attempt and return its ID.
    pub async fn record(&self, attempt: &NewLoginAttempt) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO login_attempts (ip_address, attempted_at, successful, username)
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&attempt.ip_address)
        .bind(to_db_timestamp(&attempt.attempted_at))
        .bind(attempt.successful)
        .bind(&attempt.username)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Count failed attempts from `ip_address` made at or after `since`.
    pub async fn count_failures_since(
        &self,
        ip_address: &str,
        since: &DateTime<Utc>,
    ) -> Result<u32> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM login_attempts
             WHERE ip_address = $1 AND successful = 0 AND attempted_at >= $2",
        )
        .bind(ip_address)
        .bind(to_db_timestamp(since))
        .fetch_one(self.pool)
        .await?;

        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    /// List attempts from an IP, newest first.
    pub async fn list_by_ip(&self, ip_address: &str) -> Result<Vec<LoginAttempt>> {
        let attempts = sqlx::query_as::<_, LoginAttempt>(
            "SELECT id, ip_address, attempted_at, successful, username
             FROM login_attempts WHERE ip_address = $1
             ORDER BY attempted_at DESC, id DESC",
        )
        .bind(ip_address)
        .fetch_all(self.pool)
        .await?;

        Ok(attempts)
    }

    /// Delete attempts older than `cutoff` (retention pruning).
    pub async fn delete_older_than(&self, cutoff: &DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM login_attempts WHERE attempted_at < $1")
            .bind(to_db_timestamp(cutoff))
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
