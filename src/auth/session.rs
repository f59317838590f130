//! Server-side admin sessions.
//!
//! A session is a row keyed by an unguessable token with a fixed lifetime
//! and the IP it was issued to. Sessions are never renewed or updated.
//! Expiry is evaluated lazily on validation; the retention task only
//! reclaims storage.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use super::token::generate_session_token;
use crate::db::{AdminSessionRepository, Database, NewAdminSession};
use crate::Result;

/// Default session lifetime in hours.
pub const SESSION_LIFETIME_HOURS: i64 = 2;

/// A freshly issued session.
#[derive(Clone)]
pub struct IssuedSession {
    /// Session token, to be handed to the client only via cookie.
    pub token: String,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for IssuedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedSession")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Outcome of validating a presented token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Session exists, is unexpired and matches the requesting IP.
    Valid,
    /// No session with that token.
    Missing,
    /// Session exists but has expired.
    Expired,
    /// Session was bound to another IP and has been deleted.
    IpMismatch,
}

impl SessionStatus {
    /// Whether access should be granted.
    pub fn is_valid(&self) -> bool {
        matches!(self, SessionStatus::Valid)
    }
}

/// Issues, validates and revokes admin sessions.
#[derive(Clone)]
pub struct SessionStore {
    db: Database,
    lifetime: Duration,
}

impl SessionStore {
    /// Create a store with the given session lifetime.
    pub fn new(db: Database, lifetime: Duration) -> Self {
        Self { db, lifetime }
    }

    /// Create a store with the default two hour lifetime.
    pub fn with_default_lifetime(db: Database) -> Self {
        Self::new(db, Duration::hours(SESSION_LIFETIME_HOURS))
    }

    /// Session lifetime.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issue a new session bound to `ip` and `user_agent`.
    pub async fn create(&self, ip: Option<&str>, user_agent: Option<&str>) -> Result<IssuedSession> {
        self.create_at(ip, user_agent, Utc::now()).await
    }

    /// Issue a new session as if created at `now`.
    pub async fn create_at(
        &self,
        ip: Option<&str>,
        user_agent: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<IssuedSession> {
        let token = generate_session_token()?;
        let expires_at = now + self.lifetime;

        let repo = AdminSessionRepository::new(self.db.pool());
        let session = repo
            .create(&NewAdminSession {
                session_token: token.clone(),
                created_at: now,
                expires_at,
                ip_address: ip.map(str::to_string),
                user_agent: user_agent.map(str::to_string),
            })
            .await?;

        debug!(session_id = session.id, expires_at = %session.expires_at, "Admin session created");
        Ok(IssuedSession { token, expires_at })
    }

    /// Validate `token` for a request from `request_ip`.
    ///
    /// A session bound to a different IP is deleted before returning
    /// [`SessionStatus::IpMismatch`].
    pub async fn validate(&self, token: &str, request_ip: &str) -> Result<SessionStatus> {
        self.validate_at(token, request_ip, Utc::now()).await
    }

    /// Validate `token` at `now`.
    pub async fn validate_at(
        &self,
        token: &str,
        request_ip: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionStatus> {
        let repo = AdminSessionRepository::new(self.db.pool());
        let Some(session) = repo.get_by_token(token).await? else {
            return Ok(SessionStatus::Missing);
        };

        if session.is_expired_at(&now) {
            return Ok(SessionStatus::Expired);
        }

        if let Some(bound_ip) = session.ip_address.as_deref() {
            if bound_ip != request_ip {
                repo.delete_by_token(token).await?;
                warn!(
                    session_id = session.id,
                    bound_ip = %bound_ip,
                    request_ip = %request_ip,
                    "Admin session presented from a different IP; session revoked"
                );
                return Ok(SessionStatus::IpMismatch);
            }
        }

        Ok(SessionStatus::Valid)
    }

    /// Delete the session for `token`, if any.
    pub async fn invalidate(&self, token: &str) -> Result<()> {
        let removed = AdminSessionRepository::new(self.db.pool())
            .delete_by_token(token)
            .await?;
        debug!(removed, "Admin session invalidated");
        Ok(())
    }

    /// Delete every session that expired before `now`.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        AdminSessionRepository::new(self.db.pool())
            .delete_expired(&now)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::SESSION_TOKEN_LENGTH;
    use crate::datetime::from_db_timestamp;

    async fn store() -> (Database, SessionStore) {
        let db = Database::open_in_memory().await.unwrap();
        let store = SessionStore::with_default_lifetime(db.clone());
        (db, store)
    }

    #[tokio::test]
    async fn test_create_persists_binding() {
        let (db, store) = store().await;
        let issued = store
            .create(Some("1.2.3.4"), Some("Mozilla/5.0"))
            .await
            .unwrap();
        assert_eq!(issued.token.len(), SESSION_TOKEN_LENGTH);

        let row = AdminSessionRepository::new(db.pool())
            .get_by_token(&issued.token)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.ip_address.as_deref(), Some("1.2.3.4"));
        assert_eq!(row.user_agent.as_deref(), Some("Mozilla/5.0"));

        let expires_at = from_db_timestamp(&row.expires_at).unwrap();
        let expected = Utc::now() + Duration::hours(2);
        assert!((expires_at - expected).num_seconds().abs() <= 5);
    }

    #[tokio::test]
    async fn test_validate_valid() {
        let (_db, store) = store().await;
        let issued = store.create(Some("1.2.3.4"), None).await.unwrap();
        assert_eq!(
            store.validate(&issued.token, "1.2.3.4").await.unwrap(),
            SessionStatus::Valid
        );
        // Validation is repeatable while nothing changes
        assert!(store.validate(&issued.token, "1.2.3.4").await.unwrap().is_valid());
    }

    #[tokio::test]
    async fn test_validate_missing() {
        let (_db, store) = store().await;
        assert_eq!(
            store.validate("nope", "1.2.3.4").await.unwrap(),
            SessionStatus::Missing
        );
    }

    #[tokio::test]
    async fn test_ip_mismatch_deletes_session() {
        let (db, store) = store().await;
        let issued = store.create(Some("1.2.3.4"), None).await.unwrap();

        assert_eq!(
            store.validate(&issued.token, "9.9.9.9").await.unwrap(),
            SessionStatus::IpMismatch
        );
        assert!(AdminSessionRepository::new(db.pool())
            .get_by_token(&issued.token)
            .await
            .unwrap()
            .is_none());
        assert_eq!(
            store.validate(&issued.token, "1.2.3.4").await.unwrap(),
            SessionStatus::Missing
        );
    }

    #[tokio::test]
    async fn test_unbound_session_accepts_any_ip() {
        let (_db, store) = store().await;
        let issued = store.create(None, None).await.unwrap();
        assert!(store.validate(&issued.token, "9.9.9.9").await.unwrap().is_valid());
    }

    #[tokio::test]
    async fn test_expired_session_is_invalid_without_deletion() {
        let (db, store) = store().await;
        let issued = store
            .create_at(Some("1.2.3.4"), None, Utc::now() - Duration::hours(3))
            .await
            .unwrap();

        assert_eq!(
            store.validate(&issued.token, "1.2.3.4").await.unwrap(),
            SessionStatus::Expired
        );
        assert!(AdminSessionRepository::new(db.pool())
            .get_by_token(&issued.token)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_expired_session_with_other_ip_is_kept() {
        let (db, store) = store().await;
        let issued = store
            .create_at(Some("1.2.3.4"), None, Utc::now() - Duration::hours(3))
            .await
            .unwrap();

        assert_eq!(
            store.validate(&issued.token, "9.9.9.9").await.unwrap(),
            SessionStatus::Expired
        );
        assert_eq!(AdminSessionRepository::new(db.pool()).count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_validate_at_boundary() {
        let (_db, store) = store().await;
        let created = Utc::now();
        let issued = store.create_at(Some("1.2.3.4"), None, created).await.unwrap();

        let just_before = issued.expires_at - Duration::seconds(1);
        let just_after = issued.expires_at + Duration::seconds(1);
        assert!(store
            .validate_at(&issued.token, "1.2.3.4", just_before)
            .await
            .unwrap()
            .is_valid());
        assert_eq!(
            store
                .validate_at(&issued.token, "1.2.3.4", just_after)
                .await
                .unwrap(),
            SessionStatus::Expired
        );
    }

    #[tokio::test]
    async fn test_invalidate_is_idempotent() {
        let (_db, store) = store().await;
        let issued = store.create(Some("1.2.3.4"), None).await.unwrap();

        store.invalidate(&issued.token).await.unwrap();
        store.invalidate(&issued.token).await.unwrap();
        store.invalidate("never-existed").await.unwrap();
        assert!(!store.validate(&issued.token, "1.2.3.4").await.unwrap().is_valid());
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let (db, store) = store().await;
        store
            .create_at(None, None, Utc::now() - Duration::hours(5))
            .await
            .unwrap();
        store.create(None, None).await.unwrap();

        assert_eq!(store.purge_expired(Utc::now()).await.unwrap(), 1);
        assert_eq!(AdminSessionRepository::new(db.pool()).count().await.unwrap(), 1);
    }

    #[test]
    fn test_issued_session_debug_redacts_token() {
        let issued = IssuedSession {
            token: "abcdef0123".to_string(),
            expires_at: Utc::now(),
        };
        assert!(!format!("{:?}", issued).contains("abcdef0123"));
    }
}
