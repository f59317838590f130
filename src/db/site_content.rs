//! Site content repository (key-value rows).

use super::DbPool;
use crate::Result;

/// A stored content row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SiteContentEntry {
    /// Content key.
    pub key: String,
    /// Content value.
    pub value: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Repository for site content.
pub struct SiteContentRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> SiteContentRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// List every stored entry.
    pub async fn list(&self) -> Result<Vec<SiteContentEntry>> {
        let entries = sqlx::query_as::<_, SiteContentEntry>(
            "SELECT key, value, updated_at FROM site_content ORDER BY key",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    /// Get one entry by key.
    pub async fn get(&self, key: &str) -> Result<Option<SiteContentEntry>> {
        let entry = sqlx::query_as::<_, SiteContentEntry>(
            "SELECT key, value, updated_at FROM site_content WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(self.pool)
        .await?;

        Ok(entry)
    }

    /// Insert or replace the value for `key`.
    pub async fn upsert(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO site_content (key, value, updated_at) VALUES ($1, $2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    #[tokio::test]
    async fn test_upsert_and_get() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = SiteContentRepository::new(db.pool());

        repo.upsert("botName", "vedoyh").await.unwrap();
        assert_eq!(repo.get("botName").await.unwrap().unwrap().value, "vedoyh");

        repo.upsert("botName", "renamed").await.unwrap();
        assert_eq!(repo.get("botName").await.unwrap().unwrap().value, "renamed");
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = SiteContentRepository::new(db.pool());
        assert!(repo.get("heroTitle").await.unwrap().is_none());
        assert!(repo.list().await.unwrap().is_empty());
    }
}
