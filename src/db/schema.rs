//! Database schema and migrations.
//!
//! Migrations are applied sequentially when the database is first opened
//! or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script executed in order. The schema_version
/// table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Login attempt ledger (append-only)
    r#"
CREATE TABLE login_attempts (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    ip_address    TEXT NOT NULL,
    attempted_at  TEXT NOT NULL,
    successful    INTEGER NOT NULL DEFAULT 0,
    username      TEXT                       -- submitted username, never secrets
);

CREATE INDEX idx_login_attempts_ip_time ON login_attempts(ip_address, attempted_at);
"#,
    // v2: Admin sessions
    r#"
CREATE TABLE admin_sessions (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    session_token  TEXT NOT NULL UNIQUE,
    created_at     TEXT NOT NULL,
    expires_at     TEXT NOT NULL,
    ip_address     TEXT,                     -- bound at creation
    user_agent     TEXT
);

CREATE INDEX idx_admin_sessions_expires_at ON admin_sessions(expires_at);
"#,
    // v3: Editable site copy
    r#"
CREATE TABLE site_content (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    key         TEXT NOT NULL UNIQUE,
    value       TEXT NOT NULL,
    updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_not_empty() {
        assert!(!MIGRATIONS.is_empty());
    }

    #[test]
    fn test_migrations_are_valid_sql() {
        for migration in MIGRATIONS {
            assert!(!migration.trim().is_empty());
            assert!(migration.contains("CREATE TABLE") || migration.contains("ALTER TABLE"));
        }
    }

    #[test]
    fn test_login_attempts_migration() {
        let migration = MIGRATIONS[0];
        assert!(migration.contains("CREATE TABLE login_attempts"));
        assert!(migration.contains("ip_address"));
        assert!(migration.contains("attempted_at"));
        assert!(migration.contains("successful"));
        assert!(!migration.contains("password"));
    }

    #[test]
    fn test_admin_sessions_migration() {
        let migration = MIGRATIONS[1];
        assert!(migration.contains("CREATE TABLE admin_sessions"));
        assert!(migration.contains("session_token  TEXT NOT NULL UNIQUE"));
        assert!(migration.contains("expires_at"));
        assert!(migration.contains("user_agent"));
    }
}
