//! Configuration module for the admin backend.

use serde::Deserialize;
use std::path::Path;

use crate::{AdminError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/vedoyh.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file. Empty disables the file sink.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/vedoyh-admin.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// The single administrative identity.
///
/// The raw secrets only live here until `AdminCredentials` hashes them
/// at startup.
#[derive(Clone, Deserialize)]
pub struct AdminConfig {
    /// Administrator username, compared exactly.
    #[serde(default = "default_admin_username")]
    pub username: String,
    /// Administrator password.
    #[serde(default)]
    pub password: String,
    /// Second factor: a fixed security code.
    #[serde(default)]
    pub security_code: String,
}

fn default_admin_username() -> String {
    "miguelborgeskruger".to_string()
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password: String::new(),
            security_code: String::new(),
        }
    }
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("security_code", &"<redacted>")
            .finish()
    }
}

/// Login throttling, session lifetime and retention settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// Failed attempts from one IP that trigger a lockout.
    #[serde(default = "default_max_login_attempts")]
    pub max_login_attempts: u32,
    /// Rolling window over which failures are counted, in minutes.
    #[serde(default = "default_lockout_minutes")]
    pub lockout_minutes: u64,
    /// Fixed session lifetime, in hours.
    #[serde(default = "default_session_hours")]
    pub session_hours: u64,
    /// Interval of the retention cleanup task in seconds.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,
    /// Login attempts older than this many days are pruned.
    #[serde(default = "default_attempt_retention_days")]
    pub attempt_retention_days: u64,
}

/// Longest accepted lockout window (one day).
pub const MAX_LOCKOUT_MINUTES: u64 = 24 * 60;

/// Longest accepted session lifetime (30 days).
pub const MAX_SESSION_HOURS: u64 = 30 * 24;

/// Longest accepted login attempt retention (10 years).
pub const MAX_ATTEMPT_RETENTION_DAYS: u64 = 3650;

/// Longest accepted cleanup interval (one week).
pub const MAX_CLEANUP_INTERVAL_SECS: u64 = 7 * 24 * 60 * 60;

fn default_max_login_attempts() -> u32 {
    5
}

fn default_lockout_minutes() -> u64 {
    15
}

fn default_session_hours() -> u64 {
    2
}

fn default_cleanup_interval() -> u64 {
    3600 // 1 hour
}

fn default_attempt_retention_days() -> u64 {
    30
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_login_attempts: default_max_login_attempts(),
            lockout_minutes: default_lockout_minutes(),
            session_hours: default_session_hours(),
            cleanup_interval_secs: default_cleanup_interval(),
            attempt_retention_days: default_attempt_retention_days(),
        }
    }
}

impl SecurityConfig {
    /// Rolling lockout window.
    pub fn lockout_window(&self) -> Result<chrono::Duration> {
        let minutes = bounded(
            "security.lockout_minutes",
            self.lockout_minutes,
            MAX_LOCKOUT_MINUTES,
        )?;
        chrono::Duration::try_minutes(minutes)
            .ok_or_else(|| out_of_range("security.lockout_minutes"))
    }

    /// Fixed session lifetime.
    pub fn session_lifetime(&self) -> Result<chrono::Duration> {
        let hours = bounded("security.session_hours", self.session_hours, MAX_SESSION_HOURS)?;
        chrono::Duration::try_hours(hours)
            .ok_or_else(|| out_of_range("security.session_hours"))
    }

    /// How long login attempts are kept.
    pub fn attempt_retention(&self) -> Result<chrono::Duration> {
        let days = bounded(
            "security.attempt_retention_days",
            self.attempt_retention_days,
            MAX_ATTEMPT_RETENTION_DAYS,
        )?;
        chrono::Duration::try_days(days)
            .ok_or_else(|| out_of_range("security.attempt_retention_days"))
    }

    /// Period of the retention cleanup task.
    pub fn cleanup_interval(&self) -> Result<std::time::Duration> {
        let secs = bounded(
            "security.cleanup_interval_secs",
            self.cleanup_interval_secs,
            MAX_CLEANUP_INTERVAL_SECS,
        )?;
        Ok(std::time::Duration::from_secs(secs.unsigned_abs()))
    }
}

/// Check `value` lies in `1..=max`.
fn bounded(name: &str, value: u64, max: u64) -> Result<i64> {
    if value == 0 || value > max {
        return Err(AdminError::Config(format!(
            "{name} must be between 1 and {max}, got {value}"
        )));
    }
    i64::try_from(value).map_err(|_| out_of_range(name))
}

fn out_of_range(name: &str) -> AdminError {
    AdminError::Config(format!("{name} is out of range"))
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Administrator identity.
    #[serde(default)]
    pub admin: AdminConfig,
    /// Security settings.
    #[serde(default)]
    pub security: SecurityConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(AdminError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| AdminError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `VEDOYH_ADMIN_USERNAME`
    /// - `VEDOYH_ADMIN_PASSWORD`
    /// - `VEDOYH_ADMIN_SECURITY_CODE`
    /// - `VEDOYH_DATABASE_PATH`
    pub fn apply_env_overrides(&mut self) {
        let overrides: [(&str, &mut String); 4] = [
            ("VEDOYH_ADMIN_USERNAME", &mut self.admin.username),
            ("VEDOYH_ADMIN_PASSWORD", &mut self.admin.password),
            ("VEDOYH_ADMIN_SECURITY_CODE", &mut self.admin.security_code),
            ("VEDOYH_DATABASE_PATH", &mut self.database.path),
        ];
        for (name, slot) in overrides {
            if let Ok(value) = std::env::var(name) {
                if !value.is_empty() {
                    *slot = value;
                }
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - any admin credential is empty
    /// - a security limit is zero or above its maximum
    pub fn validate(&self) -> Result<()> {
        if self.admin.username.is_empty() {
            return Err(AdminError::Config("admin.username is not set".to_string()));
        }
        if self.admin.password.is_empty() || self.admin.security_code.is_empty() {
            return Err(AdminError::Config(
                "admin.password and admin.security_code must be set in config.toml \
                 or via VEDOYH_ADMIN_PASSWORD / VEDOYH_ADMIN_SECURITY_CODE"
                    .to_string(),
            ));
        }
        if self.security.max_login_attempts == 0 {
            return Err(AdminError::Config(
                "security.max_login_attempts must be at least 1".to_string(),
            ));
        }
        self.security.lockout_window()?;
        self.security.session_lifetime()?;
        self.security.attempt_retention()?;
        self.security.cleanup_interval()?;
        Ok(())
    }
}
