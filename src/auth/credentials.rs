//! Fixed administrator credentials.
//!
//! Secrets are hashed with SHA-256 once when the credentials are built and
//! only the lowercase hex digests are retained.

use sha2::{Digest, Sha256};

use crate::config::AdminConfig;

/// Length of a hex-encoded SHA-256 digest.
pub const HASH_HEX_LENGTH: usize = 64;

/// Hash a secret with SHA-256 and render it as lowercase hex.
///
/// # Examples
///
/// ```
/// use vedoyh_admin::hash_secret;
///
/// let hash = hash_secret("hunter2");
/// assert_eq!(hash.len(), 64);
/// assert_eq!(hash, hash_secret("hunter2"));
/// ```
pub fn hash_secret(secret: &str) -> String {
    hex::encode(Sha256::digest(secret.as_bytes()))
}

/// The single administrative identity.
///
/// Immutable after construction; shared between requests by reference.
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password_hash: String,
    security_code_hash: String,
}

impl AdminCredentials {
    /// Build credentials from raw secrets, hashing them immediately.
    pub fn new(username: impl Into<String>, password: &str, security_code: &str) -> Self {
        Self::from_hashes(username, hash_secret(password), hash_secret(security_code))
    }

    /// Build credentials from precomputed hex digests.
    pub fn from_hashes(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        security_code_hash: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into().to_ascii_lowercase(),
            security_code_hash: security_code_hash.into().to_ascii_lowercase(),
        }
    }

    /// Build credentials from the `[admin]` config section.
    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(&config.username, &config.password, &config.security_code)
    }

    /// The configured username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Check a login submission.
    ///
    /// True only when the username matches exactly and both secrets hash to
    /// the stored digests. All three comparisons are always evaluated.
    pub fn verify(&self, username: &str, password: &str, security_code: &str) -> bool {
        let username_ok = username == self.username;
        let password_ok = hash_secret(password) == self.password_hash;
        let code_ok = hash_secret(security_code) == self.security_code_hash;
        username_ok & password_ok & code_ok
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("security_code_hash", &"<redacted>")
            .finish()
    }
}
