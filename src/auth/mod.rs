//! Admin authentication.
//!
//! This module provides credential verification, the login attempt
//! ledger, server-side sessions and the gateway that composes them.

mod context;
mod credentials;
mod gateway;
mod ledger;
mod session;
mod token;

pub use context::{is_secure_proto, resolve_client_ip, RequestContext, UNKNOWN_IP};
pub use credentials::{hash_secret, AdminCredentials, HASH_HEX_LENGTH};
pub use gateway::{AuthGateway, CleanupReport, INVALID_CREDENTIALS, UNAUTHORIZED};
pub use ledger::{
    LockoutPolicy, LockoutStatus, LoginLedger, LOCKOUT_WINDOW_MINUTES, MAX_FAILED_ATTEMPTS,
};
pub use session::{IssuedSession, SessionStatus, SessionStore, SESSION_LIFETIME_HOURS};
pub use token::{generate_session_token, SESSION_TOKEN_BYTES, SESSION_TOKEN_LENGTH};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "vedoyh_admin_session";
