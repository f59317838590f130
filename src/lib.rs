//! vedoyh admin backend
//!
//! Administrator authentication, server-side sessions and editable site
//! content for the vedoyh Discord bot website.

pub mod auth;
pub mod config;
pub mod content;
pub mod datetime;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    generate_session_token, hash_secret, AdminCredentials, AuthGateway, IssuedSession,
    LockoutPolicy, LockoutStatus, LoginLedger, RequestContext, SessionStatus, SessionStore,
    SESSION_COOKIE_NAME, SESSION_TOKEN_LENGTH,
};
pub use config::Config;
pub use content::{ContentService, DEFAULT_CONTENT};
pub use db::Database;
pub use error::{AdminError, Result};
pub use web::{create_app, AppState, WebServer};
