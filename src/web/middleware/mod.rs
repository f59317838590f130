//! Middleware for Web API.

pub mod context;
pub mod cors;
pub mod security;

pub use context::{context_from_parts, AdminContext};
pub use cors::create_cors_layer;
pub use security::security_headers;
