//! Web API module.
//!
//! This module provides the HTTP surface: admin login, session check,
//! logout, protected content editing and public content.

pub mod cookie;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::{create_app, create_router};
pub use server::WebServer;
