//! API handlers.

pub mod admin;
pub mod content;

pub use admin::*;
pub use content::*;

use std::future::Future;

use crate::auth::AuthGateway;
use crate::config::Config;
use crate::content::ContentService;
use crate::db::Database;
use crate::web::error::ApiError;
use crate::AdminError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Login, session and logout orchestration.
    pub gateway: AuthGateway,
    /// Site copy.
    pub content: ContentService,
}

impl AppState {
    /// Create the state from its services.
    pub fn new(gateway: AuthGateway, content: ContentService) -> Self {
        Self { gateway, content }
    }

    /// Create the state over `db` using `config`.
    pub fn from_config(db: Database, config: &Config) -> Result<Self, AdminError> {
        Ok(Self::new(
            AuthGateway::from_config(db.clone(), config)?,
            ContentService::new(db),
        ))
    }
}

/// Run `operation` on its own task and wait for it.
///
/// If the client goes away the handler future is dropped, but the spawned
/// task still finishes, so audit rows and session deletions are not lost.
pub(crate) async fn run_detached<F, T>(operation: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, AdminError>> + Send + 'static,
    T: Send + 'static,
{
    match tokio::spawn(operation).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(e) => {
            tracing::error!("Detached task failed: {}", e);
            Err(ApiError::internal("An internal error occurred"))
        }
    }
}
