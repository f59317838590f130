//! Web server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::auth::AuthGateway;
use crate::config::Config;
use crate::db::Database;
use crate::{AdminError, Result};

use super::handlers::AppState;
use super::router::create_app;

/// HTTP server for the admin API and public content.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Allowed CORS origins.
    cors_origins: Vec<String>,
    /// Period of the retention cleanup task.
    cleanup_interval: Duration,
    /// How long login attempts are kept.
    attempt_retention: chrono::Duration,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &Config, db: Database) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| AdminError::Config(format!("invalid server address: {e}")))?;

        Ok(Self {
            addr,
            app_state: Arc::new(AppState::from_config(db, config)?),
            cors_origins: config.server.cors_origins.clone(),
            cleanup_interval: config.security.cleanup_interval()?,
            attempt_retention: config.security.attempt_retention()?,
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the retention cleanup background task.
    ///
    /// Removes expired sessions and login attempts past the retention
    /// horizon. Validation never depends on this task.
    fn start_cleanup_task(gateway: AuthGateway, period: Duration, retention: chrono::Duration) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);

            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;

                match gateway.cleanup(chrono::Utc::now(), retention).await {
                    Ok(report) => {
                        if report.sessions > 0 || report.attempts > 0 {
                            tracing::info!(
                                sessions = report.sessions,
                                attempts = report.attempts,
                                "Cleaned up expired sessions and old login attempts"
                            );
                        } else {
                            tracing::debug!("Nothing to clean up");
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Retention cleanup failed");
                    }
                }
            }
        });
    }

    async fn bind(self) -> std::io::Result<(TcpListener, axum::Router)> {
        let router = create_app(self.app_state.clone(), &self.cors_origins);
        let listener = TcpListener::bind(self.addr).await?;

        // Start cleanup after a successful bind
        Self::start_cleanup_task(
            self.app_state.gateway.clone(),
            self.cleanup_interval,
            self.attempt_retention,
        );
        tracing::info!(
            interval_secs = self.cleanup_interval.as_secs(),
            "Retention cleanup task started"
        );

        Ok((listener, router))
    }

    /// Run the web server.
    pub async fn run(self) -> std::io::Result<()> {
        let (listener, router) = self.bind().await?;
        tracing::info!("Web server listening on http://{}", listener.local_addr()?);

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::io::Result<SocketAddr> {
        let (listener, router) = self.bind().await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(
                listener,
                router.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
