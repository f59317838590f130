//! Router configuration for Web API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    get_content, get_public_content, login, logout, update_content, verify_session, AppState,
};
use super::middleware::{create_cors_layer, security_headers};
use super::openapi::ApiDoc;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let admin_routes = Router::new()
        .route("/login", post(login))
        .route("/session", get(verify_session))
        .route("/logout", post(logout))
        .route("/content", get(get_content).put(update_content));

    let api_routes = Router::new()
        .nest("/admin", admin_routes)
        .route("/content", get(get_public_content));

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(security_headers)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create the Swagger UI router serving the OpenAPI document.
pub fn create_swagger_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Create the full application router.
pub fn create_app(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    create_router(app_state, cors_origins)
        .merge(create_health_router())
        .merge(create_swagger_router())
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_health_router() {
        let server = TestServer::new(create_health_router()).unwrap();
        let response = server.get("/health").await;
        response.assert_status_ok();
        response.assert_text("OK");
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let server = TestServer::new(create_swagger_router()).unwrap();
        let response = server.get("/api-docs/openapi.json").await;
        response.assert_status_ok();
        let doc: serde_json::Value = response.json();
        assert!(doc["paths"]["/api/admin/login"].is_object());
    }
}
