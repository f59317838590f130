//! Shared helpers for HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestResponse, TestServer};
use serde_json::json;

use vedoyh_admin::{Config, Database, SESSION_COOKIE_NAME};

pub const ADMIN_USERNAME: &str = "miguelborgeskruger";
pub const ADMIN_PASSWORD: &str = "test-password-123";
pub const ADMIN_SECURITY_CODE: &str = "99887766";

pub const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");
pub const X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");

/// Configuration with known admin secrets.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.admin.username = ADMIN_USERNAME.to_string();
    config.admin.password = ADMIN_PASSWORD.to_string();
    config.admin.security_code = ADMIN_SECURITY_CODE.to_string();
    config
}

/// Create a test server over a fresh in-memory database.
pub async fn create_test_server() -> (TestServer, Database) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let config = test_config();

    let state = Arc::new(
        vedoyh_admin::AppState::from_config(db.clone(), &config)
            .expect("Failed to create app state"),
    );
    let router = vedoyh_admin::create_app(state, &config.server.cors_origins);
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, db)
}

pub fn ip(value: &str) -> HeaderValue {
    HeaderValue::from_str(value).expect("valid header value")
}

pub fn session_cookie_header(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("{}={}", SESSION_COOKIE_NAME, token)).expect("valid cookie")
}

/// POST a login from `client_ip`.
pub async fn login_from(
    server: &TestServer,
    client_ip: &str,
    username: &str,
    password: &str,
    security_code: &str,
) -> TestResponse {
    server
        .post("/api/admin/login")
        .add_header(X_FORWARDED_FOR, ip(client_ip))
        .json(&json!({
            "username": username,
            "password": password,
            "securityCode": security_code,
        }))
        .await
}

/// Log in with the correct credentials and return the session token.
pub async fn login_ok(server: &TestServer, client_ip: &str) -> String {
    let response = login_from(
        server,
        client_ip,
        ADMIN_USERNAME,
        ADMIN_PASSWORD,
        ADMIN_SECURITY_CODE,
    )
    .await;
    response.assert_status_ok();
    session_token_from(&response).expect("login response sets the session cookie")
}

/// The raw `Set-Cookie` header for the session cookie, if any.
pub fn session_set_cookie(response: &TestResponse) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(&format!("{}=", SESSION_COOKIE_NAME)))
        .map(str::to_string)
}

/// The session token set by a response, if any.
pub fn session_token_from(response: &TestResponse) -> Option<String> {
    let header = session_set_cookie(response)?;
    let pair = header.split(';').next()?;
    let value = pair.split_once('=')?.1;
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// GET the session check with a cookie from `client_ip`.
pub async fn verify_from(server: &TestServer, client_ip: &str, token: &str) -> bool {
    let response = server
        .get("/api/admin/session")
        .add_header(X_FORWARDED_FOR, ip(client_ip))
        .add_header(COOKIE, session_cookie_header(token))
        .await;
    response.assert_status_ok();
    response.json::<serde_json::Value>()["valid"]
        .as_bool()
        .expect("valid is a bool")
}
