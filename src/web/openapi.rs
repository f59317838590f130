//! OpenAPI document.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::SESSION_COOKIE_NAME;
use crate::web::dto::{
    ContentResponse, ContentUpdateRequest, LoginRequest, SessionResponse, SuccessResponse,
};
use crate::web::error::{ErrorBody, ErrorCode, ErrorDetail};
use crate::web::handlers;

/// OpenAPI document for the HTTP API.
#[derive(OpenApi)]
#[openapi(
    info(title = "vedoyh admin API"),
    paths(
        handlers::admin::login,
        handlers::admin::verify_session,
        handlers::admin::logout,
        handlers::admin::get_content,
        handlers::admin::update_content,
        handlers::content::get_public_content,
    ),
    components(schemas(
        LoginRequest,
        ContentUpdateRequest,
        SuccessResponse,
        SessionResponse,
        ContentResponse,
        ErrorBody,
        ErrorDetail,
        ErrorCode,
    )),
    modifiers(&SessionCookieScheme),
    tags(
        (name = "admin", description = "Administrator login and content editing"),
        (name = "content", description = "Public site content")
    )
)]
pub struct ApiDoc;

/// Registers the session cookie as a security scheme.
struct SessionCookieScheme;

impl Modify for SessionCookieScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE_NAME))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_admin_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/admin/login"));
        assert!(paths.contains_key("/api/admin/session"));
        assert!(paths.contains_key("/api/admin/logout"));
        assert!(paths.contains_key("/api/admin/content"));
        assert!(paths.contains_key("/api/content"));
    }

    #[test]
    fn test_openapi_has_cookie_scheme() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains(SESSION_COOKIE_NAME));
    }
}
