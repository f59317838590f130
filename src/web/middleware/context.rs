//! Request context extraction.
//!
//! Builds the [`RequestContext`] the gateway expects from headers, the
//! session cookie and the connection info.

use std::net::SocketAddr;

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{header::USER_AGENT, request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::{is_secure_proto, resolve_client_ip, RequestContext, SESSION_COOKIE_NAME};

/// Header carrying the original client address behind a proxy.
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Header carrying the original protocol behind a proxy.
pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Extractor yielding the per-request auth context.
///
/// Never rejects: missing pieces become `None`, `false` or `"unknown"`.
#[derive(Debug, Clone)]
pub struct AdminContext(pub RequestContext);

#[async_trait]
impl<S> FromRequestParts<S> for AdminContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(AdminContext(context_from_parts(parts)))
    }
}

/// Build a request context from request parts.
pub fn context_from_parts(parts: &Parts) -> RequestContext {
    let peer_ip = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    let forwarded_for = header_str(&parts.headers, X_FORWARDED_FOR);
    let client_ip = resolve_client_ip(forwarded_for, peer_ip.as_deref());

    let secure_transport = header_str(&parts.headers, X_FORWARDED_PROTO)
        .map(is_secure_proto)
        .unwrap_or(false)
        || parts.uri.scheme_str() == Some("https");

    let session_token = CookieJar::from_headers(&parts.headers)
        .get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty());

    RequestContext {
        client_ip,
        user_agent: header_str(&parts.headers, USER_AGENT.as_str()).map(str::to_string),
        session_token,
        secure_transport,
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(request: Request<()>) -> Parts {
        request.into_parts().0
    }

    #[test]
    fn test_defaults_without_headers() {
        let ctx = context_from_parts(&parts(Request::builder().uri("/").body(()).unwrap()));
        assert_eq!(ctx.client_ip, "unknown");
        assert!(ctx.user_agent.is_none());
        assert!(ctx.session_token.is_none());
        assert!(!ctx.secure_transport);
    }

    #[test]
    fn test_forwarded_for_and_cookie() {
        let request = Request::builder()
            .uri("/")
            .header(X_FORWARDED_FOR, "203.0.113.7, 10.0.0.1")
            .header(USER_AGENT, "curl/8.0")
            .header("cookie", format!("theme=dark; {}=abc123", SESSION_COOKIE_NAME))
            .body(())
            .unwrap();
        let ctx = context_from_parts(&parts(request));
        assert_eq!(ctx.client_ip, "203.0.113.7");
        assert_eq!(ctx.user_agent.as_deref(), Some("curl/8.0"));
        assert_eq!(ctx.session_token.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_connect_info_fallback() {
        let mut request = Request::builder().uri("/").body(()).unwrap();
        let addr: SocketAddr = "192.0.2.10:55000".parse().unwrap();
        request.extensions_mut().insert(ConnectInfo(addr));
        let ctx = context_from_parts(&parts(request));
        assert_eq!(ctx.client_ip, "192.0.2.10");
    }

    #[test]
    fn test_secure_transport_detection() {
        let proxied = Request::builder()
            .uri("/")
            .header(X_FORWARDED_PROTO, "https")
            .body(())
            .unwrap();
        assert!(context_from_parts(&parts(proxied)).secure_transport);

        let absolute = Request::builder()
            .uri("https://example.com/api/admin/login")
            .body(())
            .unwrap();
        assert!(context_from_parts(&parts(absolute)).secure_transport);

        let plain = Request::builder()
            .uri("/")
            .header(X_FORWARDED_PROTO, "http")
            .body(())
            .unwrap();
        assert!(!context_from_parts(&parts(plain)).secure_transport);
    }

    #[test]
    fn test_empty_cookie_is_ignored() {
        let request = Request::builder()
            .uri("/")
            .header("cookie", format!("{}=", SESSION_COOKIE_NAME))
            .body(())
            .unwrap();
        assert!(context_from_parts(&parts(request)).session_token.is_none());
    }
}
