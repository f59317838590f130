//! Per-request authentication context.
//!
//! Extracted once at the HTTP edge and passed explicitly into the gateway.

/// IP recorded when no source address can be determined.
pub const UNKNOWN_IP: &str = "unknown";

/// What the gateway needs to know about the calling request.
#[derive(Clone, Default)]
pub struct RequestContext {
    /// Resolved client IP, or [`UNKNOWN_IP`].
    pub client_ip: String,
    /// `User-Agent` header, if any.
    pub user_agent: Option<String>,
    /// Session cookie value, if presented.
    pub session_token: Option<String>,
    /// Whether the request arrived over an encrypted transport.
    pub secure_transport: bool,
}

impl RequestContext {
    /// Context for a request from `client_ip` with nothing else attached.
    pub fn new(client_ip: impl Into<String>) -> Self {
        Self {
            client_ip: client_ip.into(),
            ..Self::default()
        }
    }

    /// Attach a session token.
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Attach a user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Mark the request as secure.
    pub fn with_secure_transport(mut self, secure: bool) -> Self {
        self.secure_transport = secure;
        self
    }
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("client_ip", &self.client_ip)
            .field("user_agent", &self.user_agent)
            .field("has_session_token", &self.session_token.is_some())
            .field("secure_transport", &self.secure_transport)
            .finish()
    }
}

/// Resolve the client IP.
///
/// A non-empty `X-Forwarded-For` value wins: its first entry, trimmed, or
/// [`UNKNOWN_IP`] when that entry is blank. Otherwise the peer address is
/// used, then [`UNKNOWN_IP`].
pub fn resolve_client_ip(forwarded_for: Option<&str>, peer_ip: Option<&str>) -> String {
    if let Some(forwarded) = forwarded_for.filter(|value| !value.is_empty()) {
        let first = forwarded.split(',').next().unwrap_or("").trim();
        if first.is_empty() {
            return UNKNOWN_IP.to_string();
        }
        return first.to_string();
    }

    match peer_ip.filter(|ip| !ip.is_empty()) {
        Some(ip) => ip.to_string(),
        None => UNKNOWN_IP.to_string(),
    }
}

/// Whether a forwarded protocol value denotes https.
///
/// Only the first entry of a comma-separated list is considered.
pub fn is_secure_proto(forwarded_proto: &str) -> bool {
    forwarded_proto
        .split(',')
        .next()
        .map(|proto| proto.trim().eq_ignore_ascii_case("https"))
        .unwrap_or(false)
}
