//! Session cookie construction.

use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::auth::SESSION_COOKIE_NAME;

fn base_cookie(value: String, secure: bool) -> Cookie<'static> {
    // Cross-site delivery requires Secure; plain http falls back to Lax
    let same_site = if secure { SameSite::None } else { SameSite::Lax };
    Cookie::build((SESSION_COOKIE_NAME, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(same_site)
        .build()
}

/// Cookie carrying a freshly issued session token.
pub fn session_cookie(token: String, secure: bool, max_age: chrono::Duration) -> Cookie<'static> {
    let mut cookie = base_cookie(token, secure);
    cookie.set_max_age(time::Duration::seconds(max_age.num_seconds()));
    cookie
}

/// Cookie that clears the session cookie on the client.
pub fn clear_session_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = base_cookie(String::new(), secure);
    cookie.make_removal();
    cookie
}
