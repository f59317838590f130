//! Request DTOs for Web API.

use std::collections::BTreeMap;

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Admin login request.
#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Security code.
    #[validate(length(min = 1, message = "Security code is required"))]
    pub security_code: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("security_code", &"<redacted>")
            .finish()
    }
}

/// Partial content update: content key to new value.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ContentUpdateRequest(pub BTreeMap<String, String>);
