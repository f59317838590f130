//! Response DTOs for Web API.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

/// Acknowledgement for login, logout and content updates.
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    /// Always true; failures are reported as errors.
    pub success: bool,
}

impl SuccessResponse {
    /// A successful acknowledgement.
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Session check result.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    /// Whether the presented session is valid.
    pub valid: bool,
}

/// Site content keyed by content key.
#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ContentResponse(pub BTreeMap<String, String>);
