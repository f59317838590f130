//! Public content handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use super::AppState;
use crate::web::dto::ContentResponse;

/// GET /api/content - Site content for the public pages.
///
/// Does not require a session. Falls back to the built-in copy when the
/// database cannot be read.
#[utoipa::path(
    get,
    path = "/api/content",
    tag = "content",
    responses(
        (status = 200, description = "Merged site content", body = ContentResponse)
    )
)]
pub async fn get_public_content(State(state): State<Arc<AppState>>) -> Json<ContentResponse> {
    Json(ContentResponse(state.content.load_or_default().await))
}
