//! Admin authentication and protected content handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;

use super::{run_detached, AppState};
use crate::web::cookie::{clear_session_cookie, session_cookie};
use crate::web::dto::{
    ApiJson, ContentResponse, ContentUpdateRequest, LoginRequest, SessionResponse,
    SuccessResponse, ValidatedJson,
};
use crate::web::error::{ApiError, ErrorBody};
use crate::web::middleware::AdminContext;

/// POST /api/admin/login - Administrator login.
///
/// Sets the session cookie on success. The token never appears in the body.
#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = "admin",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookie set", body = SuccessResponse),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 422, description = "Missing field", body = ErrorBody),
        (status = 429, description = "Too many failed attempts from this IP", body = ErrorBody),
        (status = 500, description = "Persistence unavailable", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    AdminContext(ctx): AdminContext,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<SuccessResponse>), ApiError> {
    let gateway = state.gateway.clone();
    let secure = ctx.secure_transport;
    let lifetime = gateway.sessions().lifetime();

    let issued = run_detached(async move {
        gateway
            .login(&ctx, &req.username, &req.password, &req.security_code)
            .await
    })
    .await?;

    let jar = jar.add(session_cookie(issued.token, secure, lifetime));
    Ok((jar, Json(SuccessResponse::ok())))
}

/// GET /api/admin/session - Check the presented session.
///
/// Never fails; any problem reads as an invalid session.
#[utoipa::path(
    get,
    path = "/api/admin/session",
    tag = "admin",
    responses(
        (status = 200, description = "Session status", body = SessionResponse)
    )
)]
pub async fn verify_session(
    State(state): State<Arc<AppState>>,
    AdminContext(ctx): AdminContext,
) -> Json<SessionResponse> {
    let gateway = state.gateway.clone();
    let valid = match run_detached(async move { gateway.verify_session(&ctx).await }).await {
        Ok(valid) => valid,
        Err(e) => {
            tracing::warn!("Session check failed, reporting invalid: {}", e);
            false
        }
    };
    Json(SessionResponse { valid })
}

/// POST /api/admin/logout - End the session.
///
/// The cookie is cleared even when no session existed or revocation failed.
#[utoipa::path(
    post,
    path = "/api/admin/logout",
    tag = "admin",
    responses(
        (status = 200, description = "Logged out; cookie cleared", body = SuccessResponse),
        (status = 500, description = "Persistence unavailable; cookie still cleared", body = ErrorBody)
    )
)]
pub async fn logout(
    State(state): State<Arc<AppState>>,
    AdminContext(ctx): AdminContext,
    jar: CookieJar,
) -> Response {
    let gateway = state.gateway.clone();
    let secure = ctx.secure_transport;
    let result = run_detached(async move { gateway.logout(&ctx).await }).await;

    let jar = jar.add(clear_session_cookie(secure));
    match result {
        Ok(()) => (jar, Json(SuccessResponse::ok())).into_response(),
        Err(e) => (jar, e).into_response(),
    }
}

/// GET /api/admin/content - Site content for the editor.
#[utoipa::path(
    get,
    path = "/api/admin/content",
    tag = "admin",
    responses(
        (status = 200, description = "Merged site content", body = ContentResponse),
        (status = 401, description = "No valid session", body = ErrorBody)
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn get_content(
    State(state): State<Arc<AppState>>,
    AdminContext(ctx): AdminContext,
) -> Result<Json<ContentResponse>, ApiError> {
    let gateway = state.gateway.clone();
    run_detached(async move { gateway.require_session(&ctx).await }).await?;

    let content = state.content.load_or_default().await;
    Ok(Json(ContentResponse(content)))
}

/// PUT /api/admin/content - Update site content.
///
/// Unknown keys and empty values are ignored.
#[utoipa::path(
    put,
    path = "/api/admin/content",
    tag = "admin",
    request_body = ContentUpdateRequest,
    responses(
        (status = 200, description = "Content updated", body = SuccessResponse),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 401, description = "No valid session", body = ErrorBody),
        (status = 500, description = "Persistence unavailable", body = ErrorBody)
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn update_content(
    State(state): State<Arc<AppState>>,
    AdminContext(ctx): AdminContext,
    ApiJson(ContentUpdateRequest(changes)): ApiJson<ContentUpdateRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let gateway = state.gateway.clone();
    let content = state.content.clone();

    let written = run_detached(async move {
        gateway.require_session(&ctx).await?;
        content.update(&changes).await
    })
    .await?;

    tracing::info!(written, "Site content updated");
    Ok(Json(SuccessResponse::ok()))
}
