//! JSON extraction with API error rejections.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::web::error::ApiError;

/// A JSON extractor whose rejection uses the API error envelope.
///
/// Malformed JSON is rejected with 400.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e)))?;
        Ok(ApiJson(value))
    }
}

/// A JSON extractor that validates the request body.
///
/// Malformed JSON is rejected with 400. A body that parses but fails
/// validation is rejected with 422 and field-level details.
///
/// # Example
///
/// ```ignore
/// use vedoyh_admin::web::dto::ValidatedJson;
///
/// async fn login(
///     ValidatedJson(payload): ValidatedJson<LoginRequest>,
/// ) -> Result<Json<SuccessResponse>, ApiError> {
///     // payload is already validated
///     // ...
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let ApiJson(value) = ApiJson::<T>::from_request(req, state).await?;

        value.validate().map_err(ApiError::from_validation_errors)?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::dto::{ContentUpdateRequest, LoginRequest};
    use crate::web::error::ErrorCode;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let req = json_request(r#"{"username":"a","password":"b","securityCode":"c"}"#);
        let ValidatedJson(login) = ValidatedJson::<LoginRequest>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(login.username, "a");
    }

    #[tokio::test]
    async fn test_invalid_json_is_bad_request() {
        let req = json_request(r#"{"username":"a""#);
        let err = ValidatedJson::<LoginRequest>::from_request(req, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.code(), ErrorCode::BadRequest);
    }

    #[tokio::test]
    async fn test_empty_field_is_validation_error() {
        let req = json_request(r#"{"username":"a","password":"","securityCode":"c"}"#);
        let err = ValidatedJson::<LoginRequest>::from_request(req, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_plain_json_rejection_uses_api_error() {
        let req = json_request(r#"{"heroTitle": 42"#);
        let err = ApiJson::<ContentUpdateRequest>::from_request(req, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.code(), ErrorCode::BadRequest);
    }

    #[tokio::test]
    async fn test_plain_json_accepts_map() {
        let req = json_request(r#"{"heroTitle":"Olá"}"#);
        let ApiJson(ContentUpdateRequest(changes)) =
            ApiJson::<ContentUpdateRequest>::from_request(req, &())
                .await
                .unwrap();
        assert_eq!(changes["heroTitle"], "Olá");
    }
}
