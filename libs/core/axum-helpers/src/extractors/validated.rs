//! Extractors that run a [`ValidationChain`] before the handler sees the request.

use crate::errors::AppError;
use crate::validation::{RequestInput, ValidationChain};
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{HeaderMap, header, request::Parts},
};
use serde_json::Value;
use std::collections::HashMap;

/// Typed input assembled from a request that passed its validation chain.
pub trait ValidatedInput: Sized {
    /// Rules checked against the raw request.
    fn rules() -> &'static ValidationChain;

    /// Builds the typed value. Only called when [`Self::rules`] reported no violations.
    fn from_validated(input: &RequestInput) -> Result<Self, AppError>;
}

/// Validates path parameters and the JSON body.
///
/// An empty body, or one sent without a JSON `Content-Type`, reads as `{}` so that missing
/// fields are reported by the rules rather than by the JSON parser. A JSON body that does not
/// parse is rejected with 400 before validation runs.
///
/// ```ignore
/// async fn create(Validated(input): Validated<CreateProduct>) -> Result<Json<...>, AppError> {
///     ...
/// }
/// ```
pub struct Validated<T>(pub T);

impl<T, S> FromRequest<S> for Validated<T>
where
    T: ValidatedInput,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        let params = path_params(&mut parts, state).await;

        if !json_content_type(&parts.headers) {
            return validate(RequestInput::new(params, Value::Object(Default::default())))
                .map(Validated);
        }

        let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
            .await
            .map_err(|e| AppError::BodyRejected {
                status: e.status(),
                message: e.body_text(),
            })?;

        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Object(Default::default())
        } else {
            serde_json::from_slice(&bytes).map_err(|e| AppError::MalformedJson(e.to_string()))?
        };

        validate(RequestInput::new(params, body)).map(Validated)
    }
}

/// Validates path parameters only; the body is never read.
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: ValidatedInput,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = path_params(parts, state).await;
        validate(RequestInput::new(params, Value::Object(Default::default()))).map(ValidatedPath)
    }
}

/// `application/json` or any `application/*+json` media type.
fn json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Routes without captures have no parameters.
async fn path_params<S: Send + Sync>(parts: &mut Parts, state: &S) -> HashMap<String, String> {
    Path::<HashMap<String, String>>::from_request_parts(parts, state)
        .await
        .map(|Path(params)| params)
        .unwrap_or_default()
}

fn validate<T: ValidatedInput>(input: RequestInput) -> Result<T, AppError> {
    let violations = T::rules().run(&input);
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }
    T::from_validated(&input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{FieldCheck, coerce};
    use axum::{
        Json, Router,
        body::Body,
        extract::DefaultBodyLimit,
        http::{StatusCode, header},
        routing::post,
    };
    use http_body_util::BodyExt;
    use serde_json::json;
    use std::sync::LazyLock;
    use tower::ServiceExt;

    struct Rename {
        id: i64,
        name: String,
    }

    static RENAME_RULES: LazyLock<ValidationChain> = LazyLock::new(|| {
        ValidationChain::new()
            .field(FieldCheck::param("id").is_int("Invalid id"))
            .field(FieldCheck::body("name").not_empty("Name cannot be empty"))
    });

    impl ValidatedInput for Rename {
        fn rules() -> &'static ValidationChain {
            &RENAME_RULES
        }

        fn from_validated(input: &RequestInput) -> Result<Self, AppError> {
            let id = coerce::to_text(input.param("id"))
                .parse()
                .map_err(|_| AppError::NotFound("missing".into()))?;
            Ok(Self {
                id,
                name: coerce::to_text(input.body_field("name")),
            })
        }
    }

    async fn rename(Validated(input): Validated<Rename>) -> Json<Value> {
        Json(json!({ "id": input.id, "name": input.name }))
    }

    fn app() -> Router {
        Router::new().route("/items/{id}", post(rename))
    }

    async fn send(uri: &str, body: &'static str) -> (StatusCode, Value) {
        send_as(uri, "application/json", body).await
    }

    async fn send_as(uri: &str, content_type: &str, body: &'static str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap();
        call(app(), request).await
    }

    async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_valid_request_reaches_handler() {
        let (status, body) = send("/items/7", r#"{"name":"Mouse"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "id": 7, "name": "Mouse" }));
    }

    #[tokio::test]
    async fn test_empty_body_reports_missing_fields() {
        let (status, body) = send("/items/abc", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected_before_validation() {
        let (status, body) = send("/items/1", "{name:").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"].as_str().unwrap().starts_with("Malformed JSON body"));
    }

    #[tokio::test]
    async fn test_non_json_content_type_reads_as_empty_object() {
        let (status, body) = send_as("/items/7", "text/plain", r#"{"name":"Mouse"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().unwrap().len(), 1);
        assert_eq!(body["errors"][0]["path"], "name");
    }

    #[tokio::test]
    async fn test_json_media_type_with_parameters() {
        let (status, body) =
            send_as("/items/7", "application/json; charset=utf-8", r#"{"name":"Mouse"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Mouse");

        let (status, _) = send_as("/items/7", "application/merge-patch+json", r#"{"name":"Mouse"}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_oversized_body_keeps_payload_too_large() {
        let app = app().layer(DefaultBodyLimit::max(16));
        let request = Request::builder()
            .method("POST")
            .uri("/items/7")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"a name well past sixteen bytes"}"#))
            .unwrap();

        let (status, body) = call(app, request).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(body["errors"].is_string());
    }
}
