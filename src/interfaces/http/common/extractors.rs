//! Validating extractors for Axum
//!
//! `ValidatedJson<T>` and `ValidatedQuery<T>` work like `axum::Json<T>` /
//! `axum::extract::Query<T>`, but additionally run
//! `validator::Validate::validate()` on the deserialized value. On failure
//! they answer 400 with every field error collected and joined into one
//! string, so a request never reaches its handler partially checked.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Query};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::response::ApiResponse;

/// An extractor that deserializes a JSON body and validates it.
pub struct ValidatedJson<T>(pub T);

/// An extractor that deserializes query parameters and validates them.
pub struct ValidatedQuery<T>(pub T);

/// Error type for validating-extractor failures.
pub enum ValidationRejection {
    /// Payload could not be deserialized at all.
    Malformed(String),
    /// Schema validation failed.
    Invalid(validator::ValidationErrors),
}

fn collect_field_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{:?}", e.code));
                format!("{}: {}", field, msg)
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        let body = match self {
            Self::Malformed(detail) => {
                let mut resp = ApiResponse::<()>::error("Validation failed");
                resp.message = Some(detail);
                resp
            }
            Self::Invalid(errors) => {
                let joined = collect_field_errors(&errors);
                let mut resp = ApiResponse::<()>::error("Validation failed");
                resp.message = Some(if joined.is_empty() {
                    "invalid request".to_string()
                } else {
                    joined
                });
                resp
            }
        };

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ValidationRejection {
    fn from(rejection: JsonRejection) -> Self {
        Self::Malformed(format!("Invalid JSON: {rejection}"))
    }
}

impl From<QueryRejection> for ValidationRejection {
    fn from(rejection: QueryRejection) -> Self {
        Self::Malformed(format!("Invalid query: {rejection}"))
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: axum::extract::Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate().map_err(ValidationRejection::Invalid)?;
        Ok(ValidatedJson(value))
    }
}

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        value.validate().map_err(ValidationRejection::Invalid)?;
        Ok(ValidatedQuery(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::{get, post};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(length(min = 1, max = 10, message = "name must be 1-10 characters"))]
        name: String,
        #[validate(range(min = 0, max = 150, message = "age must be between 0 and 150"))]
        age: i32,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct TestParams {
        #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
        limit: Option<u32>,
    }

    async fn body_handler(ValidatedJson(_body): ValidatedJson<TestBody>) -> &'static str {
        "ok"
    }

    async fn query_handler(ValidatedQuery(_params): ValidatedQuery<TestParams>) -> &'static str {
        "ok"
    }

    fn app() -> Router {
        Router::new()
            .route("/body", post(body_handler))
            .route("/query", get(query_handler))
    }

    async fn send(req: Request<Body>) -> axum::http::Response<Body> {
        use tower::Service;
        let mut svc = app().into_service();
        svc.call(req).await.unwrap()
    }

    #[tokio::test]
    async fn valid_body_returns_ok() {
        let body = serde_json::json!({"name": "Alice", "age": 30});
        let req = Request::builder()
            .method("POST")
            .uri("/body")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();

        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_json_returns_400() {
        let req = Request::builder()
            .method("POST")
            .uri("/body")
            .header("content-type", "application/json")
            .body(Body::from("not json"))
            .unwrap();

        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn validation_failure_collects_all_errors() {
        let body = serde_json::json!({"name": "", "age": 151});
        let req = Request::builder()
            .method("POST")
            .uri("/body")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();

        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Validation failed");
        let message = json["message"].as_str().unwrap();
        assert!(message.contains("name must be 1-10 characters"));
        assert!(message.contains("age must be between 0 and 150"));
    }

    #[tokio::test]
    async fn query_out_of_range_returns_400() {
        let req = Request::builder()
            .method("GET")
            .uri("/query?limit=500")
            .body(Body::empty())
            .unwrap();

        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn query_in_range_returns_ok() {
        let req = Request::builder()
            .method("GET")
            .uri("/query?limit=10")
            .body(Body::empty())
            .unwrap();

        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
