//! API error model
//!
//! Handlers return `Result<_, ApiError>`; the `IntoResponse` impl is the
//! single stage translating failures into the response envelope. Internal
//! detail is logged server-side and only echoed to clients in debug builds.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use super::response::ApiResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request payload or query failed schema validation (400)
    #[error("{0}")]
    Validation(String),

    /// Missing/invalid credentials or token (401)
    #[error("{0}")]
    Unauthenticated(String),

    /// Authenticated but not the resource owner (403)
    #[error("{0}")]
    Forbidden(String),

    /// Resource absent, or owner mismatch where the route collapses it (404)
    #[error("{0}")]
    NotFound(String),

    /// Duplicate unique key (409)
    #[error("{0}")]
    Conflict(String),

    /// Unexpected failure (500)
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Internal(format!("database error: {e}"))
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(e: bcrypt::BcryptError) -> Self {
        Self::Internal(format!("password hashing error: {e}"))
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Internal(format!("token error: {e}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = if let Self::Internal(ref detail) = self {
            tracing::error!(status = %status, "{detail}");
            if cfg!(debug_assertions) {
                ApiResponse::<()>::error(detail.clone())
            } else {
                ApiResponse::<()>::error("Internal Server Error")
            }
        } else {
            ApiResponse::<()>::error(self.to_string())
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_error_kinds() {
        assert_eq!(
            ApiError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthenticated("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
