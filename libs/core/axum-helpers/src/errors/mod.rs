pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::validation::FieldViolation;

/// Body of every failed request.
///
/// `errors` is a plain message for not-found, CORS and server failures, or the list of
/// violations when a validation chain rejects the request:
///
/// ```json
/// { "errors": "Product not found" }
/// { "errors": [{ "type": "field", "value": "", "msg": "Product name cannot be empty", "path": "name", "location": "body" }] }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub errors: ErrorPayload,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ErrorPayload {
    Message(String),
    Violations(Vec<FieldViolation>),
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Validation failed with {} violation(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    #[error("Malformed JSON body: {0}")]
    MalformedJson(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// The body could not be read, e.g. it exceeds the size limit. Keeps the rejection's status.
    #[error("Body rejected ({status}): {message}")]
    BodyRejected { status: StatusCode, message: String },

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::MalformedJson(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::BodyRejected { status, .. } => *status,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Database(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::MalformedJson(_) => ErrorCode::MalformedJson,
            AppError::BadRequest(_) | AppError::BodyRejected { .. } => ErrorCode::BadRequest,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Forbidden(_) => ErrorCode::CorsRejected,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
            AppError::ServiceUnavailable(_) => ErrorCode::ServiceUnavailable,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let payload = match self {
            AppError::Validation(violations) => {
                tracing::info!(
                    error_code = code.code(),
                    violations = violations.len(),
                    "Request rejected by validation"
                );
                ErrorPayload::Violations(violations)
            }
            AppError::MalformedJson(details) => {
                tracing::warn!(error_code = code.code(), "Malformed JSON body: {}", details);
                ErrorPayload::Message(format!("{}: {}", code.default_message(), details))
            }
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = code.code(), "Bad request: {}", msg);
                ErrorPayload::Message(msg)
            }
            AppError::BodyRejected { status, message } => {
                tracing::info!(error_code = code.code(), %status, "Request body rejected: {}", message);
                ErrorPayload::Message(message)
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = code.code(), "Not found: {}", msg);
                ErrorPayload::Message(msg)
            }
            AppError::Forbidden(msg) => {
                tracing::warn!(error_code = code.code(), "Forbidden: {}", msg);
                ErrorPayload::Message(msg)
            }
            AppError::Database(e) => {
                tracing::error!(error_code = code.code(), "Database error: {:?}", e);
                ErrorPayload::Message(code.default_message().to_string())
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(error_code = code.code(), "Internal server error: {}", msg);
                ErrorPayload::Message(code.default_message().to_string())
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(error_code = code.code(), "Service unavailable: {}", msg);
                ErrorPayload::Message(msg)
            }
        };

        (status, Json(ErrorBody { errors: payload })).into_response()
    }
}
