//! Integer codes attached to every logged error.
//!
//! Clients only ever see the `{ "errors": ... }` envelope; the codes exist so that log
//! queries can group failures without parsing messages.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// A validation chain reported at least one violation
    ValidationError,
    /// Request body is not valid JSON
    MalformedJson,
    NotFound,
    /// Request origin is not the configured frontend
    CorsRejected,
    BadRequest,

    // Server errors
    InternalError,
    ServiceUnavailable,

    // Database errors (2000-2999)
    DatabaseError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::MalformedJson => "MALFORMED_JSON",
            Self::NotFound => "NOT_FOUND",
            Self::CorsRejected => "CORS_REJECTED",
            Self::BadRequest => "BAD_REQUEST",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }

    /// Integer code used in structured logs.
    ///
    /// - 1000-1999: client and server errors
    /// - 2000-2999: database errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::MalformedJson => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::CorsRejected => 1007,
            Self::BadRequest => 1010,
            Self::ServiceUnavailable => 1011,
            Self::DatabaseError => 2003,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::MalformedJson => "Malformed JSON body",
            Self::NotFound => "The requested resource was not found",
            Self::CorsRejected => "Not allowed by CORS",
            Self::BadRequest => "Bad request",
            Self::InternalError | Self::DatabaseError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service temporarily unavailable",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
