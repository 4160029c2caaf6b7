use crate::errors::{AppError, ErrorCode};
use axum::{
    extract::{Request, State},
    http::{HeaderName, Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use core_config::cors::CorsConfig;
use std::time::Duration;
use tower_http::cors::CorsLayer;

/// CORS headers for the single configured frontend origin.
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(config.allowed_origin.clone())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-requested-with"),
        ])
        .max_age(Duration::from_secs(3600))
}

/// Refuses cross-origin requests from anywhere but the configured frontend.
///
/// `CorsLayer` only decides which response headers to send, so a foreign origin would
/// still reach the handlers. Requests without an `Origin` header pass through.
pub async fn origin_gate(
    State(config): State<CorsConfig>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(header::ORIGIN) {
        if !config.allows(origin) {
            tracing::warn!(
                origin = ?origin,
                method = %request.method(),
                path = %request.uri().path(),
                "Rejected request from disallowed origin"
            );
            return AppError::Forbidden(ErrorCode::CorsRejected.default_message().to_string())
                .into_response();
        }
    }

    next.run(request).await
}
