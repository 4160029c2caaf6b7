//! # Axum Helpers
//!
//! Shared HTTP plumbing for the products service.
//!
//! - **[`errors`]**: [`AppError`] and the `{ "errors": ... }` envelope
//! - **[`envelope`]**: the `{ "data": ... }` success envelope
//! - **[`validation`]**: ordered, declarative per-route validation chains
//! - **[`extractors`]**: [`Validated`] and [`ValidatedPath`], which run a chain before the handler
//! - **[`http`]**: CORS, origin gate and security headers
//! - **[`server`]**: router assembly with docs UIs, health endpoints, graceful shutdown

pub mod envelope;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;
pub mod validation;

pub use envelope::{DataResponse, MessageResponse};
pub use errors::{AppError, ErrorBody, ErrorCode, ErrorPayload};
pub use extractors::{Validated, ValidatedInput, ValidatedPath};
pub use http::{create_cors_layer, origin_gate, security_headers};
pub use server::{
    HealthCheckFuture, HealthResponse, ReadyResponse, ShutdownCoordinator, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};
pub use validation::{FieldCheck, FieldViolation, Location, RequestInput, ValidationChain};
