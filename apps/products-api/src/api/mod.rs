//! API routes module

pub mod health;

use axum::{Json, Router, routing::get};
use axum_helpers::MessageResponse;
use domain_products::{PgProductRepository, ProductRepository, ProductService, handlers};

use crate::state::AppState;

/// Create all API routes, mounted under `/api` by `create_router`
pub fn routes(state: &AppState) -> Router {
    products(PgProductRepository::new(state.db.clone()))
}

/// Liveness plus the products resource over any repository
pub fn products<R: ProductRepository + 'static>(repository: R) -> Router {
    Router::new()
        .route("/", get(liveness))
        .nest("/products", handlers::router(ProductService::new(repository)))
}

/// Answers as long as the process is up
#[utoipa::path(
    get,
    path = "/api",
    tag = "Status",
    responses(
        (status = 200, description = "API is alive", body = MessageResponse)
    )
)]
pub async fn liveness() -> Json<MessageResponse> {
    Json(MessageResponse::new("From API"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{HeaderValue, Request, StatusCode, header},
    };
    use axum_helpers::server::create_router;
    use core_config::cors::CorsConfig;
    use domain_products::InMemoryProductRepository;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    const FRONTEND: &str = "http://localhost:5173";

    fn app() -> Router {
        let cors = CorsConfig::new(HeaderValue::from_static(FRONTEND));
        create_router::<crate::openapi::ApiDoc>(products(InMemoryProductRepository::new()), &cors)
    }

    async fn call(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_liveness() {
        let (status, body) = call(Request::get("/api").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "msg": "From API" }));
    }

    #[tokio::test]
    async fn test_products_mounted_under_api() {
        let (status, body) = call(Request::get("/api/products").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "data": [] }));
    }

    #[tokio::test]
    async fn test_create_through_full_stack() {
        let request = Request::post("/api/products")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ORIGIN, FRONTEND)
            .body(Body::from(r#"{"name":"Mouse","price":75}"#))
            .unwrap();

        let (status, body) = call(request).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["id"], 1);
    }

    #[tokio::test]
    async fn test_foreign_origin_is_refused() {
        let request = Request::get("/api/products")
            .header(header::ORIGIN, "http://evil.example.com")
            .body(Body::empty())
            .unwrap();

        let (status, body) = call(request).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["errors"], "Not allowed by CORS");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = call(Request::get("/does-not-exist").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errors"], "The requested resource was not found");
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let (status, body) =
            call(Request::get("/api-docs/openapi.json").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["info"]["title"], "Products API");
        assert!(body["paths"].get("/api/products/{id}").is_some());
    }
}
