//! Reusable OpenAPI response types for the error envelope.

use super::ErrorBody;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - one entry per violated rule",
    content_type = "application/json",
    example = json!({
        "errors": [{
            "type": "field",
            "value": "Hola",
            "msg": "Invalid value",
            "path": "price",
            "location": "body"
        }]
    })
)]
pub struct ValidationErrorResponse(pub ErrorBody);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid id",
    content_type = "application/json",
    example = json!({
        "errors": [{
            "type": "field",
            "value": "not-valid-url",
            "msg": "Invalid id",
            "path": "id",
            "location": "params"
        }]
    })
)]
pub struct InvalidIdResponse(pub ErrorBody);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({ "errors": "Product not found" })
)]
pub struct NotFoundResponse(pub ErrorBody);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({ "errors": "An internal server error occurred" })
)]
pub struct InternalServerErrorResponse(pub ErrorBody);
