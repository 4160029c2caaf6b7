//! Validation chains for the product routes and the typed inputs they produce.

use axum_helpers::validation::{FieldCheck, RequestInput, ValidationChain, coerce};
use axum_helpers::{AppError, ValidatedInput};
use serde_json::Value;
use std::sync::LazyLock;

use crate::error::ProductError;
use crate::models::{CreateProduct, ProductId, UpdateProduct};

pub const INVALID_ID: &str = "Invalid id";
pub const NAME_REQUIRED: &str = "Product name cannot be empty";
pub const INVALID_VALUE: &str = "Invalid value";
pub const PRICE_REQUIRED: &str = "Product price cannot be empty";
pub const INVALID_PRICE: &str = "Invalid price";
pub const INVALID_AVAILABILITY: &str = "Invalid availability value";

fn is_positive(value: Option<&Value>) -> bool {
    coerce::to_number(value).is_some_and(|n| n > 0.0)
}

fn id_check() -> FieldCheck {
    FieldCheck::param("id").is_int(INVALID_ID)
}

fn name_check() -> FieldCheck {
    FieldCheck::body("name").not_empty(NAME_REQUIRED)
}

fn price_check() -> FieldCheck {
    FieldCheck::body("price")
        .is_numeric(INVALID_VALUE)
        .not_empty(PRICE_REQUIRED)
        .custom(is_positive, INVALID_PRICE)
}

static ID_RULES: LazyLock<ValidationChain> = LazyLock::new(|| ValidationChain::new().field(id_check()));

static CREATE_RULES: LazyLock<ValidationChain> =
    LazyLock::new(|| ValidationChain::new().field(name_check()).field(price_check()));

static UPDATE_RULES: LazyLock<ValidationChain> = LazyLock::new(|| {
    ValidationChain::new()
        .field(id_check())
        .field(name_check())
        .field(price_check())
        .field(FieldCheck::body("availability").is_boolean(INVALID_AVAILABILITY))
});

/// An integer id that names no possible row (e.g. larger than the key type) can only
/// ever miss, so it is reported as not found.
fn parse_id(input: &RequestInput) -> Result<ProductId, AppError> {
    let raw = coerce::to_text(input.param("id"));
    raw.parse()
        .map_err(|_| ProductError::NotFound(raw.clone()).into())
}

fn parse_price(input: &RequestInput) -> Result<f64, AppError> {
    coerce::to_number(input.body_field("price"))
        .ok_or_else(|| AppError::BadRequest(INVALID_PRICE.to_string()))
}

/// `{id}` path parameter of the single-product routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductIdParam(pub ProductId);

impl ValidatedInput for ProductIdParam {
    fn rules() -> &'static ValidationChain {
        &ID_RULES
    }

    fn from_validated(input: &RequestInput) -> Result<Self, AppError> {
        parse_id(input).map(Self)
    }
}

impl ValidatedInput for CreateProduct {
    fn rules() -> &'static ValidationChain {
        &CREATE_RULES
    }

    fn from_validated(input: &RequestInput) -> Result<Self, AppError> {
        Ok(Self {
            name: coerce::to_text(input.body_field("name")),
            price: parse_price(input)?,
        })
    }
}

/// Path id plus replacement fields of `PUT /api/products/{id}`
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdateRequest {
    pub id: ProductId,
    pub input: UpdateProduct,
}

impl ValidatedInput for ProductUpdateRequest {
    fn rules() -> &'static ValidationChain {
        &UPDATE_RULES
    }

    fn from_validated(input: &RequestInput) -> Result<Self, AppError> {
        let availability = coerce::to_bool(input.body_field("availability"))
            .ok_or_else(|| AppError::BadRequest(INVALID_AVAILABILITY.to_string()))?;

        Ok(Self {
            id: parse_id(input)?,
            input: UpdateProduct {
                name: coerce::to_text(input.body_field("name")),
                price: parse_price(input)?,
                availability,
            },
        })
    }
}
