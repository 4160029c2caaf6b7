use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Primary key of a product
pub type ProductId = i32;

/// A product as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Auto-assigned, never changes
    #[schema(example = 1)]
    pub id: ProductId,
    #[schema(example = "PlayStation 5 Controller")]
    pub name: String,
    #[schema(example = 50.0)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/products`. New products are always available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1))]
    #[schema(example = "Xbox Controller")]
    pub name: String,
    #[validate(range(exclusive_min = 0.0))]
    #[schema(example = 75.0)]
    pub price: f64,
}

/// Body of `PUT /api/products/{id}`; every field is replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateProduct {
    #[validate(length(min = 1))]
    #[schema(example = "Xbox Controller")]
    pub name: String,
    #[validate(range(exclusive_min = 0.0))]
    #[schema(example = 75.0)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
}

impl Product {
    /// Builds a fresh record the way storage would on insert.
    pub fn new(id: ProductId, input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: input.name,
            price: input.price,
            availability: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, input: UpdateProduct) {
        self.name = input.name;
        self.price = input.price;
        self.availability = input.availability;
        self.updated_at = Utc::now();
    }

    pub fn set_availability(&mut self, availability: bool) {
        self.availability = availability;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_is_available() {
        let product = Product::new(
            1,
            CreateProduct {
                name: "Mouse".into(),
                price: 75.0,
            },
        );
        assert!(product.availability);
        assert_eq!(product.created_at, product.updated_at);
    }

    #[test]
    fn test_apply_update_replaces_every_field() {
        let mut product = Product::new(
            1,
            CreateProduct {
                name: "Mouse".into(),
                price: 75.0,
            },
        );
        product.apply_update(UpdateProduct {
            name: "Monitor".into(),
            price: 300.0,
            availability: false,
        });

        assert_eq!(product.name, "Monitor");
        assert_eq!(product.price, 300.0);
        assert!(!product.availability);
        assert!(product.updated_at >= product.created_at);
    }

    #[test]
    fn test_validate_rejects_non_positive_price() {
        let input = CreateProduct {
            name: "Mouse".into(),
            price: 0.0,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_serializes_camel_case_timestamps() {
        let product = Product::new(
            3,
            CreateProduct {
                name: "Mouse".into(),
                price: 75.0,
            },
        );
        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["availability"], true);
    }
}
