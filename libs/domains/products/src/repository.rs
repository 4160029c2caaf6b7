use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductId, UpdateProduct};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product; storage assigns the id and `availability` starts as true
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    async fn get_by_id(&self, id: ProductId) -> ProductResult<Option<Product>>;

    /// All products, highest id first
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Replace name, price and availability
    async fn update(&self, id: ProductId, input: UpdateProduct) -> ProductResult<Product>;

    async fn set_availability(&self, id: ProductId, availability: bool) -> ProductResult<Product>;

    /// Returns false when nothing was deleted
    async fn delete(&self, id: ProductId) -> ProductResult<bool>;
}

#[derive(Debug, Default)]
struct Store {
    products: BTreeMap<ProductId, Product>,
    last_id: ProductId,
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        let id = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| ProductError::Internal("product id sequence exhausted".to_string()))?;
        store.last_id = id;

        let product = Product::new(id, input);
        store.products.insert(id, product.clone());

        tracing::info!(product_id = id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: ProductId) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        Ok(store.products.values().rev().cloned().collect())
    }

    async fn update(&self, id: ProductId, input: UpdateProduct) -> ProductResult<Product> {
        let mut store = self.store.write().await;
        let product = store
            .products
            .get_mut(&id)
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;

        product.apply_update(input);

        tracing::info!(product_id = id, "Updated product");
        Ok(product.clone())
    }

    async fn set_availability(&self, id: ProductId, availability: bool) -> ProductResult<Product> {
        let mut store = self.store.write().await;
        let product = store
            .products
            .get_mut(&id)
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;

        product.set_availability(availability);

        tracing::info!(product_id = id, availability, "Changed product availability");
        Ok(product.clone())
    }

    async fn delete(&self, id: ProductId) -> ProductResult<bool> {
        let mut store = self.store.write().await;
        let deleted = store.products.remove(&id).is_some();

        if deleted {
            tracing::info!(product_id = id, "Deleted product");
        }

        Ok(deleted)
    }
}
