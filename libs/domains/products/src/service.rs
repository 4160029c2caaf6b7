use std::sync::Arc;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductId, UpdateProduct};
use crate::repository::ProductRepository;

/// Service layer for Product business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Resolves a product by id or fails with [`ProductError::NotFound`].
    ///
    /// Every id-scoped operation goes through here first.
    pub async fn find_or_fail(&self, id: ProductId) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    pub async fn get_product(&self, id: ProductId) -> ProductResult<Product> {
        self.find_or_fail(id).await
    }

    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Replaces name, price and availability.
    pub async fn update_product(&self, id: ProductId, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let product = self.find_or_fail(id).await?;
        self.repository.update(product.id, input).await
    }

    /// Flips `availability`; nothing else changes.
    pub async fn toggle_availability(&self, id: ProductId) -> ProductResult<Product> {
        let product = self.find_or_fail(id).await?;
        self.repository
            .set_availability(product.id, !product.availability)
            .await
    }

    pub async fn delete_product(&self, id: ProductId) -> ProductResult<()> {
        let product = self.find_or_fail(id).await?;

        if !self.repository.delete(product.id).await? {
            return Err(ProductError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;
    use sea_orm::DbErr;

    fn product(id: ProductId, availability: bool) -> Product {
        let mut product = Product::new(
            id,
            CreateProduct {
                name: "Mouse".into(),
                price: 75.0,
            },
        );
        product.availability = availability;
        product
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .with(eq(2000))
            .times(1)
            .returning(|_| Ok(None));

        let service = ProductService::new(repo);
        let result = service.get_product(2000).await;

        assert!(matches!(result, Err(ProductError::NotFound(id)) if id == "2000"));
    }

    #[tokio::test]
    async fn test_toggle_negates_current_availability() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(product(id, true))));
        repo.expect_set_availability()
            .with(eq(1), eq(false))
            .times(1)
            .returning(|id, availability| Ok(product(id, availability)));

        let service = ProductService::new(repo);
        let toggled = service.toggle_availability(1).await.unwrap();

        assert!(!toggled.availability);
    }

    #[tokio::test]
    async fn test_update_missing_product_never_writes() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_update().never();

        let service = ProductService::new(repo);
        let result = service
            .update_product(
                5,
                UpdateProduct {
                    name: "Monitor".into(),
                    price: 300.0,
                    availability: true,
                },
            )
            .await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_product_never_deletes() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_delete().never();

        let service = ProductService::new(repo);
        assert!(matches!(
            service.delete_product(5).await,
            Err(ProductError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_existing_product() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(Some(product(id, true))));
        repo.expect_delete().with(eq(3)).times(1).returning(|_| Ok(true));

        let service = ProductService::new(repo);
        assert!(service.delete_product(3).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_before_storage() {
        let mut repo = MockProductRepository::new();
        repo.expect_create().never();

        let service = ProductService::new(repo);
        let result = service
            .create_product(CreateProduct {
                name: String::new(),
                price: -1.0,
            })
            .await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let mut repo = MockProductRepository::new();
        repo.expect_list()
            .returning(|| Err(DbErr::Custom("connection reset".into()).into()));

        let service = ProductService::new(repo);
        assert!(matches!(
            service.list_products().await,
            Err(ProductError::Database(_))
        ));
    }
}
