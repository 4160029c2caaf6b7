use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{CreateProduct, Product, ProductId, UpdateProduct},
    repository::ProductRepository,
};

/// PostgreSQL implementation of ProductRepository
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Writes the set columns of `model` and returns the stored row.
    async fn save(&self, id: ProductId, model: entity::ActiveModel) -> ProductResult<Product> {
        match model.update(&self.db).await {
            Ok(model) => Ok(model.into()),
            Err(DbErr::RecordNotUpdated) => Err(ProductError::NotFound(id.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let now = Utc::now();
        let model = entity::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            price: Set(input.price),
            availability: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: ProductId) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_desc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: ProductId, input: UpdateProduct) -> ProductResult<Product> {
        let model = entity::ActiveModel {
            id: Unchanged(id),
            name: Set(input.name),
            price: Set(input.price),
            availability: Set(input.availability),
            created_at: NotSet,
            updated_at: Set(Utc::now().into()),
        };

        let product = self.save(id, model).await?;
        tracing::info!(product_id = id, "Updated product");
        Ok(product)
    }

    async fn set_availability(&self, id: ProductId, availability: bool) -> ProductResult<Product> {
        let model = entity::ActiveModel {
            id: Unchanged(id),
            name: NotSet,
            price: NotSet,
            availability: Set(availability),
            created_at: NotSet,
            updated_at: Set(Utc::now().into()),
        };

        let product = self.save(id, model).await?;
        tracing::info!(product_id = id, availability, "Changed product availability");
        Ok(product)
    }

    async fn delete(&self, id: ProductId) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
        }

        Ok(result.rows_affected > 0)
    }
}
