//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::products::{
        data::NewProduct,
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
};

/// PostgreSQL-backed product catalogue.
#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    #[tracing::instrument(
        name = "products.service.create_product",
        skip(self, product),
        fields(product_uuid = %product.uuid, sku = %product.sku),
        err
    )]
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_product(&mut tx, &product).await?;

        tx.commit().await?;

        info!(product_uuid = %created.uuid, "created product");

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product with the given details.
    async fn create_product(&self, product: NewProduct)
    -> Result<ProductRecord, ProductsServiceError>;
}
