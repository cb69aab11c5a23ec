//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{Span, debug};

use crate::{
    database::Db,
    domain::carts::{
        data::NewCartItem,
        errors::CartsServiceError,
        records::{CartItemRecord, CartRecord, CartUuid, OwnerUuid},
        repositories::{PgCartItemsRepository, PgCartsRepository},
    },
};

/// PostgreSQL-backed owner carts.
#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, owner: OwnerUuid) -> Result<CartRecord, CartsServiceError> {
        if owner.is_nil() {
            return Err(CartsServiceError::InvalidOwnerReference);
        }

        let mut tx = self.db.begin_transaction().await?;

        let mut cart = self
            .carts_repository
            .get_active_cart(&mut tx, owner)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        cart.items.extend(items);

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self, item),
        fields(
            owner_uuid = %owner,
            product_uuid = %item.product,
            cart_uuid = tracing::field::Empty
        ),
        err
    )]
    async fn add_item(
        &self,
        owner: OwnerUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError> {
        if owner.is_nil() {
            return Err(CartsServiceError::InvalidOwnerReference);
        }

        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        // Waits behind a checkout of the same cart, after which a fresh cart is started.
        let cart = match self.carts_repository.lock_active_cart(&mut tx, owner).await? {
            Some(cart) => cart,
            None => {
                debug!("starting a new cart");

                self.carts_repository
                    .create_cart(&mut tx, CartUuid::new(), owner)
                    .await?
            }
        };

        Span::current().record("cart_uuid", tracing::field::display(cart.uuid));

        let item = self
            .items_repository
            .create_cart_item(&mut tx, cart.uuid, &item)
            .await?;

        tx.commit().await?;

        Ok(item)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the owner's active cart with its items.
    async fn get_cart(&self, owner: OwnerUuid) -> Result<CartRecord, CartsServiceError>;

    /// Add an item to the owner's active cart, starting one if needed.
    async fn add_item(
        &self,
        owner: OwnerUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError>;
}
