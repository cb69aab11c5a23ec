//! Test Helpers

use rebate::promotions::PromotionKind;
use serde_json::Value;

use crate::{
    domain::{
        carts::{
            CartsService, CartsServiceError,
            data::NewCartItem,
            records::{CartItemRecord, CartItemUuid, OwnerUuid},
        },
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
        promotions::{
            PromotionsService, PromotionsServiceError,
            data::NewPromotion,
            records::{PromotionRecord, PromotionUuid},
        },
    },
    test::TestContext,
};

pub(crate) async fn create_product(
    ctx: &TestContext,
    sku: &str,
    price: u64,
    stock: u64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            sku: sku.to_string(),
            name: format!("Product {sku}"),
            price,
            stock,
        })
        .await
}

pub(crate) async fn add_item(
    ctx: &TestContext,
    owner: OwnerUuid,
    product: ProductUuid,
    quantity: u32,
) -> Result<CartItemRecord, CartsServiceError> {
    ctx.carts
        .add_item(
            owner,
            NewCartItem {
                uuid: CartItemUuid::new(),
                product,
                quantity,
            },
        )
        .await
}

/// Create an active promotion.
pub(crate) async fn create_promotion(
    ctx: &TestContext,
    kind: PromotionKind,
    parameters: Value,
) -> Result<PromotionRecord, PromotionsServiceError> {
    ctx.promotions
        .create_promotion(NewPromotion {
            uuid: PromotionUuid::new(),
            name: format!("{kind} promotion"),
            kind,
            parameters,
            active: true,
        })
        .await
}
