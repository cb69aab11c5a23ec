//! Checkouts service.
//!
//! Converts a cart into a checkout in a single transaction: lock the cart, check stock, price it
//! against the active promotions, write the checkout and clear the cart. Any failure before the
//! commit leaves the cart untouched.

use async_trait::async_trait;
use mockall::automock;
use rebate::{
    allocation::AllocationStrategy,
    cart::CartLine,
    pricing::{PricedCart, price_cart},
    promotions::PromotionDefinition,
};
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use sqlx::{Postgres, Transaction};
use tracing::{Span, info, warn};

use crate::{
    database::Db,
    domain::{
        carts::{
            records::{CartItemRecord, CartRecord, CartUuid, OwnerUuid},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        checkouts::{
            data::NewCheckout,
            errors::CheckoutsServiceError,
            records::{CartPricing, CheckoutRecord, CheckoutStatus, CheckoutUuid},
            repository::PgCheckoutsRepository,
        },
        products::repository::PgProductsRepository,
        promotions::repository::PgPromotionsRepository,
    },
};

/// PostgreSQL-backed checkout orchestrator.
#[derive(Debug, Clone)]
pub struct PgCheckoutsService {
    db: Db,
    currency: &'static Currency,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
    promotions_repository: PgPromotionsRepository,
    checkouts_repository: PgCheckoutsRepository,
}

impl PgCheckoutsService {
    /// Service pricing carts in `currency`.
    #[must_use]
    pub fn new(db: Db, currency: &'static Currency) -> Self {
        Self {
            db,
            currency,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
            promotions_repository: PgPromotionsRepository::new(),
            checkouts_repository: PgCheckoutsRepository::new(),
        }
    }

    /// Check out a cart already locked by `tx`.
    async fn checkout_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: &CartRecord,
        strategy: AllocationStrategy,
    ) -> Result<CheckoutRecord, CheckoutsServiceError> {
        let items = self.items_repository.get_cart_items(tx, cart.uuid).await?;

        if items.is_empty() {
            return Err(CheckoutsServiceError::EmptyCart);
        }

        self.ensure_stock(tx, &items).await?;

        let priced = self.price_items(tx, &items, strategy).await?;
        let pricing = CartPricing::from_priced(cart.owner, cart.uuid, &priced)?;

        let checkout = NewCheckout {
            uuid: CheckoutUuid::new(),
            source_cart: cart.uuid,
            owner: cart.owner,
            currency: pricing.currency,
            lines: pricing.lines,
            promotions: pricing.promotions,
            subtotal: pricing.subtotal,
            total_discount: pricing.total_discount,
            total: pricing.total,
        };

        Span::current().record("checkout_uuid", tracing::field::display(checkout.uuid));

        let created = self
            .checkouts_repository
            .create_checkout(tx, &checkout)
            .await?;

        self.items_repository
            .delete_cart_items(tx, cart.uuid)
            .await?;

        self.carts_repository.delete_cart(tx, cart.uuid).await?;

        let completed = self
            .checkouts_repository
            .update_checkout_status(tx, created.uuid, CheckoutStatus::Completed)
            .await?;

        Ok(CheckoutRecord {
            lines: created.lines,
            promotions: created.promotions,
            ..completed
        })
    }

    /// Fail with the first SKU, by name, whose requested quantity exceeds its stock.
    async fn ensure_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        items: &[CartItemRecord],
    ) -> Result<(), CheckoutsServiceError> {
        let mut requested: FxHashMap<&str, u64> = FxHashMap::default();

        for item in items {
            *requested.entry(item.sku.as_str()).or_default() += u64::from(item.quantity);
        }

        let requested: Vec<(String, u64)> = requested
            .into_iter()
            .map(|(sku, quantity)| (sku.to_string(), quantity))
            .collect();

        let short = self
            .products_repository
            .find_short_stock(tx, &requested)
            .await?;

        match short.into_iter().next() {
            Some(sku) => Err(CheckoutsServiceError::InsufficientStock { sku }),
            None => Ok(()),
        }
    }

    /// Price cart items against the currently active promotions.
    async fn price_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        items: &[CartItemRecord],
        strategy: AllocationStrategy,
    ) -> Result<PricedCart<'static>, CheckoutsServiceError> {
        let lines = items
            .iter()
            .map(|item| -> Result<CartLine<'static>, CheckoutsServiceError> {
                Ok(CartLine::new(
                    item.product.into_uuid(),
                    item.sku.as_str(),
                    item.name.as_str(),
                    item.quantity,
                    Money::from_minor(i64::try_from(item.unit_price)?, self.currency),
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let promotions: Vec<PromotionDefinition> = self
            .promotions_repository
            .list_active_promotions(tx)
            .await?
            .iter()
            .map(PromotionDefinition::from)
            .collect();

        let priced = price_cart(&lines, &promotions, self.currency, strategy)?;

        for skipped in priced.skipped() {
            warn!(
                promotion_uuid = %skipped.promotion(),
                reason = %skipped.reason(),
                "skipped promotion"
            );
        }

        Ok(priced)
    }
}

#[async_trait]
impl CheckoutsService for PgCheckoutsService {
    #[tracing::instrument(
        name = "checkouts.service.process_checkout",
        skip(self),
        fields(
            owner_uuid = %owner,
            cart_uuid = tracing::field::Empty,
            checkout_uuid = tracing::field::Empty
        ),
        err
    )]
    async fn process_checkout(
        &self,
        owner: OwnerUuid,
    ) -> Result<CheckoutRecord, CheckoutsServiceError> {
        if owner.is_nil() {
            return Err(CheckoutsServiceError::InvalidOwnerReference);
        }

        let mut tx = self.db.begin_transaction().await?;

        // Blocks concurrent checkouts and item additions for this owner until commit.
        let cart = self
            .carts_repository
            .lock_active_cart(&mut tx, owner)
            .await?
            .ok_or(CheckoutsServiceError::EmptyCart)?;

        Span::current().record("cart_uuid", tracing::field::display(cart.uuid));

        let checkout = self
            .checkout_cart(&mut tx, &cart, AllocationStrategy::SkuAttributed)
            .await?;

        tx.commit().await?;

        info!(
            checkout_uuid = %checkout.uuid,
            total = checkout.total,
            promotions = checkout.promotions.len(),
            "checked out cart"
        );

        Ok(checkout)
    }

    #[tracing::instrument(
        name = "checkouts.service.process_cart_checkout",
        skip(self),
        fields(cart_uuid = %cart, checkout_uuid = tracing::field::Empty),
        err
    )]
    async fn process_cart_checkout(
        &self,
        cart: CartUuid,
    ) -> Result<CheckoutRecord, CheckoutsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self.carts_repository.lock_cart(&mut tx, cart).await?;

        if self
            .checkouts_repository
            .exists_for_cart(&mut tx, cart.uuid)
            .await?
        {
            return Err(CheckoutsServiceError::AlreadyCheckedOut);
        }

        let checkout = self
            .checkout_cart(&mut tx, &cart, AllocationStrategy::Proportional)
            .await?;

        tx.commit().await?;

        info!(
            checkout_uuid = %checkout.uuid,
            total = checkout.total,
            promotions = checkout.promotions.len(),
            "checked out cart"
        );

        Ok(checkout)
    }

    #[tracing::instrument(
        name = "checkouts.service.price_cart",
        skip(self),
        fields(owner_uuid = %owner),
        err
    )]
    async fn price_cart(&self, owner: OwnerUuid) -> Result<CartPricing, CheckoutsServiceError> {
        if owner.is_nil() {
            return Err(CheckoutsServiceError::InvalidOwnerReference);
        }

        let mut tx = self.db.begin_transaction().await?;

        let pricing = match self.carts_repository.get_active_cart(&mut tx, owner).await? {
            Some(cart) => {
                let items = self.items_repository.get_cart_items(&mut tx, cart.uuid).await?;

                let priced = self
                    .price_items(&mut tx, &items, AllocationStrategy::SkuAttributed)
                    .await?;

                CartPricing::from_priced(owner, cart.uuid, &priced)?
            }
            None => CartPricing::empty(owner, self.currency),
        };

        tx.rollback().await?;

        Ok(pricing)
    }

    #[tracing::instrument(
        name = "checkouts.service.get_checkout",
        skip(self),
        fields(checkout_uuid = %checkout),
        err
    )]
    async fn get_checkout(
        &self,
        checkout: CheckoutUuid,
    ) -> Result<CheckoutRecord, CheckoutsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let checkout = self
            .checkouts_repository
            .get_checkout(&mut tx, checkout)
            .await?;

        tx.commit().await?;

        Ok(checkout)
    }
}

#[automock]
#[async_trait]
pub trait CheckoutsService: Send + Sync {
    /// Check out the owner's active cart, clearing it.
    async fn process_checkout(
        &self,
        owner: OwnerUuid,
    ) -> Result<CheckoutRecord, CheckoutsServiceError>;

    /// Check out a specific cart. A cart can be checked out at most once.
    async fn process_cart_checkout(
        &self,
        cart: CartUuid,
    ) -> Result<CheckoutRecord, CheckoutsServiceError>;

    /// Price the owner's active cart without changing anything.
    async fn price_cart(&self, owner: OwnerUuid) -> Result<CartPricing, CheckoutsServiceError>;

    /// Retrieve a checkout with its lines and applied promotions.
    async fn get_checkout(
        &self,
        checkout: CheckoutUuid,
    ) -> Result<CheckoutRecord, CheckoutsServiceError>;
}

#[cfg(test)]
mod tests {
    use rebate::promotions::PromotionKind;
    use serde_json::json;
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{
        domain::carts::{CartsService, errors::CartsServiceError},
        test::{TestContext, helpers},
    };

    use super::*;

    fn assert_balanced(checkout: &CheckoutRecord) {
        assert_eq!(
            checkout.total,
            checkout.subtotal.saturating_sub(checkout.total_discount)
        );
        assert_eq!(
            checkout.total_discount,
            checkout.promotions.iter().map(|p| p.discount).sum::<u64>()
        );
        assert_eq!(
            checkout.subtotal,
            checkout.lines.iter().map(|line| line.subtotal).sum::<u64>()
        );

        for line in &checkout.lines {
            assert!(line.discount <= line.subtotal);
            assert_eq!(line.total, line.subtotal - line.discount);
        }
    }

    #[tokio::test]
    async fn buy_x_get_y_free_discounts_the_free_line() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = OwnerUuid::new();

        let a = helpers::create_product(&ctx, "A", 50_00, 10).await?;
        let b = helpers::create_product(&ctx, "B", 30, 10).await?;

        helpers::add_item(&ctx, owner, a.uuid, 1).await?;
        helpers::add_item(&ctx, owner, b.uuid, 1).await?;

        let promotion = helpers::create_promotion(
            &ctx,
            PromotionKind::BuyXGetYFree,
            json!({ "trigger_sku": "A", "free_sku": "B", "trigger_qty": 1, "free_qty": 1 }),
        )
        .await?;

        let checkout = ctx.checkouts.process_checkout(owner).await?;

        assert_eq!(checkout.status, CheckoutStatus::Completed);
        assert_eq!(checkout.currency, "GBP");
        assert_eq!(checkout.subtotal, 50_30);
        assert_eq!(checkout.total_discount, 30);
        assert_eq!(checkout.total, 50_00);

        assert_eq!(checkout.promotions.len(), 1);
        assert_eq!(checkout.promotions[0].promotion, promotion.uuid);
        assert_eq!(checkout.promotions[0].kind, "buy_x_get_y_free");

        let discounts: Vec<_> = checkout
            .lines
            .iter()
            .map(|line| (line.sku.as_str(), line.discount))
            .collect();

        assert_eq!(discounts, [("A", 0), ("B", 30)]);
        assert_balanced(&checkout);

        Ok(())
    }

    #[tokio::test]
    async fn buy_n_pay_m_discounts_one_unit() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = OwnerUuid::new();

        let g = helpers::create_product(&ctx, "G", 50, 3).await?;

        helpers::add_item(&ctx, owner, g.uuid, 3).await?;

        helpers::create_promotion(
            &ctx,
            PromotionKind::BuyNPayM,
            json!({ "sku": "G", "min_qty": 3, "paid_units": 2, "free_units": 1 }),
        )
        .await?;

        let checkout = ctx.checkouts.process_checkout(owner).await?;

        assert_eq!(checkout.subtotal, 150);
        assert_eq!(checkout.total_discount, 50);
        assert_eq!(checkout.total, 100);
        assert_balanced(&checkout);

        Ok(())
    }

    #[tokio::test]
    async fn bulk_percent_discount_applies_to_subtotal() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = OwnerUuid::new();

        let s = helpers::create_product(&ctx, "S", 100, 4).await?;

        helpers::add_item(&ctx, owner, s.uuid, 4).await?;

        helpers::create_promotion(
            &ctx,
            PromotionKind::BulkPercentDiscount,
            json!({ "sku": "S", "min_qty": 4, "discount_percent": "10" }),
        )
        .await?;

        let checkout = ctx.checkouts.process_checkout(owner).await?;

        assert_eq!(checkout.total_discount, 40);
        assert_eq!(checkout.total, 360);
        assert_balanced(&checkout);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_is_persisted_and_cart_is_cleared() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = OwnerUuid::new();

        let a = helpers::create_product(&ctx, "A", 10_00, 5).await?;

        helpers::add_item(&ctx, owner, a.uuid, 2).await?;

        let checkout = ctx.checkouts.process_checkout(owner).await?;
        let fetched = ctx.checkouts.get_checkout(checkout.uuid).await?;

        assert_eq!(fetched.owner, owner);
        assert_eq!(fetched.source_cart, checkout.source_cart);
        assert_eq!(fetched.status, CheckoutStatus::Completed);
        assert_eq!(fetched.lines, checkout.lines);
        assert_eq!(fetched.total, 20_00);

        let cart = ctx.carts.get_cart(owner).await;

        assert!(
            matches!(cart, Err(CartsServiceError::NotFound)),
            "expected the cart to be cleared, got {cart:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn second_checkout_of_same_owner_returns_empty_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = OwnerUuid::new();

        let a = helpers::create_product(&ctx, "A", 10_00, 5).await?;

        helpers::add_item(&ctx, owner, a.uuid, 1).await?;

        ctx.checkouts.process_checkout(owner).await?;

        let result = ctx.checkouts.process_checkout(owner).await;

        assert!(
            matches!(result, Err(CheckoutsServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn checkout_without_cart_returns_empty_cart() {
        let ctx = TestContext::new().await;

        let result = ctx.checkouts.process_checkout(OwnerUuid::new()).await;

        assert!(
            matches!(result, Err(CheckoutsServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
    }

    #[tokio::test]
    async fn concurrent_checkouts_produce_one_checkout() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = OwnerUuid::new();

        let a = helpers::create_product(&ctx, "A", 10_00, 5).await?;

        helpers::add_item(&ctx, owner, a.uuid, 1).await?;

        let (first, second) = tokio::join!(
            ctx.checkouts.process_checkout(owner),
            ctx.checkouts.process_checkout(owner)
        );

        let succeeded = [&first, &second].iter().filter(|r| r.is_ok()).count();

        assert_eq!(succeeded, 1, "expected one checkout, got {first:?} and {second:?}");

        for result in [first, second] {
            assert!(
                matches!(
                    result,
                    Ok(_)
                        | Err(
                            CheckoutsServiceError::EmptyCart
                                | CheckoutsServiceError::AlreadyCheckedOut
                        )
                ),
                "unexpected result {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn cart_checkout_twice_returns_already_checked_out() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = OwnerUuid::new();

        let a = helpers::create_product(&ctx, "A", 10_00, 5).await?;
        let item = helpers::add_item(&ctx, owner, a.uuid, 1).await?;

        let checkout = ctx.checkouts.process_cart_checkout(item.cart).await?;

        assert_eq!(checkout.source_cart, item.cart);

        let result = ctx.checkouts.process_cart_checkout(item.cart).await;

        assert!(
            matches!(result, Err(CheckoutsServiceError::AlreadyCheckedOut)),
            "expected AlreadyCheckedOut, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_cart_checkouts_produce_one_checkout() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = OwnerUuid::new();

        let a = helpers::create_product(&ctx, "A", 10_00, 5).await?;
        let item = helpers::add_item(&ctx, owner, a.uuid, 1).await?;

        let (first, second) = tokio::join!(
            ctx.checkouts.process_cart_checkout(item.cart),
            ctx.checkouts.process_cart_checkout(item.cart)
        );

        let succeeded = [&first, &second].iter().filter(|r| r.is_ok()).count();

        assert_eq!(succeeded, 1, "expected one checkout, got {first:?} and {second:?}");

        for result in [first, second] {
            assert!(
                matches!(result, Ok(_) | Err(CheckoutsServiceError::AlreadyCheckedOut)),
                "unexpected result {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn second_checkout_row_for_a_cart_is_already_checked_out() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = OwnerUuid::new();

        let a = helpers::create_product(&ctx, "A", 10_00, 5).await?;
        let item = helpers::add_item(&ctx, owner, a.uuid, 1).await?;

        let checkout = |uuid| NewCheckout {
            uuid,
            source_cart: item.cart,
            owner,
            currency: "GBP".to_string(),
            lines: Vec::new(),
            promotions: Vec::new(),
            subtotal: 0,
            total_discount: 0,
            total: 0,
        };

        let repository = PgCheckoutsRepository::new();
        let db = Db::new(ctx.db.pool().clone());
        let mut tx = db.begin_transaction().await?;

        repository
            .create_checkout(&mut tx, &checkout(CheckoutUuid::new()))
            .await?;

        let result = repository
            .create_checkout(&mut tx, &checkout(CheckoutUuid::new()))
            .await
            .map_err(CheckoutsServiceError::from);

        assert!(
            matches!(result, Err(CheckoutsServiceError::AlreadyCheckedOut)),
            "expected AlreadyCheckedOut, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn cart_checkout_allocates_proportionally() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = OwnerUuid::new();

        let a = helpers::create_product(&ctx, "A", 50_00, 10).await?;
        let b = helpers::create_product(&ctx, "B", 30, 10).await?;

        let item = helpers::add_item(&ctx, owner, a.uuid, 1).await?;
        helpers::add_item(&ctx, owner, b.uuid, 1).await?;

        helpers::create_promotion(
            &ctx,
            PromotionKind::BuyXGetYFree,
            json!({ "trigger_sku": "A", "free_sku": "B", "trigger_qty": 1, "free_qty": 1 }),
        )
        .await?;

        let checkout = ctx.checkouts.process_cart_checkout(item.cart).await?;

        let discounts: Vec<_> = checkout.lines.iter().map(|line| line.discount).collect();

        // 30 * 5000 / 5030 = 29.82 and 30 * 30 / 5030 = 0.18
        assert_eq!(discounts, [30, 0]);
        assert_balanced(&checkout);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_cart_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.checkouts.process_cart_checkout(CartUuid::new()).await;

        assert!(
            matches!(result, Err(CheckoutsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn insufficient_stock_leaves_cart_intact() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = OwnerUuid::new();

        let a = helpers::create_product(&ctx, "A", 10_00, 2).await?;

        helpers::add_item(&ctx, owner, a.uuid, 2).await?;
        helpers::add_item(&ctx, owner, a.uuid, 1).await?;

        let result = ctx.checkouts.process_checkout(owner).await;

        assert!(
            matches!(
                &result,
                Err(CheckoutsServiceError::InsufficientStock { sku }) if sku == "A"
            ),
            "expected InsufficientStock for A, got {result:?}"
        );

        let cart = ctx.carts.get_cart(owner).await?;

        assert_eq!(cart.items.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn malformed_promotion_does_not_affect_others() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = OwnerUuid::new();

        let g = helpers::create_product(&ctx, "G", 50, 3).await?;

        helpers::add_item(&ctx, owner, g.uuid, 3).await?;

        helpers::create_promotion(
            &ctx,
            PromotionKind::BuyNPayM,
            json!({ "sku": "G", "min_qty": 3, "paid_units": 0, "free_units": 1 }),
        )
        .await?;

        let valid = helpers::create_promotion(
            &ctx,
            PromotionKind::BuyNPayM,
            json!({ "sku": "G", "min_qty": 3, "paid_units": 2, "free_units": 1 }),
        )
        .await?;

        let checkout = ctx.checkouts.process_checkout(owner).await?;

        let applied: Vec<_> = checkout.promotions.iter().map(|p| p.promotion).collect();

        assert_eq!(applied, [valid.uuid]);
        assert_eq!(checkout.total_discount, 50);

        Ok(())
    }

    #[tokio::test]
    async fn price_cart_changes_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = OwnerUuid::new();

        let s = helpers::create_product(&ctx, "S", 100, 10).await?;

        helpers::add_item(&ctx, owner, s.uuid, 4).await?;

        helpers::create_promotion(
            &ctx,
            PromotionKind::BulkPercentDiscount,
            json!({ "sku": "S", "min_qty": 4, "discount_percent": 10 }),
        )
        .await?;

        let first = ctx.checkouts.price_cart(owner).await?;
        let second = ctx.checkouts.price_cart(owner).await?;

        assert_eq!(first.lines, second.lines);
        assert_eq!(first.promotions, second.promotions);
        assert_eq!(first.total, 360);
        assert_eq!(second.total, 360);

        let checkout = ctx.checkouts.process_checkout(owner).await?;

        assert_eq!(checkout.total, first.total);

        Ok(())
    }

    #[tokio::test]
    async fn price_cart_without_cart_is_empty() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = OwnerUuid::new();

        let pricing = ctx.checkouts.price_cart(owner).await?;

        assert!(pricing.cart.is_none());
        assert!(pricing.lines.is_empty());
        assert_eq!(pricing.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn nil_owner_is_rejected() {
        let ctx = TestContext::new().await;
        let owner = OwnerUuid::from_uuid(Uuid::nil());

        let checkout = ctx.checkouts.process_checkout(owner).await;
        let pricing = ctx.checkouts.price_cart(owner).await;

        assert!(
            matches!(checkout, Err(CheckoutsServiceError::InvalidOwnerReference)),
            "expected InvalidOwnerReference, got {checkout:?}"
        );
        assert!(
            matches!(pricing, Err(CheckoutsServiceError::InvalidOwnerReference)),
            "expected InvalidOwnerReference, got {pricing:?}"
        );
    }

    #[tokio::test]
    async fn get_checkout_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.checkouts.get_checkout(CheckoutUuid::new()).await;

        assert!(
            matches!(result, Err(CheckoutsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
