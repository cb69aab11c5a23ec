//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use rebate_app::{
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{CartUuid, OwnerUuid},
        },
        checkouts::{
            MockCheckoutsService,
            records::{
                AppliedPromotionRecord, CheckoutLineRecord, CheckoutRecord, CheckoutStatus,
                CheckoutUuid,
            },
        },
        products::{MockProductsService, records::ProductUuid},
        promotions::{MockPromotionsService, records::PromotionUuid},
    },
};

use crate::state::State;

/// Services not under test have no expectations, so any call to them fails the test.
fn app_with_checkouts(checkouts: MockCheckoutsService) -> AppContext {
    AppContext {
        products: Arc::new(MockProductsService::new()),
        carts: Arc::new(MockCartsService::new()),
        promotions: Arc::new(MockPromotionsService::new()),
        checkouts: Arc::new(checkouts),
    }
}

pub(crate) fn checkouts_service(checkouts: MockCheckoutsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app_with_checkouts(checkouts))))
            .push(route),
    )
}

pub(crate) fn make_line(
    sku: &str,
    quantity: u32,
    unit_price: u64,
    discount: u64,
) -> CheckoutLineRecord {
    let subtotal = u64::from(quantity) * unit_price;

    CheckoutLineRecord {
        product: ProductUuid::new(),
        sku: sku.to_string(),
        name: format!("Product {sku}"),
        quantity,
        unit_price,
        subtotal,
        discount,
        total: subtotal - discount,
    }
}

/// A completed three-for-two checkout of `G`.
pub(crate) fn make_checkout(owner: OwnerUuid) -> CheckoutRecord {
    CheckoutRecord {
        uuid: CheckoutUuid::new(),
        source_cart: CartUuid::new(),
        owner,
        currency: "GBP".to_string(),
        status: CheckoutStatus::Completed,
        lines: vec![make_line("G", 3, 50, 50)],
        promotions: vec![AppliedPromotionRecord {
            promotion: PromotionUuid::new(),
            kind: "buy_n_pay_m".to_string(),
            description: "Buy 3 x G, pay for 2".to_string(),
            discount: 50,
        }],
        subtotal: 150,
        total_discount: 50,
        total: 100,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
