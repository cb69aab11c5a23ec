//! Checkouts Data

use crate::domain::{
    carts::records::{CartUuid, OwnerUuid},
    checkouts::records::{AppliedPromotionRecord, CheckoutLineRecord, CheckoutUuid},
};

/// New Checkout Data
#[derive(Debug, Clone)]
pub struct NewCheckout {
    pub uuid: CheckoutUuid,
    pub source_cart: CartUuid,
    pub owner: OwnerUuid,
    pub currency: String,
    pub lines: Vec<CheckoutLineRecord>,
    pub promotions: Vec<AppliedPromotionRecord>,
    pub subtotal: u64,
    pub total_discount: u64,
    pub total: u64,
}
