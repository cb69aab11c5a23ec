//! Checkout Response Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rebate_app::domain::checkouts::records::{
    AppliedPromotionRecord, CartPricing, CheckoutLineRecord, CheckoutRecord,
};

/// A priced cart line.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LineResponse {
    /// Product the line refers to
    pub product_uuid: Uuid,

    /// Product SKU
    pub sku: String,

    /// Product name
    pub name: String,

    /// Number of units
    pub quantity: u32,

    /// Price of one unit in minor units
    pub unit_price: u64,

    /// `quantity * unit_price`
    pub subtotal: u64,

    /// Share of the promotional discount allocated to this line
    pub discount: u64,

    /// `subtotal - discount`
    pub total: u64,
}

impl From<CheckoutLineRecord> for LineResponse {
    fn from(line: CheckoutLineRecord) -> Self {
        Self {
            product_uuid: line.product.into(),
            sku: line.sku,
            name: line.name,
            quantity: line.quantity,
            unit_price: line.unit_price,
            subtotal: line.subtotal,
            discount: line.discount,
            total: line.total,
        }
    }
}

/// A promotion that contributed a discount.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AppliedPromotionResponse {
    /// The promotion
    pub promotion_uuid: Uuid,

    /// Promotion kind, e.g. `buy_n_pay_m`
    pub kind: String,

    /// Human-readable summary of the promotion
    pub description: String,

    /// Discount in minor units
    pub discount: u64,
}

impl From<AppliedPromotionRecord> for AppliedPromotionResponse {
    fn from(promotion: AppliedPromotionRecord) -> Self {
        Self {
            promotion_uuid: promotion.promotion.into(),
            kind: promotion.kind,
            description: promotion.description,
            discount: promotion.discount,
        }
    }
}

/// Checkout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    /// The unique identifier of the checkout
    pub uuid: Uuid,

    /// The cart that was checked out
    pub source_cart_uuid: Uuid,

    /// Owner of the cart
    pub owner_uuid: Uuid,

    /// ISO 4217 currency code of every amount
    pub currency: String,

    /// `pending`, `completed` or `cancelled`
    pub status: String,

    /// Priced lines in cart order
    pub lines: Vec<LineResponse>,

    /// Promotions that produced a discount
    pub promotions: Vec<AppliedPromotionResponse>,

    /// Sum of line subtotals
    pub subtotal: u64,

    /// Sum of promotion discounts
    pub total_discount: u64,

    /// Amount payable
    pub total: u64,

    /// The date and time the checkout was created
    pub created_at: String,
}

impl From<CheckoutRecord> for CheckoutResponse {
    fn from(checkout: CheckoutRecord) -> Self {
        Self {
            uuid: checkout.uuid.into(),
            source_cart_uuid: checkout.source_cart.into(),
            owner_uuid: checkout.owner.into(),
            currency: checkout.currency,
            status: checkout.status.to_string(),
            lines: checkout.lines.into_iter().map(Into::into).collect(),
            promotions: checkout.promotions.into_iter().map(Into::into).collect(),
            subtotal: checkout.subtotal,
            total_discount: checkout.total_discount,
            total: checkout.total,
            created_at: checkout.created_at.to_string(),
        }
    }
}

/// Cart Pricing Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartPricingResponse {
    /// Owner of the cart
    pub owner_uuid: Uuid,

    /// The active cart, absent when the owner has none
    pub cart_uuid: Option<Uuid>,

    /// ISO 4217 currency code of every amount
    pub currency: String,

    /// Priced lines in cart order
    pub lines: Vec<LineResponse>,

    /// Promotions that would apply
    pub promotions: Vec<AppliedPromotionResponse>,

    /// Sum of line subtotals
    pub subtotal: u64,

    /// Sum of promotion discounts
    pub total_discount: u64,

    /// Amount payable
    pub total: u64,
}

impl From<CartPricing> for CartPricingResponse {
    fn from(pricing: CartPricing) -> Self {
        Self {
            owner_uuid: pricing.owner.into(),
            cart_uuid: pricing.cart.map(Into::into),
            currency: pricing.currency,
            lines: pricing.lines.into_iter().map(Into::into).collect(),
            promotions: pricing.promotions.into_iter().map(Into::into).collect(),
            subtotal: pricing.subtotal,
            total_discount: pricing.total_discount,
            total: pricing.total,
        }
    }
}
