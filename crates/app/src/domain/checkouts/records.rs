//! Checkout Records

use std::{fmt, num::TryFromIntError, str::FromStr};

use jiff::Timestamp;
use rebate::{
    pricing::{PricedCart, PricedLine},
    promotions::aggregation::AppliedPromotion,
};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    domain::{
        carts::records::{CartUuid, OwnerUuid},
        products::records::ProductUuid,
        promotions::records::PromotionUuid,
    },
    uuids::TypedUuid,
};

/// Checkout UUID
pub type CheckoutUuid = TypedUuid<CheckoutRecord>;

/// Where a checkout is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStatus {
    Pending,
    Completed,
    Cancelled,
}

impl CheckoutStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for CheckoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown checkout status \"{0}\"")]
pub struct UnknownCheckoutStatus(String);

impl FromStr for CheckoutStatus {
    type Err = UnknownCheckoutStatus;

    fn from_str(status: &str) -> Result<Self, Self::Err> {
        match status {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownCheckoutStatus(other.to_string())),
        }
    }
}

/// Checkout Record
///
/// Amounts are minor units of `currency`.
#[derive(Debug, Clone)]
pub struct CheckoutRecord {
    pub uuid: CheckoutUuid,
    pub source_cart: CartUuid,
    pub owner: OwnerUuid,
    pub currency: String,
    pub status: CheckoutStatus,
    pub lines: Vec<CheckoutLineRecord>,
    pub promotions: Vec<AppliedPromotionRecord>,
    pub subtotal: u64,
    pub total_discount: u64,
    pub total: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A priced line of a checkout or pricing preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLineRecord {
    pub product: ProductUuid,
    pub sku: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub subtotal: u64,
    pub discount: u64,
    pub total: u64,
}

/// A promotion that contributed a discount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedPromotionRecord {
    pub promotion: PromotionUuid,
    pub kind: String,
    pub description: String,
    pub discount: u64,
}

/// Priced view of an owner's active cart.
#[derive(Debug, Clone)]
pub struct CartPricing {
    pub owner: OwnerUuid,
    pub cart: Option<CartUuid>,
    pub currency: String,
    pub lines: Vec<CheckoutLineRecord>,
    pub promotions: Vec<AppliedPromotionRecord>,
    pub subtotal: u64,
    pub total_discount: u64,
    pub total: u64,
}

impl CartPricing {
    /// Pricing of an owner without an active cart.
    #[must_use]
    pub fn empty(owner: OwnerUuid, currency: &Currency) -> Self {
        Self {
            owner,
            cart: None,
            currency: currency.iso_alpha_code.to_string(),
            lines: Vec::new(),
            promotions: Vec::new(),
            subtotal: 0,
            total_discount: 0,
            total: 0,
        }
    }

    /// Convert a priced cart into stored amounts.
    ///
    /// # Errors
    ///
    /// Returns an error if any amount is negative.
    pub fn from_priced(
        owner: OwnerUuid,
        cart: CartUuid,
        priced: &PricedCart<'_>,
    ) -> Result<Self, TryFromIntError> {
        Ok(Self {
            owner,
            cart: Some(cart),
            currency: priced.currency().iso_alpha_code.to_string(),
            lines: priced
                .lines()
                .iter()
                .map(CheckoutLineRecord::try_from)
                .collect::<Result<_, _>>()?,
            promotions: priced
                .applied()
                .iter()
                .map(AppliedPromotionRecord::try_from)
                .collect::<Result<_, _>>()?,
            subtotal: minor_units(priced.subtotal())?,
            total_discount: minor_units(priced.total_discount())?,
            total: minor_units(priced.total())?,
        })
    }
}

impl TryFrom<&PricedLine<'_>> for CheckoutLineRecord {
    type Error = TryFromIntError;

    fn try_from(line: &PricedLine<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            product: ProductUuid::from_uuid(line.product()),
            sku: line.sku().to_string(),
            name: line.name().to_string(),
            quantity: line.quantity(),
            unit_price: minor_units(line.unit_price())?,
            subtotal: minor_units(line.subtotal())?,
            discount: minor_units(line.discount())?,
            total: minor_units(line.total())?,
        })
    }
}

impl TryFrom<&AppliedPromotion<'_>> for AppliedPromotionRecord {
    type Error = TryFromIntError;

    fn try_from(applied: &AppliedPromotion<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            promotion: PromotionUuid::from_uuid(applied.promotion()),
            kind: applied.kind().as_str().to_string(),
            description: applied.description().to_string(),
            discount: minor_units(applied.discount())?,
        })
    }
}

fn minor_units(money: &Money<'_, Currency>) -> Result<u64, TryFromIntError> {
    u64::try_from(money.to_minor_units())
}
