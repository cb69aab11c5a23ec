//! Cart pricing
//!
//! Combines promotion aggregation with discount allocation into a fully priced cart: per-line
//! subtotals, discounts and totals plus the cart-level figures.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    allocation::AllocationStrategy,
    cart::{CartIndex, CartLine},
    discounts::{DiscountError, sum_minor},
    promotions::{
        PromotionDefinition,
        aggregation::{AppliedPromotion, SkippedPromotion, aggregate_promotions},
    },
};

/// Errors that can occur while pricing a cart.
#[derive(Debug, Error)]
pub enum PricingError {
    /// A line's currency differs from the pricing currency (index, line currency, pricing currency).
    #[error("Line {0} has currency {1}, but the cart is priced in {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// Line or cart arithmetic failed.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// A cart line with its share of the discount.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine<'a> {
    product: Uuid,
    sku: String,
    name: String,
    quantity: u32,
    unit_price: Money<'a, Currency>,
    subtotal: Money<'a, Currency>,
    discount: Money<'a, Currency>,
    total: Money<'a, Currency>,
}

impl<'a> PricedLine<'a> {
    /// Product id.
    pub fn product(&self) -> Uuid {
        self.product
    }

    /// Stock keeping unit.
    pub fn sku(&self) -> &str {
        &self.sku
    }

    /// Product name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Units on the line.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price.
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// `unit_price * quantity`.
    pub fn subtotal(&self) -> &Money<'a, Currency> {
        &self.subtotal
    }

    /// Discount allocated to this line, never more than the subtotal.
    pub fn discount(&self) -> &Money<'a, Currency> {
        &self.discount
    }

    /// `subtotal - discount`.
    pub fn total(&self) -> &Money<'a, Currency> {
        &self.total
    }
}

/// A fully priced cart.
#[derive(Debug)]
pub struct PricedCart<'a> {
    lines: Vec<PricedLine<'a>>,
    applied: Vec<AppliedPromotion<'a>>,
    skipped: Vec<SkippedPromotion>,
    subtotal: Money<'a, Currency>,
    total_discount: Money<'a, Currency>,
    total: Money<'a, Currency>,
}

impl<'a> PricedCart<'a> {
    /// Priced lines, in cart order.
    pub fn lines(&self) -> &[PricedLine<'a>] {
        &self.lines
    }

    /// Promotions that produced a discount, in listing order.
    pub fn applied(&self) -> &[AppliedPromotion<'a>] {
        &self.applied
    }

    /// Promotions left out because they were malformed or failed to calculate.
    pub fn skipped(&self) -> &[SkippedPromotion] {
        &self.skipped
    }

    /// Sum of line subtotals.
    pub fn subtotal(&self) -> &Money<'a, Currency> {
        &self.subtotal
    }

    /// Sum of applied promotion discounts.
    pub fn total_discount(&self) -> &Money<'a, Currency> {
        &self.total_discount
    }

    /// `max(0, subtotal - total_discount)`.
    pub fn total(&self) -> &Money<'a, Currency> {
        &self.total
    }

    /// Currency the cart was priced in.
    pub fn currency(&self) -> &'a Currency {
        self.subtotal.currency()
    }
}

/// Price `lines` against `promotions` in `currency`.
///
/// # Errors
///
/// - [`PricingError::CurrencyMismatch`]: a line is priced in another currency.
/// - [`PricingError::Discount`]: a subtotal or the allocation overflowed.
pub fn price_cart<'a>(
    lines: &[CartLine<'a>],
    promotions: &[PromotionDefinition],
    currency: &'a Currency,
    strategy: AllocationStrategy,
) -> Result<PricedCart<'a>, PricingError> {
    lines.iter().enumerate().try_for_each(|(i, line)| {
        let line_currency = line.unit_price().currency();

        if line_currency == currency {
            Ok(())
        } else {
            Err(PricingError::CurrencyMismatch(
                i,
                line_currency.iso_alpha_code,
                currency.iso_alpha_code,
            ))
        }
    })?;

    let index = CartIndex::new(lines);
    let (applied, skipped, total_discount) =
        aggregate_promotions(&index, promotions, currency).into_parts();

    let allocations = strategy.allocate(lines, &applied)?;

    let priced = lines
        .iter()
        .zip(allocations)
        .map(|(line, discount)| {
            let subtotal = line.subtotal_minor()?;

            Ok(PricedLine {
                product: line.product(),
                sku: line.sku().to_string(),
                name: line.name().to_string(),
                quantity: line.quantity(),
                unit_price: *line.unit_price(),
                subtotal: Money::from_minor(subtotal, currency),
                discount: Money::from_minor(discount, currency),
                total: Money::from_minor(subtotal - discount, currency),
            })
        })
        .collect::<Result<Vec<_>, DiscountError>>()?;

    let subtotal = sum_minor(priced.iter().map(|line| line.subtotal.to_minor_units()))?;
    let total = subtotal
        .saturating_sub(total_discount.to_minor_units())
        .max(0);

    Ok(PricedCart {
        lines: priced,
        applied,
        skipped,
        subtotal: Money::from_minor(subtotal, currency),
        total_discount,
        total: Money::from_minor(total, currency),
    })
}
