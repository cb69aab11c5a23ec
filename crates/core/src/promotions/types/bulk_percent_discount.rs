//! Bulk Percent Discount
//!
//! A percentage off every unit of a SKU once the cart holds at least `min_qty` of it.

use rust_decimal::Decimal;

use crate::{
    cart::CartIndex,
    discounts::{DiscountError, percent_of_minor, percentage_of_hundred},
    promotions::{RuleError, applicability::RuleMatch, parameters::Parameters},
};

/// Volume discount on a single SKU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkPercentDiscount {
    sku: String,
    min_qty: u32,
    discount_percent: Decimal,
}

impl BulkPercentDiscount {
    /// Create a new bulk discount. `discount_percent` is a whole percentage, so `10` means 10%.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleError`] if the SKU is blank, `min_qty` is zero, or the percentage is not
    /// in `(0, 100]`.
    pub fn new(
        sku: impl Into<String>,
        min_qty: u32,
        discount_percent: Decimal,
    ) -> Result<Self, RuleError> {
        let sku = sku.into();

        if sku.is_empty() {
            return Err(RuleError::MissingParameter("sku"));
        }

        if min_qty == 0 {
            return Err(RuleError::NonPositive("min_qty"));
        }

        if discount_percent <= Decimal::ZERO || discount_percent > Decimal::ONE_HUNDRED {
            return Err(RuleError::PercentOutOfRange(discount_percent));
        }

        Ok(Self {
            sku,
            min_qty,
            discount_percent,
        })
    }

    pub(crate) fn from_parameters(parameters: &Parameters<'_>) -> Result<Self, RuleError> {
        Self::new(
            parameters.sku("sku")?,
            parameters.quantity("min_qty")?,
            parameters.decimal("discount_percent")?,
        )
    }

    /// Discounted SKU.
    pub fn sku(&self) -> &str {
        &self.sku
    }

    /// Minimum units before the discount applies.
    pub fn min_qty(&self) -> u32 {
        self.min_qty
    }

    /// Percentage taken off, as a whole percentage.
    pub fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }

    /// Human-readable summary.
    pub fn describe(&self) -> String {
        format!(
            "{}% off {} when buying {} or more",
            self.discount_percent.normalize(),
            self.sku,
            self.min_qty
        )
    }

    /// Discount in minor units for the matched lines, rounded once to the minor unit.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the subtotal overflows or the percentage product cannot be
    /// represented.
    pub fn calculate(
        &self,
        matched: &RuleMatch,
        cart: &CartIndex<'_, '_>,
    ) -> Result<i64, DiscountError> {
        let subtotal = cart.subtotal_at(matched.target_lines())?;

        percent_of_minor(&percentage_of_hundred(self.discount_percent)?, subtotal)
    }
}
