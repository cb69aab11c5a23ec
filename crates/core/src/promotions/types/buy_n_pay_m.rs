//! Buy N Pay M
//!
//! For every complete set of `paid_units + free_units` units of a SKU, `free_units` of them are
//! free ("3 for 2").

use crate::{
    cart::CartIndex,
    discounts::{DiscountError, units_minor},
    promotions::{RuleError, applicability::RuleMatch, parameters::Parameters},
};

/// Multi-buy on a single SKU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyNPayM {
    sku: String,
    min_qty: u32,
    paid_units: u32,
    free_units: u32,
}

impl BuyNPayM {
    /// Create a new multi-buy rule.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleError`] if the SKU is blank or any count is zero.
    pub fn new(
        sku: impl Into<String>,
        min_qty: u32,
        paid_units: u32,
        free_units: u32,
    ) -> Result<Self, RuleError> {
        let sku = sku.into();

        if sku.is_empty() {
            return Err(RuleError::MissingParameter("sku"));
        }

        for (name, value) in [
            ("min_qty", min_qty),
            ("paid_units", paid_units),
            ("free_units", free_units),
        ] {
            if value == 0 {
                return Err(RuleError::NonPositive(name));
            }
        }

        Ok(Self {
            sku,
            min_qty,
            paid_units,
            free_units,
        })
    }

    pub(crate) fn from_parameters(parameters: &Parameters<'_>) -> Result<Self, RuleError> {
        Self::new(
            parameters.sku("sku")?,
            parameters.quantity("min_qty")?,
            parameters.quantity("paid_units")?,
            parameters.quantity("free_units")?,
        )
    }

    /// Discounted SKU.
    pub fn sku(&self) -> &str {
        &self.sku
    }

    /// Minimum units in the cart before the rule is considered.
    pub fn min_qty(&self) -> u32 {
        self.min_qty
    }

    /// Paid units per set.
    pub fn paid_units(&self) -> u32 {
        self.paid_units
    }

    /// Free units per set.
    pub fn free_units(&self) -> u32 {
        self.free_units
    }

    /// Human-readable summary.
    pub fn describe(&self) -> String {
        format!(
            "Buy {} x {}, pay for {}",
            u64::from(self.paid_units) + u64::from(self.free_units),
            self.sku,
            self.paid_units
        )
    }

    /// Discount in minor units for the matched lines.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::Overflow`] if the discount does not fit in an `i64`.
    pub fn calculate(
        &self,
        matched: &RuleMatch,
        cart: &CartIndex<'_, '_>,
    ) -> Result<i64, DiscountError> {
        let Some(unit_price) = cart.first_unit_price_at(matched.target_lines()) else {
            return Ok(0);
        };

        let set_size = u64::from(self.paid_units) + u64::from(self.free_units);
        let complete_sets = cart.quantity_at(matched.trigger_lines()) / set_size;

        let free_granted = complete_sets
            .checked_mul(u64::from(self.free_units))
            .ok_or(DiscountError::Overflow)?;

        units_minor(free_granted, unit_price)
    }
}
