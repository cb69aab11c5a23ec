//! Buy X Get Y Free
//!
//! Every `trigger_qty` units of the trigger SKU earn `free_qty` units of a different SKU at no
//! cost, limited to the free units actually in the cart.

use crate::{
    cart::CartIndex,
    discounts::{DiscountError, units_minor},
    promotions::{RuleError, applicability::RuleMatch, parameters::Parameters},
};

/// Buy units of one SKU, get units of another free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyXGetYFree {
    trigger_sku: String,
    free_sku: String,
    trigger_qty: u32,
    free_qty: u32,
}

impl BuyXGetYFree {
    /// Create a new buy-X-get-Y-free rule.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleError`] if a SKU is blank, a quantity is zero, or both SKUs are the same.
    pub fn new(
        trigger_sku: impl Into<String>,
        free_sku: impl Into<String>,
        trigger_qty: u32,
        free_qty: u32,
    ) -> Result<Self, RuleError> {
        let trigger_sku = trigger_sku.into();
        let free_sku = free_sku.into();

        if trigger_sku.is_empty() {
            return Err(RuleError::MissingParameter("trigger_sku"));
        }

        if free_sku.is_empty() {
            return Err(RuleError::MissingParameter("free_sku"));
        }

        if trigger_qty == 0 {
            return Err(RuleError::NonPositive("trigger_qty"));
        }

        if free_qty == 0 {
            return Err(RuleError::NonPositive("free_qty"));
        }

        if trigger_sku == free_sku {
            return Err(RuleError::SelfReferential(trigger_sku));
        }

        Ok(Self {
            trigger_sku,
            free_sku,
            trigger_qty,
            free_qty,
        })
    }

    pub(crate) fn from_parameters(parameters: &Parameters<'_>) -> Result<Self, RuleError> {
        Self::new(
            parameters.sku("trigger_sku")?,
            parameters.sku("free_sku")?,
            parameters.quantity("trigger_qty")?,
            parameters.quantity("free_qty")?,
        )
    }

    /// SKU that has to be bought.
    pub fn trigger_sku(&self) -> &str {
        &self.trigger_sku
    }

    /// SKU handed out for free.
    pub fn free_sku(&self) -> &str {
        &self.free_sku
    }

    /// Units of the trigger SKU per reward.
    pub fn trigger_qty(&self) -> u32 {
        self.trigger_qty
    }

    /// Free units per reward.
    pub fn free_qty(&self) -> u32 {
        self.free_qty
    }

    /// Human-readable summary.
    pub fn describe(&self) -> String {
        format!(
            "Buy {} x {}, get {} x {} free",
            self.trigger_qty, self.trigger_sku, self.free_qty, self.free_sku
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
        let Some(free_price) = cart.first_unit_price_at(matched.target_lines()) else {
            return Ok(0);
        };

        let eligible_sets = cart.quantity_at(matched.trigger_lines()) / u64::from(self.trigger_qty);

        let entitled = eligible_sets
            .checked_mul(u64::from(self.free_qty))
            .ok_or(DiscountError::Overflow)?;

        let granted = entitled.min(cart.quantity_at(matched.target_lines()));

        units_minor(granted, free_price)
    }
}
