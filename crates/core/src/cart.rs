//! Cart lines and the per-SKU index built over them.

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use uuid::Uuid;

use crate::discounts::DiscountError;

/// Positions of the cart lines sharing a SKU, in cart order.
pub type LineIndices = SmallVec<[usize; 4]>;

/// A priced line read from a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    product: Uuid,
    sku: String,
    name: String,
    quantity: u32,
    unit_price: Money<'a, Currency>,
}

impl<'a> CartLine<'a> {
    /// Create a new cart line.
    pub fn new(
        product: Uuid,
        sku: impl Into<String>,
        name: impl Into<String>,
        quantity: u32,
        unit_price: Money<'a, Currency>,
    ) -> Self {
        Self {
            product,
            sku: sku.into(),
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// Product the line refers to.
    pub fn product(&self) -> Uuid {
        self.product
    }

    /// Stock keeping unit.
    pub fn sku(&self) -> &str {
        &self.sku
    }

    /// Product name at the time the line was read.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of units on the line.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price of a single unit.
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// `unit_price * quantity`, in minor units.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::Overflow`] if the product does not fit in an `i64`.
    pub fn subtotal_minor(&self) -> Result<i64, DiscountError> {
        self.unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .ok_or(DiscountError::Overflow)
    }
}

/// Cart lines grouped by SKU.
///
/// Built once per pricing request so that every rule looks at the same, unmodified quantities.
#[derive(Debug)]
pub struct CartIndex<'c, 'a> {
    lines: &'c [CartLine<'a>],
    by_sku: FxHashMap<&'c str, LineIndices>,
}

impl<'c, 'a> CartIndex<'c, 'a> {
    /// Index the given lines by SKU.
    pub fn new(lines: &'c [CartLine<'a>]) -> Self {
        let mut by_sku: FxHashMap<&'c str, LineIndices> = FxHashMap::default();

        for (index, line) in lines.iter().enumerate() {
            by_sku.entry(line.sku()).or_default().push(index);
        }

        Self { lines, by_sku }
    }

    /// All indexed lines, in cart order.
    pub fn lines(&self) -> &'c [CartLine<'a>] {
        self.lines
    }

    /// Whether any line carries the SKU.
    pub fn contains(&self, sku: &str) -> bool {
        self.by_sku.contains_key(sku)
    }

    /// Positions of the lines carrying the SKU.
    pub fn indices(&self, sku: &str) -> &[usize] {
        self.by_sku
            .get(sku)
            .map_or(&[][..], |indices| indices.as_slice())
    }

    /// Aggregate quantity of the SKU across all of its lines.
    pub fn quantity(&self, sku: &str) -> u64 {
        self.quantity_at(self.indices(sku))
    }

    /// Aggregate quantity of the lines at the given positions.
    pub fn quantity_at(&self, indices: &[usize]) -> u64 {
        self.lines_at(indices)
            .map(|line| u64::from(line.quantity()))
            .sum()
    }

    /// Sum of the line subtotals at the given positions, in minor units.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::Overflow`] if any subtotal or the sum overflows.
    pub fn subtotal_at(&self, indices: &[usize]) -> Result<i64, DiscountError> {
        self.lines_at(indices)
            .try_fold(0_i64, |acc, line| {
                acc.checked_add(line.subtotal_minor()?)
                    .ok_or(DiscountError::Overflow)
            })
    }

    /// Unit price of the first line at the given positions, in minor units.
    ///
    /// Lines of one SKU are expected to share a price; when they disagree the first one wins.
    pub fn first_unit_price_at(&self, indices: &[usize]) -> Option<i64> {
        self.lines_at(indices)
            .next()
            .map(|line| line.unit_price().to_minor_units())
    }

    /// Resolve line positions back to lines, skipping any that are out of range.
    pub fn lines_at<'s>(
        &'s self,
        indices: &'s [usize],
    ) -> impl Iterator<Item = &'c CartLine<'a>> + 's {
        indices.iter().filter_map(|index| self.lines.get(*index))
    }
}
