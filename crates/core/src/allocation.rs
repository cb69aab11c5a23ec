//! Discount allocation
//!
//! Spreads promotion discounts over cart lines in whole minor units. Splits use the largest
//! remainder method, so the line discounts always add up to the amount being split, and no line
//! is ever given more than its own subtotal.

use crate::{
    cart::CartLine,
    discounts::{DiscountError, sum_minor},
    promotions::aggregation::AppliedPromotion,
};

/// How a cart's discount is attributed to its lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllocationStrategy {
    /// The total discount is split over every line by line subtotal.
    Proportional,

    /// Each promotion's discount goes to the lines of the SKU it targets.
    #[default]
    SkuAttributed,
}

impl AllocationStrategy {
    /// Per-line discounts in minor units, in cart order.
    ///
    /// The returned amounts sum to `min(total discount, cart subtotal)`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::Overflow`] if a subtotal or the total discount overflows.
    pub fn allocate(
        self,
        lines: &[CartLine<'_>],
        applied: &[AppliedPromotion<'_>],
    ) -> Result<Vec<i64>, DiscountError> {
        match self {
            Self::Proportional => {
                let total = sum_minor(
                    applied
                        .iter()
                        .map(|promotion| promotion.discount().to_minor_units()),
                )?;

                proportional(lines, total)
            }
            Self::SkuAttributed => sku_attributed(lines, applied),
        }
    }
}

/// Split `total_discount` over all lines by line subtotal.
///
/// # Errors
///
/// Returns [`DiscountError::Overflow`] if a subtotal overflows.
pub fn proportional(
    lines: &[CartLine<'_>],
    total_discount: i64,
) -> Result<Vec<i64>, DiscountError> {
    let mut ledger = Ledger::new(lines)?;
    let everything: Vec<usize> = (0..lines.len()).collect();

    ledger.distribute(total_discount, &everything)?;

    Ok(ledger.into_allocations())
}

/// Give each promotion's discount to the lines it targets, spilling whatever they cannot absorb
/// over the rest of the cart.
///
/// # Errors
///
/// Returns [`DiscountError::Overflow`] if a subtotal overflows.
pub fn sku_attributed(
    lines: &[CartLine<'_>],
    applied: &[AppliedPromotion<'_>],
) -> Result<Vec<i64>, DiscountError> {
    let mut ledger = Ledger::new(lines)?;
    let mut spill = 0_i64;

    for promotion in applied {
        let leftover =
            ledger.distribute(promotion.discount().to_minor_units(), promotion.target_lines())?;

        spill = spill.saturating_add(leftover);
    }

    if spill > 0 {
        let everything: Vec<usize> = (0..lines.len()).collect();

        ledger.distribute(spill, &everything)?;
    }

    Ok(ledger.into_allocations())
}

/// Running allocation state: what each line has been given and how much more it can take.
#[derive(Debug)]
struct Ledger {
    subtotals: Vec<i64>,
    allocations: Vec<i64>,
}

impl Ledger {
    fn new(lines: &[CartLine<'_>]) -> Result<Self, DiscountError> {
        let subtotals = lines
            .iter()
            .map(CartLine::subtotal_minor)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            allocations: vec![0; subtotals.len()],
            subtotals,
        })
    }

    fn capacity(&self, index: usize) -> i64 {
        let subtotal = self.subtotals.get(index).copied().unwrap_or(0);
        let allocated = self.allocations.get(index).copied().unwrap_or(0);

        subtotal.saturating_sub(allocated).max(0)
    }

    /// Hand out `amount` over `indices`, weighted by line subtotal. Returns what could not be
    /// placed because every target line is already fully discounted.
    fn distribute(&mut self, amount: i64, indices: &[usize]) -> Result<i64, DiscountError> {
        let mut remaining = amount.max(0);

        while remaining > 0 {
            let open: Vec<usize> = indices
                .iter()
                .copied()
                .filter(|index| self.capacity(*index) > 0)
                .collect();

            if open.is_empty() {
                break;
            }

            let weights: Vec<i64> = open
                .iter()
                .map(|index| self.subtotals.get(*index).copied().unwrap_or(0))
                .collect();

            let shares = split_by_weight(remaining, &weights)?;
            let mut unplaced = 0_i64;

            for (index, share) in open.iter().zip(shares) {
                let taken = share.min(self.capacity(*index));

                if let Some(allocated) = self.allocations.get_mut(*index) {
                    *allocated += taken;
                }

                unplaced += share - taken;
            }

            // Every open line rejected its share.
            if unplaced == remaining {
                break;
            }

            remaining = unplaced;
        }

        Ok(remaining)
    }

    fn into_allocations(self) -> Vec<i64> {
        self.allocations
    }
}

/// Split `amount` into parts proportional to `weights` using the largest remainder method.
///
/// Parts always sum to `amount` unless every weight is zero, in which case every part is zero.
/// Ties on the remainder go to the earlier position.
///
/// # Errors
///
/// Returns [`DiscountError::Overflow`] if the weights do not fit the intermediate arithmetic.
pub fn split_by_weight(amount: i64, weights: &[i64]) -> Result<Vec<i64>, DiscountError> {
    let total_weight = weights
        .iter()
        .map(|weight| i128::from((*weight).max(0)))
        .sum::<i128>();

    if total_weight == 0 || amount == 0 {
        return Ok(vec![0; weights.len()]);
    }

    let amount = i128::from(amount);

    let mut shares = Vec::with_capacity(weights.len());
    let mut remainders = Vec::with_capacity(weights.len());

    for (position, weight) in weights.iter().enumerate() {
        let scaled = amount
            .checked_mul(i128::from((*weight).max(0)))
            .ok_or(DiscountError::Overflow)?;

        shares.push(scaled / total_weight);
        remainders.push((position, scaled % total_weight));
    }

    let placed: i128 = shares.iter().sum();
    let leftover = usize::try_from(amount - placed)
        .ok()
        .ok_or(DiscountError::Overflow)?;

    remainders.sort_by(|(left_pos, left), (right_pos, right)| {
        right.cmp(left).then(left_pos.cmp(right_pos))
    });

    for (position, _) in remainders.into_iter().take(leftover) {
        if let Some(share) = shares.get_mut(position) {
            *share += 1;
        }
    }

    shares
        .into_iter()
        .map(|share| i64::try_from(share).ok().ok_or(DiscountError::Overflow))
        .collect()
}
