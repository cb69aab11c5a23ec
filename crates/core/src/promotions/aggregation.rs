//! Promotion aggregation
//!
//! Runs every active promotion against the same cart index and collects the discounts they
//! produce. Promotions do not interact: each one sees the original quantities.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    cart::{CartIndex, LineIndices},
    discounts::DiscountError,
    promotions::{
        PromotionDefinition, PromotionKind, PromotionRule, RuleError, applicability::match_rule,
    },
};

/// A promotion that produced a non-zero discount.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedPromotion<'a> {
    promotion: Uuid,
    kind: PromotionKind,
    description: String,
    discount: Money<'a, Currency>,
    targets: LineIndices,
}

impl<'a> AppliedPromotion<'a> {
    /// Promotion id.
    pub fn promotion(&self) -> Uuid {
        self.promotion
    }

    /// Kind of the applied rule.
    pub fn kind(&self) -> PromotionKind {
        self.kind
    }

    /// Human-readable description of the rule.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Discount granted by the promotion. Always positive.
    pub fn discount(&self) -> &Money<'a, Currency> {
        &self.discount
    }

    /// Cart lines the discount was taken from.
    pub fn target_lines(&self) -> &[usize] {
        &self.targets
    }
}

/// Why a promotion did not contribute.
#[derive(Debug, Error)]
pub enum SkipReason {
    /// The stored rule could not be turned into a valid rule.
    #[error(transparent)]
    Inapplicable(#[from] RuleError),

    /// The rule matched but its discount could not be calculated.
    #[error(transparent)]
    Calculation(#[from] DiscountError),
}

/// A promotion left out of the result, with the reason.
#[derive(Debug)]
pub struct SkippedPromotion {
    promotion: Uuid,
    reason: SkipReason,
}

impl SkippedPromotion {
    /// Promotion id.
    pub fn promotion(&self) -> Uuid {
        self.promotion
    }

    /// Reason it was skipped.
    pub fn reason(&self) -> &SkipReason {
        &self.reason
    }
}

/// Result of running all promotions over a cart.
#[derive(Debug)]
pub struct PromotionOutcome<'a> {
    applied: Vec<AppliedPromotion<'a>>,
    skipped: Vec<SkippedPromotion>,
    total_discount: Money<'a, Currency>,
}

impl<'a> PromotionOutcome<'a> {
    /// Promotions with a non-zero discount, in listing order.
    pub fn applied(&self) -> &[AppliedPromotion<'a>] {
        &self.applied
    }

    /// Promotions that were malformed or failed to calculate.
    pub fn skipped(&self) -> &[SkippedPromotion] {
        &self.skipped
    }

    /// Sum of all applied discounts.
    pub fn total_discount(&self) -> &Money<'a, Currency> {
        &self.total_discount
    }

    /// Split into applied promotions, skipped promotions and the total discount.
    pub fn into_parts(
        self,
    ) -> (
        Vec<AppliedPromotion<'a>>,
        Vec<SkippedPromotion>,
        Money<'a, Currency>,
    ) {
        (self.applied, self.skipped, self.total_discount)
    }
}

/// Evaluate `promotions` in listing order against the indexed cart.
///
/// Malformed rules and rules whose arithmetic overflows are reported in
/// [`PromotionOutcome::skipped`]; they never affect the other promotions.
pub fn aggregate_promotions<'a>(
    cart: &CartIndex<'_, 'a>,
    promotions: &[PromotionDefinition],
    currency: &'a Currency,
) -> PromotionOutcome<'a> {
    let mut applied = Vec::new();
    let mut skipped = Vec::new();
    let mut total_minor = 0_i64;

    for definition in promotions {
        let evaluated = evaluate(cart, definition).and_then(|candidate| {
            let Some((rule, targets, discount)) = candidate else {
                return Ok(None);
            };

            let total = total_minor
                .checked_add(discount)
                .ok_or(DiscountError::Overflow)?;

            Ok(Some((rule, targets, discount, total)))
        });

        match evaluated {
            Ok(Some((rule, targets, discount, total))) => {
                total_minor = total;

                applied.push(AppliedPromotion {
                    promotion: definition.id(),
                    kind: rule.kind(),
                    description: rule.describe(),
                    discount: Money::from_minor(discount, currency),
                    targets,
                });
            }
            Ok(None) => {}
            Err(reason) => skipped.push(SkippedPromotion {
                promotion: definition.id(),
                reason,
            }),
        }
    }

    PromotionOutcome {
        applied,
        skipped,
        total_discount: Money::from_minor(total_minor, currency),
    }
}

fn evaluate(
    cart: &CartIndex<'_, '_>,
    definition: &PromotionDefinition,
) -> Result<Option<(PromotionRule, LineIndices, i64)>, SkipReason> {
    let rule = definition.rule()?;

    let Some(matched) = match_rule(&rule, cart) else {
        return Ok(None);
    };

    let discount = match &rule {
        PromotionRule::BuyXGetYFree(rule) => rule.calculate(&matched, cart)?,
        PromotionRule::BuyNPayM(rule) => rule.calculate(&matched, cart)?,
        PromotionRule::BulkPercentDiscount(rule) => rule.calculate(&matched, cart)?,
    };

    if discount <= 0 {
        return Ok(None);
    }

    Ok(Some((rule, matched.target_lines().into(), discount)))
}
