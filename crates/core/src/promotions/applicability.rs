//! Applicability
//!
//! Cheap pre-checks deciding whether a rule is worth calculating for a cart at all.

use crate::{
    cart::{CartIndex, LineIndices},
    promotions::PromotionRule,
};

/// Cart lines a candidate rule matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    trigger: LineIndices,
    targets: LineIndices,
}

impl RuleMatch {
    /// Lines whose quantity satisfies the rule's condition.
    pub fn trigger_lines(&self) -> &[usize] {
        &self.trigger
    }

    /// Lines the discount is taken from.
    ///
    /// For buy-X-get-Y these are the free SKU's lines, otherwise the same as the trigger lines.
    pub fn target_lines(&self) -> &[usize] {
        &self.targets
    }
}

/// Decide whether `rule` is a candidate for the indexed cart.
///
/// Returns the matched lines when it is, `None` otherwise.
pub fn match_rule(rule: &PromotionRule, cart: &CartIndex<'_, '_>) -> Option<RuleMatch> {
    match rule {
        PromotionRule::BuyXGetYFree(rule) => {
            let trigger = cart.indices(rule.trigger_sku());
            let targets = cart.indices(rule.free_sku());

            (!trigger.is_empty() && !targets.is_empty()).then(|| RuleMatch {
                trigger: trigger.into(),
                targets: targets.into(),
            })
        }
        PromotionRule::BuyNPayM(rule) => match_minimum(cart, rule.sku(), rule.min_qty()),
        PromotionRule::BulkPercentDiscount(rule) => {
            match_minimum(cart, rule.sku(), rule.min_qty())
        }
    }
}

fn match_minimum(cart: &CartIndex<'_, '_>, sku: &str, min_qty: u32) -> Option<RuleMatch> {
    let lines = cart.indices(sku);

    if lines.is_empty() || cart.quantity_at(lines) < u64::from(min_qty) {
        return None;
    }

    Some(RuleMatch {
        trigger: lines.into(),
        targets: lines.into(),
    })
}
