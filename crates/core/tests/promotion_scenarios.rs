//! Integration tests pricing whole carts through promotion aggregation and allocation.

use rusty_money::{Money, iso::GBP};
use serde_json::{Value, json};
use testresult::TestResult;
use uuid::Uuid;

use rebate::{
    allocation::AllocationStrategy,
    cart::CartLine,
    pricing::{PricedCart, price_cart},
    promotions::{
        PromotionDefinition, PromotionKind,
        aggregation::{AppliedPromotion, SkipReason, SkippedPromotion},
    },
};

fn line<'a>(sku: &str, quantity: u32, price: i64) -> CartLine<'a> {
    CartLine::new(
        Uuid::now_v7(),
        sku,
        format!("Product {sku}"),
        quantity,
        Money::from_minor(price, GBP),
    )
}

fn promotion(id: u128, kind: &str, parameters: Value) -> PromotionDefinition {
    PromotionDefinition::new(Uuid::from_u128(id), kind, parameters)
}

fn assert_balanced(priced: &PricedCart<'_>) {
    let applied: i64 = priced
        .applied()
        .iter()
        .map(|promotion| promotion.discount().to_minor_units())
        .sum();

    let subtotal = priced.subtotal().to_minor_units();
    let total_discount = priced.total_discount().to_minor_units();

    assert_eq!(total_discount, applied);
    assert_eq!(
        priced.total().to_minor_units(),
        (subtotal - total_discount).max(0)
    );

    let line_discounts: i64 = priced
        .lines()
        .iter()
        .map(|line| line.discount().to_minor_units())
        .sum();

    assert_eq!(line_discounts, total_discount.min(subtotal));

    for line in priced.lines() {
        assert!(line.discount().to_minor_units() <= line.subtotal().to_minor_units());
        assert_eq!(
            line.total().to_minor_units(),
            line.subtotal().to_minor_units() - line.discount().to_minor_units()
        );
    }
}

#[test]
fn buy_x_get_y_without_the_free_sku_applies_nothing() -> TestResult {
    let lines = [line("A", 1, 1_000)];
    let promotions = [promotion(
        1,
        "buy_x_get_y_free",
        json!({ "trigger_sku": "A", "free_sku": "B", "trigger_qty": 1, "free_qty": 1 }),
    )];

    let priced = price_cart(&lines, &promotions, GBP, AllocationStrategy::SkuAttributed)?;

    assert!(priced.applied().is_empty());
    assert_eq!(priced.total_discount().to_minor_units(), 0);
    assert_eq!(priced.total().to_minor_units(), 1_000);
    assert_balanced(&priced);

    Ok(())
}

#[test]
fn buy_x_get_y_frees_the_cheaper_sku() -> TestResult {
    let lines = [line("A", 1, 5_000), line("B", 1, 30)];
    let promotions = [promotion(
        1,
        "buy_x_get_y_free",
        json!({ "trigger_sku": "A", "free_sku": "B", "trigger_qty": 1, "free_qty": 1 }),
    )];

    let priced = price_cart(&lines, &promotions, GBP, AllocationStrategy::SkuAttributed)?;

    assert_eq!(priced.subtotal().to_minor_units(), 5_030);
    assert_eq!(priced.total_discount().to_minor_units(), 30);
    assert_eq!(priced.total().to_minor_units(), 5_000);

    let applied = priced.applied().first().ok_or("expected an applied promotion")?;

    assert_eq!(applied.kind(), PromotionKind::BuyXGetYFree);
    assert_eq!(applied.discount().to_minor_units(), 30);

    let free_line = priced.lines().get(1).ok_or("expected the free line")?;

    assert_eq!(free_line.discount().to_minor_units(), 30);
    assert_eq!(free_line.total().to_minor_units(), 0);
    assert_balanced(&priced);

    Ok(())
}

#[test]
fn three_for_two() -> TestResult {
    let lines = [line("G", 3, 50)];
    let promotions = [promotion(
        1,
        "buy_n_pay_m",
        json!({ "sku": "G", "min_qty": 3, "paid_units": 2, "free_units": 1 }),
    )];

    let priced = price_cart(&lines, &promotions, GBP, AllocationStrategy::SkuAttributed)?;

    assert_eq!(priced.total_discount().to_minor_units(), 50);
    assert_eq!(priced.total().to_minor_units(), 100);
    assert_balanced(&priced);

    Ok(())
}

#[test]
fn ten_percent_bulk_discount() -> TestResult {
    let lines = [line("S", 4, 100)];
    let promotions = [promotion(
        1,
        "bulk_percent_discount",
        json!({ "sku": "S", "min_qty": 4, "discount_percent": 10 }),
    )];

    let priced = price_cart(&lines, &promotions, GBP, AllocationStrategy::Proportional)?;

    assert_eq!(priced.total_discount().to_minor_units(), 40);
    assert_eq!(priced.total().to_minor_units(), 360);
    assert_balanced(&priced);

    Ok(())
}

#[test]
fn broken_rules_are_excluded_without_affecting_the_rest() -> TestResult {
    let lines = [line("S", 4, 100), line("G", 3, 50)];
    let promotions = [
        promotion(
            1,
            "bulk_percent_discount",
            json!({ "sku": "S", "min_qty": 4, "discount_percent": 0 }),
        ),
        promotion(
            2,
            "bulk_percent_discount",
            json!({ "min_qty": 4, "discount_percent": 10 }),
        ),
        promotion(
            3,
            "buy_n_pay_m",
            json!({ "sku": "G", "min_qty": 3, "paid_units": 2, "free_units": 1 }),
        ),
    ];

    let priced = price_cart(&lines, &promotions, GBP, AllocationStrategy::SkuAttributed)?;

    let applied: Vec<_> = priced
        .applied()
        .iter()
        .map(AppliedPromotion::promotion)
        .collect();

    assert_eq!(applied, [Uuid::from_u128(3)]);
    assert_eq!(priced.total_discount().to_minor_units(), 50);

    let skipped: Vec<_> = priced
        .skipped()
        .iter()
        .map(SkippedPromotion::promotion)
        .collect();

    assert_eq!(skipped, [Uuid::from_u128(1), Uuid::from_u128(2)]);
    assert!(
        priced
            .skipped()
            .iter()
            .all(|skipped| matches!(skipped.reason(), SkipReason::Inapplicable(_)))
    );
    assert_balanced(&priced);

    Ok(())
}

#[test]
fn promotions_do_not_consume_each_others_units() -> TestResult {
    let lines = [line("S", 6, 100)];
    let promotions = [
        promotion(
            1,
            "bulk_percent_discount",
            json!({ "sku": "S", "min_qty": 6, "discount_percent": "12.5" }),
        ),
        promotion(
            2,
            "buy_n_pay_m",
            json!({ "sku": "S", "min_qty": 3, "paid_units": 2, "free_units": 1 }),
        ),
    ];

    let priced = price_cart(&lines, &promotions, GBP, AllocationStrategy::SkuAttributed)?;

    // 12.5% of 600 and two free units out of two complete sets, both against all six units
    let discounts: Vec<_> = priced
        .applied()
        .iter()
        .map(|promotion| promotion.discount().to_minor_units())
        .collect();

    assert_eq!(discounts, [75, 200]);
    assert_eq!(priced.total().to_minor_units(), 325);
    assert_balanced(&priced);

    Ok(())
}

#[test]
fn both_strategies_keep_the_line_allocation_balanced() -> TestResult {
    let lines = [
        line("A", 2, 999),
        line("B", 3, 333),
        line("S", 5, 123),
        line("C", 1, 7),
        line("S", 2, 123),
    ];
    let promotions = [
        promotion(
            1,
            "buy_x_get_y_free",
            json!({ "trigger_sku": "A", "free_sku": "B", "trigger_qty": 1, "free_qty": 1 }),
        ),
        promotion(
            2,
            "bulk_percent_discount",
            json!({ "sku": "S", "min_qty": 5, "discount_percent": 17 }),
        ),
    ];

    for strategy in [
        AllocationStrategy::Proportional,
        AllocationStrategy::SkuAttributed,
    ] {
        let priced = price_cart(&lines, &promotions, GBP, strategy)?;

        assert_eq!(priced.applied().len(), 2);
        assert_balanced(&priced);
    }

    Ok(())
}

#[test]
fn pricing_is_deterministic() -> TestResult {
    let lines = [line("A", 1, 5_000), line("B", 2, 30), line("G", 7, 45)];
    let promotions = [
        promotion(
            1,
            "buy_x_get_y_free",
            json!({ "trigger_sku": "A", "free_sku": "B", "trigger_qty": 1, "free_qty": 1 }),
        ),
        promotion(
            2,
            "buy_n_pay_m",
            json!({ "sku": "G", "min_qty": 3, "paid_units": 2, "free_units": 1 }),
        ),
    ];

    let first = price_cart(&lines, &promotions, GBP, AllocationStrategy::SkuAttributed)?;
    let second = price_cart(&lines, &promotions, GBP, AllocationStrategy::SkuAttributed)?;

    assert_eq!(first.lines(), second.lines());
    assert_eq!(first.applied(), second.applied());
    assert_eq!(first.total(), second.total());

    Ok(())
}
