use super::common::*;
use crate::discount::evaluation::{decide, evaluate, DiscountDecision, SkipReason};
use crate::discount::input::{Cart, DiscountClass};
use crate::discount::output::{
    DiscountOperation, ProductDiscountCandidateValue, ProductDiscountSelectionStrategy,
};

fn single_operation(operations: Vec<DiscountOperation>) -> DiscountOperation {
    assert_eq!(operations.len(), 1, "expected exactly one operation");
    operations.into_iter().next().expect("one operation")
}

fn target_ids(operation: &DiscountOperation) -> Vec<String> {
    let discounts = operation.product_discounts();
    assert_eq!(discounts.candidates.len(), 1);
    discounts.candidates[0]
        .target_line_ids()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[test]
fn applies_when_single_line_meets_minimum() {
    let rules = rules(&[PRODUCT_A], 2, 10);
    let cart = cart(vec![product_line(1, 2, PRODUCT_A)]);

    let operation = single_operation(evaluate(&cart, &product_class(), Some(&rules)));
    let discounts = operation.product_discounts();
    let candidate = &discounts.candidates[0];

    assert_eq!(candidate.message, "Buy 2, get 10% off");
    assert_eq!(target_ids(&operation), vec![line_id(1)]);
    let ProductDiscountCandidateValue::Percentage(percentage) = &candidate.value;
    assert_eq!(percentage.value, 10.0);
    assert_eq!(
        discounts.selection_strategy,
        ProductDiscountSelectionStrategy::All
    );
}

#[test]
fn skips_when_quantity_is_below_minimum() {
    let rules = rules(&[PRODUCT_A], 2, 10);
    let cart = cart(vec![product_line(1, 1, PRODUCT_A)]);

    let decision = decide(&cart, &product_class(), Some(&rules));

    match decision {
        DiscountDecision::Skip(SkipReason::BelowThreshold { required, actual }) => {
            assert_eq!(required, 2.0);
            assert_eq!(actual, 1);
        }
        other => panic!("expected below-threshold skip, got {other:?}"),
    }
    assert!(evaluate(&cart, &product_class(), Some(&rules)).is_empty());
}

#[test]
fn combines_quantities_across_configured_products() {
    let rules = rules(&[PRODUCT_A, PRODUCT_B], 2, 20);
    let cart = cart(vec![
        product_line(1, 1, PRODUCT_A),
        product_line(2, 1, PRODUCT_B),
    ]);

    let operation = single_operation(evaluate(&cart, &product_class(), Some(&rules)));

    assert_eq!(target_ids(&operation), vec![line_id(1), line_id(2)]);
    assert_eq!(
        operation.product_discounts().candidates[0].message,
        "Buy 2, get 20% off"
    );
}

#[test]
fn unmatched_lines_neither_count_nor_receive_the_discount() {
    let rules = rules(&[PRODUCT_A], 3, 15);
    let below = cart(vec![
        product_line(1, 2, PRODUCT_A),
        product_line(2, 5, PRODUCT_OTHER),
        custom_line(3, 4),
    ]);

    assert_eq!(
        decide(&below, &product_class(), Some(&rules)),
        DiscountDecision::Skip(SkipReason::BelowThreshold {
            required: 3.0,
            actual: 2
        })
    );

    let met = cart(vec![
        product_line(1, 3, PRODUCT_A),
        product_line(2, 5, PRODUCT_OTHER),
        custom_line(3, 4),
    ]);
    let operation = single_operation(evaluate(&met, &product_class(), Some(&rules)));
    assert_eq!(target_ids(&operation), vec![line_id(1)]);
}

#[test]
fn non_product_merchandise_never_matches() {
    let rules = rules(&[PRODUCT_A], 1, 10);
    let cart = cart(vec![custom_line(1, 10)]);

    assert_eq!(
        decide(&cart, &product_class(), Some(&rules)),
        DiscountDecision::Skip(SkipReason::NoMatchingLines)
    );
}

#[test]
fn product_ids_match_exactly() {
    let rules = rules(&[PRODUCT_A], 1, 10);
    let cart = cart(vec![
        product_line(1, 5, &PRODUCT_A.to_uppercase()),
        product_line(2, 5, "gid://shopify/Product/1234"),
        product_line(3, 5, "gid://shopify/Product/12"),
    ]);

    assert!(evaluate(&cart, &product_class(), Some(&rules)).is_empty());
}

#[test]
fn lines_sharing_a_product_are_separate_targets() {
    let rules = rules(&[PRODUCT_A], 4, 10);
    let cart = cart(vec![
        product_line(1, 2, PRODUCT_A),
        product_line(2, 2, PRODUCT_A),
    ]);

    let operation = single_operation(evaluate(&cart, &product_class(), Some(&rules)));

    assert_eq!(target_ids(&operation), vec![line_id(1), line_id(2)]);
}

#[test]
fn small_lines_are_discounted_once_the_aggregate_qualifies() {
    let rules = rules(&[PRODUCT_A, PRODUCT_B], 5, 10);
    let cart = cart(vec![
        product_line(1, 9, PRODUCT_A),
        product_line(2, 1, PRODUCT_B),
    ]);

    let operation = single_operation(evaluate(&cart, &product_class(), Some(&rules)));

    assert_eq!(target_ids(&operation), vec![line_id(1), line_id(2)]);
}

#[test]
fn requires_the_product_discount_class() {
    let rules = rules(&[PRODUCT_A], 1, 10);
    let cart = cart(vec![product_line(1, 5, PRODUCT_A)]);

    for classes in [
        vec![],
        vec![DiscountClass::Order],
        vec![DiscountClass::Order, DiscountClass::Shipping],
        vec![DiscountClass::Unknown],
    ] {
        assert_eq!(
            decide(&cart, &classes, Some(&rules)),
            DiscountDecision::Skip(SkipReason::ProductClassNotRequested)
        );
    }

    let mixed = vec![DiscountClass::Order, DiscountClass::Product];
    assert_eq!(evaluate(&cart, &mixed, Some(&rules)).len(), 1);
}

#[test]
fn empty_cart_yields_nothing() {
    let rules = rules(&[PRODUCT_A], 1, 10);

    assert_eq!(
        decide(&Cart::default(), &product_class(), Some(&rules)),
        DiscountDecision::Skip(SkipReason::EmptyCart)
    );
    assert_eq!(
        decide(&Cart::default(), &product_class(), None),
        DiscountDecision::Skip(SkipReason::EmptyCart)
    );
}

#[test]
fn missing_rules_yield_nothing() {
    let cart = cart(vec![product_line(1, 50, PRODUCT_A)]);

    assert_eq!(
        decide(&cart, &product_class(), None),
        DiscountDecision::Skip(SkipReason::NotConfigured)
    );
}

#[test]
fn increasing_a_matched_quantity_never_removes_the_discount() {
    let rules = rules(&[PRODUCT_A, PRODUCT_B], 6, 10);

    let mut seen_apply = false;
    for quantity in 1..=10 {
        let cart = cart(vec![
            product_line(1, quantity, PRODUCT_A),
            product_line(2, 2, PRODUCT_B),
        ]);
        let applied = !evaluate(&cart, &product_class(), Some(&rules)).is_empty();

        if seen_apply {
            assert!(applied, "discount disappeared at quantity {quantity}");
        }
        seen_apply |= applied;
        assert_eq!(applied, quantity + 2 >= 6);
    }
    assert!(seen_apply);
}

#[test]
fn targets_equal_the_matched_lines() {
    let rules = rules(&[PRODUCT_A, PRODUCT_B], 1, 10);
    let cart = cart(vec![
        custom_line(1, 1),
        product_line(2, 1, PRODUCT_B),
        product_line(3, 1, PRODUCT_OTHER),
        product_line(4, 1, PRODUCT_A),
        product_line(5, 1, PRODUCT_B),
    ]);

    let operation = single_operation(evaluate(&cart, &product_class(), Some(&rules)));

    assert_eq!(
        target_ids(&operation),
        vec![line_id(2), line_id(4), line_id(5)]
    );
}

#[test]
fn evaluation_is_repeatable() {
    let rules = rules(&[PRODUCT_A], 2, 10);
    let cart = cart(vec![
        product_line(1, 1, PRODUCT_A),
        product_line(2, 3, PRODUCT_A),
    ]);

    let first = evaluate(&cart, &product_class(), Some(&rules));
    let second = evaluate(&cart, &product_class(), Some(&rules));

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("serializes"),
        serde_json::to_string(&second).expect("serializes")
    );
}

#[test]
fn fractional_minimum_compares_numerically() {
    let rules = crate::discount::rules::VolumeDiscountRules::from_json(
        r#"{"products":["gid://shopify/Product/123"],"minQty":2.5,"percentOff":10}"#,
    )
    .expect("rules decode");

    let two = cart(vec![product_line(1, 2, PRODUCT_A)]);
    let three = cart(vec![product_line(1, 3, PRODUCT_A)]);

    assert!(evaluate(&two, &product_class(), Some(&rules)).is_empty());
    assert_eq!(evaluate(&three, &product_class(), Some(&rules)).len(), 1);
}

#[test]
fn skip_reasons_read_naturally() {
    assert_eq!(
        SkipReason::BelowThreshold {
            required: 3.0,
            actual: 1
        }
        .summary(),
        "matching quantity 1 is below the minimum of 3"
    );
    assert_eq!(
        DiscountDecision::Skip(SkipReason::NotConfigured).summary(),
        "no usable volume discount rules"
    );
}
