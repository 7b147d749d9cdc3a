use serde::Serialize;
use tracing::debug;

use super::input::{Cart, CartInput, CartLine, DiscountClass};
use super::number;
use super::output::{
    CartLineTarget, CartLinesDiscountsGenerateRunResult, DiscountOperation, Percentage,
    ProductDiscountCandidate, ProductDiscountCandidateTarget, ProductDiscountCandidateValue,
    ProductDiscountSelectionStrategy, ProductDiscountsAddOperation,
};
use super::rules::{self, VolumeDiscountRules};

/// Outcome of a single evaluation, keeping the reason when nothing applies.
#[derive(Debug, Clone, PartialEq)]
pub enum DiscountDecision {
    Apply(DiscountOperation),
    Skip(SkipReason),
}

impl DiscountDecision {
    pub fn into_operations(self) -> Vec<DiscountOperation> {
        match self {
            DiscountDecision::Apply(operation) => vec![operation],
            DiscountDecision::Skip(_) => Vec::new(),
        }
    }

    pub fn summary(&self) -> String {
        match self {
            DiscountDecision::Apply(operation) => {
                let targets: usize = operation
                    .product_discounts()
                    .candidates
                    .iter()
                    .map(|candidate| candidate.targets.len())
                    .sum();
                format!("discount applied to {targets} line(s)")
            }
            DiscountDecision::Skip(reason) => reason.summary(),
        }
    }
}

/// Normal, expected reasons for returning no operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    ProductClassNotRequested,
    EmptyCart,
    NotConfigured,
    NoMatchingLines,
    BelowThreshold {
        #[serde(serialize_with = "number::serialize")]
        required: f64,
        actual: u64,
    },
}

impl SkipReason {
    pub fn summary(&self) -> String {
        match self {
            SkipReason::ProductClassNotRequested => {
                "product discount class was not requested".to_string()
            }
            SkipReason::EmptyCart => "cart has no lines".to_string(),
            SkipReason::NotConfigured => "no usable volume discount rules".to_string(),
            SkipReason::NoMatchingLines => "no cart line matches a configured product".to_string(),
            SkipReason::BelowThreshold { required, actual } => format!(
                "matching quantity {actual} is below the minimum of {}",
                number::format(*required)
            ),
        }
    }
}

/// Runs every gate in order and either builds the operation or names the gate
/// that stopped it.
pub fn decide(
    cart: &Cart,
    discount_classes: &[DiscountClass],
    rules: Option<&VolumeDiscountRules>,
) -> DiscountDecision {
    if !discount_classes.contains(&DiscountClass::Product) {
        return DiscountDecision::Skip(SkipReason::ProductClassNotRequested);
    }

    if cart.is_empty() {
        return DiscountDecision::Skip(SkipReason::EmptyCart);
    }

    let Some(rules) = rules else {
        return DiscountDecision::Skip(SkipReason::NotConfigured);
    };

    let matched: Vec<&CartLine> = cart
        .lines
        .iter()
        .filter(|line| line.product_id().is_some_and(|id| rules.covers(id)))
        .collect();

    if matched.is_empty() {
        return DiscountDecision::Skip(SkipReason::NoMatchingLines);
    }

    let total: u64 = matched.iter().map(|line| u64::from(line.quantity)).sum();
    if (total as f64) < rules.min_qty() {
        return DiscountDecision::Skip(SkipReason::BelowThreshold {
            required: rules.min_qty(),
            actual: total,
        });
    }

    DiscountDecision::Apply(build_operation(rules, &matched))
}

/// Zero or one operation for the given cart.
pub fn evaluate(
    cart: &Cart,
    discount_classes: &[DiscountClass],
    rules: Option<&VolumeDiscountRules>,
) -> Vec<DiscountOperation> {
    decide(cart, discount_classes, rules).into_operations()
}

/// Function entrypoint: decode the shop rules and evaluate the cart.
pub fn run(input: &CartInput) -> CartLinesDiscountsGenerateRunResult {
    let rules = rules::decode(input.rules_value());
    let decision = decide(
        &input.cart,
        &input.discount.discount_classes,
        rules.as_ref(),
    );

    debug!(
        lines = input.cart.lines.len(),
        outcome = %decision.summary(),
        "volume discount evaluated"
    );

    CartLinesDiscountsGenerateRunResult {
        operations: decision.into_operations(),
    }
}

fn build_operation(rules: &VolumeDiscountRules, matched: &[&CartLine]) -> DiscountOperation {
    let targets = matched
        .iter()
        .map(|line| {
            ProductDiscountCandidateTarget::CartLine(CartLineTarget {
                id: line.id.clone(),
            })
        })
        .collect();

    DiscountOperation::ProductDiscountsAdd(ProductDiscountsAddOperation {
        candidates: vec![ProductDiscountCandidate {
            message: rules.message(),
            targets,
            value: ProductDiscountCandidateValue::Percentage(Percentage {
                value: rules.percent_off(),
            }),
        }],
        selection_strategy: ProductDiscountSelectionStrategy::All,
    })
}
