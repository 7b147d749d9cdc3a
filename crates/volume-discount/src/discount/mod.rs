//! Cart-lines discount function: input/output wire types, rules decoding and
//! the evaluator that ties them together.

pub mod evaluation;
pub mod input;
pub mod number;
pub mod output;
pub mod query;
pub mod rules;
pub mod template;

#[cfg(test)]
mod tests;

pub use evaluation::{decide, evaluate, run, DiscountDecision, SkipReason};
pub use input::{
    Cart, CartInput, CartLine, DiscountClass, DiscountInput, Merchandise, Metafield, Product, Shop,
};
pub use output::{
    CartLineTarget, CartLinesDiscountsGenerateRunResult, DiscountOperation, Percentage,
    ProductDiscountCandidate, ProductDiscountCandidateTarget, ProductDiscountCandidateValue,
    ProductDiscountSelectionStrategy, ProductDiscountsAddOperation,
};
pub use query::input_query;
pub use rules::{decode, RulesRejection, VolumeDiscountRules};
pub use template::DEFAULT_MESSAGE_TEMPLATE;
