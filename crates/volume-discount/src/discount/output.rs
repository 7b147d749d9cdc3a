use serde::{Deserialize, Serialize};

use super::number;

/// Function output handed back to the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartLinesDiscountsGenerateRunResult {
    pub operations: Vec<DiscountOperation>,
}

impl CartLinesDiscountsGenerateRunResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Instruction for the host. This function only ever adds product discounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DiscountOperation {
    #[serde(rename = "productDiscountsAdd")]
    ProductDiscountsAdd(ProductDiscountsAddOperation),
}

impl DiscountOperation {
    pub fn product_discounts(&self) -> &ProductDiscountsAddOperation {
        match self {
            DiscountOperation::ProductDiscountsAdd(operation) => operation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDiscountsAddOperation {
    pub candidates: Vec<ProductDiscountCandidate>,
    pub selection_strategy: ProductDiscountSelectionStrategy,
}

/// How the host picks among candidate targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductDiscountSelectionStrategy {
    /// Every target receives the discount.
    All,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDiscountCandidate {
    pub message: String,
    pub targets: Vec<ProductDiscountCandidateTarget>,
    pub value: ProductDiscountCandidateValue,
}

impl ProductDiscountCandidate {
    /// Cart line ids in target order.
    pub fn target_line_ids(&self) -> Vec<&str> {
        self.targets
            .iter()
            .map(|target| match target {
                ProductDiscountCandidateTarget::CartLine(line) => line.id.as_str(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProductDiscountCandidateTarget {
    #[serde(rename = "cartLine")]
    CartLine(CartLineTarget),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineTarget {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProductDiscountCandidateValue {
    #[serde(rename = "percentage")]
    Percentage(Percentage),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percentage {
    #[serde(serialize_with = "number::serialize")]
    pub value: f64,
}
