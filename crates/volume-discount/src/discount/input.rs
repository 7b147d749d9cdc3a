use serde::{Deserialize, Serialize};

/// Function input assembled by the host from the input query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartInput {
    pub cart: Cart,
    pub discount: DiscountInput,
    #[serde(default)]
    pub shop: Shop,
}

impl CartInput {
    /// Raw rules blob, if the shop has one.
    pub fn rules_value(&self) -> Option<&str> {
        self.shop
            .metafield
            .as_ref()
            .and_then(|metafield| metafield.value.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: String,
    pub quantity: u32,
    pub merchandise: Merchandise,
}

impl CartLine {
    /// Id of the backing product; `None` for merchandise that is not a variant.
    pub fn product_id(&self) -> Option<&str> {
        match &self.merchandise {
            Merchandise::ProductVariant { product } => Some(product.id.as_str()),
            Merchandise::Other => None,
        }
    }
}

/// What a cart line is buying, discriminated by the host's `__typename`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum Merchandise {
    ProductVariant {
        product: Product,
    },
    /// Custom products, gift cards and anything else without a product id.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountInput {
    #[serde(default)]
    pub discount_classes: Vec<DiscountClass>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountClass {
    Product,
    Order,
    Shipping,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    #[serde(default)]
    pub metafield: Option<Metafield>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metafield {
    #[serde(default)]
    pub value: Option<String>,
}
