use serde_json::{json, Value};

use crate::discount::input::{Cart, CartLine, DiscountClass, Merchandise, Product};
use crate::discount::rules::VolumeDiscountRules;

pub(super) const PRODUCT_A: &str = "gid://shopify/Product/123";
pub(super) const PRODUCT_B: &str = "gid://shopify/Product/456";
pub(super) const PRODUCT_OTHER: &str = "gid://shopify/Product/999";

pub(super) fn line_id(index: usize) -> String {
    format!("gid://shopify/CartLine/{index}")
}

pub(super) fn product_line(index: usize, quantity: u32, product_id: &str) -> CartLine {
    CartLine {
        id: line_id(index),
        quantity,
        merchandise: Merchandise::ProductVariant {
            product: Product {
                id: product_id.to_string(),
            },
        },
    }
}

pub(super) fn custom_line(index: usize, quantity: u32) -> CartLine {
    CartLine {
        id: line_id(index),
        quantity,
        merchandise: Merchandise::Other,
    }
}

pub(super) fn cart(lines: Vec<CartLine>) -> Cart {
    Cart { lines }
}

pub(super) fn product_class() -> Vec<DiscountClass> {
    vec![DiscountClass::Product]
}

pub(super) fn rules_json(products: &[&str], min_qty: u32, percent_off: u32) -> Value {
    json!({
        "products": products,
        "minQty": min_qty,
        "percentOff": percent_off,
    })
}

pub(super) fn rules(products: &[&str], min_qty: u32, percent_off: u32) -> VolumeDiscountRules {
    VolumeDiscountRules::from_json(&rules_json(products, min_qty, percent_off).to_string())
        .expect("fixture rules are valid")
}
