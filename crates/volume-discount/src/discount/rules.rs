use std::collections::BTreeSet;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use super::number;
use super::template::{self, DEFAULT_MESSAGE_TEMPLATE};

/// Shop metafield namespace the rules blob is stored under.
pub const METAFIELD_NAMESPACE: &str = "volume_discount";
/// Shop metafield key the rules blob is stored under.
pub const METAFIELD_KEY: &str = "rules";

/// Validated volume discount rules.
///
/// Only constructed through [`VolumeDiscountRules::from_json`], so a value of
/// this type always has at least one product and a positive percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeDiscountRules {
    products: BTreeSet<String>,
    #[serde(serialize_with = "number::serialize")]
    min_qty: f64,
    #[serde(serialize_with = "number::serialize")]
    percent_off: f64,
    #[serde(serialize_with = "serialize_template")]
    message_template: Option<String>,
}

/// Why a rules blob was not usable. Every variant means "no discount".
#[derive(Debug, thiserror::Error)]
pub enum RulesRejection {
    #[error("rules value is empty")]
    Empty,
    #[error("rules value is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("rules value must be a JSON object")]
    NotAnObject,
    #[error("`products` must be an array")]
    ProductsNotArray,
    #[error("`products` is empty")]
    NoProducts,
    #[error("`{0}` must be a number")]
    NotANumber(&'static str),
    #[error("`percentOff` must be greater than zero, got {0}")]
    NonPositivePercent(String),
}

impl VolumeDiscountRules {
    /// Parses and validates a rules blob, reporting why it was rejected.
    pub fn from_json(raw: &str) -> Result<Self, RulesRejection> {
        if raw.is_empty() {
            return Err(RulesRejection::Empty);
        }

        let value: Value = serde_json::from_str(raw)?;
        let Value::Object(fields) = value else {
            return Err(RulesRejection::NotAnObject);
        };

        let products = match fields.get("products") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(RulesRejection::ProductsNotArray),
        };
        let min_qty = number_field(&fields, "minQty")?;
        let percent_off = number_field(&fields, "percentOff")?;

        if products.is_empty() {
            return Err(RulesRejection::NoProducts);
        }
        if percent_off <= 0.0 {
            return Err(RulesRejection::NonPositivePercent(number::format(
                percent_off,
            )));
        }

        // Non-string entries could never equal a cart product id.
        let products = products
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();

        let message_template = ["widgetTemplate", "messageTemplate"]
            .into_iter()
            .filter_map(|name| fields.get(name).and_then(Value::as_str))
            .find(|template| !template.trim().is_empty())
            .map(str::to_string);

        Ok(Self {
            products,
            min_qty,
            percent_off,
            message_template,
        })
    }

    pub fn products(&self) -> &BTreeSet<String> {
        &self.products
    }

    /// Exact, case-sensitive membership test.
    pub fn covers(&self, product_id: &str) -> bool {
        self.products.contains(product_id)
    }

    pub fn min_qty(&self) -> f64 {
        self.min_qty
    }

    pub fn percent_off(&self) -> f64 {
        self.percent_off
    }

    /// The configured template, or the default one.
    pub fn message_template(&self) -> &str {
        self.message_template
            .as_deref()
            .unwrap_or(DEFAULT_MESSAGE_TEMPLATE)
    }

    /// Customer-facing message with the configured values filled in.
    pub fn message(&self) -> String {
        template::render(self.message_template(), self.min_qty, self.percent_off)
    }
}

fn number_field(fields: &Map<String, Value>, name: &'static str) -> Result<f64, RulesRejection> {
    fields
        .get(name)
        .and_then(Value::as_f64)
        .ok_or(RulesRejection::NotANumber(name))
}

fn serialize_template<S>(template: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(template.as_deref().unwrap_or(DEFAULT_MESSAGE_TEMPLATE))
}

/// Decodes the raw metafield value. A missing value and every rejection both
/// come back as `None`; the rejection is only logged.
pub fn decode(raw: Option<&str>) -> Option<VolumeDiscountRules> {
    let raw = raw?;

    match VolumeDiscountRules::from_json(raw) {
        Ok(rules) => Some(rules),
        Err(rejection) => {
            debug!(
                namespace = METAFIELD_NAMESPACE,
                key = METAFIELD_KEY,
                %rejection,
                "ignoring unusable volume discount rules"
            );
            None
        }
    }
}
