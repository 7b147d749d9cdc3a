use crate::infra::RulesPreview;
use clap::Args;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::info;
use volume_discount::config::AppConfig;
use volume_discount::discount::{self, number, CartInput, CartLinesDiscountsGenerateRunResult};
use volume_discount::error::AppError;
use volume_discount::telemetry;

#[derive(Args, Debug, Default)]
pub(crate) struct RunArgs {
    /// Function input JSON file (reads stdin when omitted)
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Pretty-print the function output
    #[arg(long)]
    pub(crate) pretty: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub(crate) struct PreviewArgs {
    /// File holding the raw metafield value
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
    /// Raw metafield value given inline
    #[arg(long)]
    pub(crate) value: Option<String>,
}

pub(crate) fn run_function(args: RunArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let raw = match &args.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let result = evaluate_input(&raw)?;
    info!(
        operations = result.operations.len(),
        "volume discount function completed"
    );

    let rendered = render_output(&result, args.pretty)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}

pub(crate) fn evaluate_input(raw: &str) -> Result<CartLinesDiscountsGenerateRunResult, AppError> {
    let input: CartInput = serde_json::from_str(raw)?;
    Ok(discount::run(&input))
}

fn render_output(
    result: &CartLinesDiscountsGenerateRunResult,
    pretty: bool,
) -> Result<String, AppError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(rendered)
}

pub(crate) fn run_preview(args: PreviewArgs) -> Result<(), AppError> {
    let raw = match (args.rules, args.value) {
        (Some(path), _) => Some(std::fs::read_to_string(path)?),
        (None, value) => value,
    };

    let preview = RulesPreview::from_value(raw.as_deref());
    print_preview(&preview);
    Ok(())
}

fn print_preview(preview: &RulesPreview) {
    println!("Volume discount rules preview");

    match (&preview.rules, &preview.rejection) {
        (Some(rules), _) => {
            println!("Status: usable");
            println!("\nConfigured products");
            for product in rules.products() {
                println!("- {product}");
            }
            println!("\nMinimum combined quantity: {}", number::format(rules.min_qty()));
            println!("Percent off: {}%", number::format(rules.percent_off()));
            println!("Template: {}", rules.message_template());
            if let Some(message) = &preview.message {
                println!("Message: {message}");
            }
        }
        (None, Some(rejection)) => {
            println!("Status: not usable, carts receive no discount");
            println!("Reason: {rejection}");
        }
        (None, None) => {
            println!("Status: not usable, carts receive no discount");
        }
    }
}

pub(crate) fn run_query() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    print!("{}", discount::input_query(&config.metafield));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn evaluate_input_runs_the_function() {
        let raw = json!({
            "cart": { "lines": [{
                "id": "gid://shopify/CartLine/1",
                "quantity": 2,
                "merchandise": {
                    "__typename": "ProductVariant",
                    "product": { "id": "gid://shopify/Product/123" }
                }
            }] },
            "discount": { "discountClasses": ["PRODUCT"] },
            "shop": { "metafield": { "value": "{\"products\":[\"gid://shopify/Product/123\"],\"minQty\":2,\"percentOff\":10}" } }
        })
        .to_string();

        let result = evaluate_input(&raw).expect("input evaluates");
        assert_eq!(result.operations.len(), 1);

        let compact = render_output(&result, false).expect("renders");
        assert!(compact.starts_with(r#"{"operations":[{"productDiscountsAdd":"#));
        assert!(compact.contains(r#""percentage":{"value":10}"#));
    }

    #[test]
    fn evaluate_input_rejects_malformed_payloads() {
        let err = evaluate_input(r#"{"cart": {"lines": "nope"}}"#).expect_err("bad payload");
        assert!(matches!(err, AppError::Input(_)));
    }

    #[test]
    fn empty_result_renders_compactly() {
        let rendered = render_output(&CartLinesDiscountsGenerateRunResult::empty(), false)
            .expect("renders");
        assert_eq!(rendered, r#"{"operations":[]}"#);
    }
}
