//! Number formatting shared by message rendering and the wire format.

use serde::Serializer;

// Largest magnitude where every integer is exactly representable in an f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_991.0;

fn as_integer(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        Some(value as i64)
    } else {
        None
    }
}

/// Renders a configured number for display the way a JavaScript template
/// literal would: `10`, `12.5`, `1e-7`, `1e+22`, never `10.0`.
pub fn format(value: f64) -> String {
    if let Some(integer) = as_integer(value) {
        return integer.to_string();
    }

    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        exponential(value)
    } else {
        value.to_string()
    }
}

// Shortest round-trip digits with a signed exponent, e.g. `1.5e+22`.
fn exponential(value: f64) -> String {
    let rendered = format!("{value:e}");
    match rendered.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => rendered,
    }
}

/// Writes integral values as JSON integers so `10` does not become `10.0`.
pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match as_integer(*value) {
        Some(integer) => serializer.serialize_i64(integer),
        None => serializer.serialize_f64(*value),
    }
}
