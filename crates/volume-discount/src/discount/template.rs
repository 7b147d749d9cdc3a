//! Message rendering for the discount candidate.
//!
//! Only two placeholders exist, so this is a single left-to-right scan rather
//! than a template engine. `{{ minQty }}` and `{{ percentOff }}` are replaced
//! wherever they appear; names match case-insensitively and may be padded
//! with whitespace. The single-brace forms `{minQty}` / `{percentOff}` are
//! accepted as well. Anything else between braces is left untouched.

use super::number;

/// Message used when the rules do not carry a template of their own.
pub const DEFAULT_MESSAGE_TEMPLATE: &str = "Buy {{minQty}}, get {{percentOff}}% off";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    MinQty,
    PercentOff,
}

impl Placeholder {
    fn parse(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("minqty") {
            Some(Self::MinQty)
        } else if name.eq_ignore_ascii_case("percentoff") {
            Some(Self::PercentOff)
        } else {
            None
        }
    }
}

/// Substitutes the configured values into `template`.
pub fn render(template: &str, min_qty: f64, percent_off: f64) -> String {
    let mut rendered = String::with_capacity(template.len() + 8);
    let mut rest = template;
    let mut after_open_brace = false;

    while let Some(start) = rest.find('{') {
        rendered.push_str(&rest[..start]);
        let candidate = &rest[start..];
        let single_allowed = !(after_open_brace && start == 0);

        match placeholder_at(candidate, single_allowed) {
            Some((placeholder, consumed)) => {
                let value = match placeholder {
                    Placeholder::MinQty => min_qty,
                    Placeholder::PercentOff => percent_off,
                };
                rendered.push_str(&number::format(value));
                rest = &candidate[consumed..];
                after_open_brace = false;
            }
            None => {
                rendered.push('{');
                rest = &candidate[1..];
                after_open_brace = true;
            }
        }
    }

    rendered.push_str(rest);
    rendered
}

/// Recognizes a placeholder at the start of `text`, returning it along with
/// the number of bytes it spans. A single-brace placeholder directly after a
/// literal `{` belongs to a broken `{{ }}` pair and is not recognized.
fn placeholder_at(text: &str, single_allowed: bool) -> Option<(Placeholder, usize)> {
    let (open, close) = if text.starts_with("{{") {
        ("{{", "}}")
    } else if single_allowed {
        ("{", "}")
    } else {
        return None;
    };

    let body = &text[open.len()..];
    // The name never contains braces, so stop at the first one.
    let end = body.find(['{', '}'])?;
    if !body[end..].starts_with(close) {
        return None;
    }

    let placeholder = Placeholder::parse(body[..end].trim())?;
    Some((placeholder, open.len() + end + close.len()))
}
