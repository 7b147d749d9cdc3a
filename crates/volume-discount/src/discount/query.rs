use crate::config::MetafieldConfig;

/// GraphQL input query the host runs to assemble [`super::CartInput`].
pub fn input_query(metafield: &MetafieldConfig) -> String {
    format!(
        r#"query CartInput {{
  cart {{
    lines {{
      id
      quantity
      merchandise {{
        __typename
        ... on ProductVariant {{
          product {{
            id
          }}
        }}
      }}
    }}
  }}
  discount {{
    discountClasses
  }}
  shop {{
    metafield(namespace: "{namespace}", key: "{key}") {{
      value
    }}
  }}
}}
"#,
        namespace = escape(&metafield.namespace),
        key = escape(&metafield.key),
    )
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
