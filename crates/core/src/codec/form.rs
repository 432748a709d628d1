//! `application/x-www-form-urlencoded` encoding of parameter maps.
//!
//! Nested values use the bracket notation the remote API expects:
//! `vars[name]=Bob`, `items[0][qty]=1`.

use sailthru_domain::{ParamValue, ParameterMap};
use url::form_urlencoded;

/// Flatten `params` into `(name, value)` pairs in insertion order.
///
/// Null values are dropped; booleans become `1`/`0`.
pub fn form_pairs(params: &ParameterMap) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params.iter() {
        push_pairs(key.to_string(), value, &mut pairs);
    }
    pairs
}

/// Encode `params` as a form body / query string (without a leading `?`).
pub fn encode_form(params: &ParameterMap) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in form_pairs(params) {
        serializer.append_pair(&name, &value);
    }
    serializer.finish()
}

/// Parse a form-encoded body into a flat map.
///
/// Bracketed names are kept verbatim (`vars[name]` stays one key). Signature
/// checks only look at values, so the nesting never matters for them.
pub fn parse_form(body: &str) -> ParameterMap {
    form_urlencoded::parse(body.as_bytes())
        .map(|(name, value)| (name.into_owned(), ParamValue::Str(value.into_owned())))
        .collect()
}

fn push_pairs(name: String, value: &ParamValue, out: &mut Vec<(String, String)>) {
    match value {
        ParamValue::Null => {}
        ParamValue::Map(map) => {
            for (key, nested) in map.iter() {
                push_pairs(format!("{name}[{key}]"), nested, out);
            }
        }
        ParamValue::List(items) => {
            for (index, item) in items.iter().enumerate() {
                push_pairs(format!("{name}[{index}]"), item, out);
            }
        }
        scalar => {
            if let Some(text) = scalar.scalar_string() {
                out.push((name, text));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_parameters_keep_insertion_order() {
        let params = ParameterMap::new().with("list", "vip").with("format", "json");
        assert_eq!(encode_form(&params), "list=vip&format=json");
    }

    #[test]
    fn nested_values_use_bracket_notation() {
        let item = ParameterMap::new().with("qty", 1).with("title", "Blue Shoes");
        let params = ParameterMap::new()
            .with("email", "a@b.com")
            .with("items", vec![ParamValue::from(item)])
            .with("vars", ParameterMap::new().with("vip", true));

        assert_eq!(
            form_pairs(&params),
            vec![
                ("email".to_string(), "a@b.com".to_string()),
                ("items[0][qty]".to_string(), "1".to_string()),
                ("items[0][title]".to_string(), "Blue Shoes".to_string()),
                ("vars[vip]".to_string(), "1".to_string()),
            ]
        );
        assert_eq!(
            encode_form(&params),
            "email=a%40b.com&items%5B0%5D%5Bqty%5D=1&items%5B0%5D%5Btitle%5D=Blue+Shoes&vars%5Bvip%5D=1"
        );
    }

    #[test]
    fn nulls_are_omitted_and_empty_strings_kept() {
        let params = ParameterMap::new()
            .with("blast_id", 42)
            .with("schedule_time", "")
            .with("name", ParamValue::Null);
        assert_eq!(encode_form(&params), "blast_id=42&schedule_time=");
    }

    #[test]
    fn parses_inbound_form_bodies() {
        let fields = parse_form("action=verify&email=a%40b.com&vars%5Bname%5D=Bob+Smith&sig=abc");
        assert_eq!(fields.get_str("action"), Some("verify"));
        assert_eq!(fields.get_str("email"), Some("a@b.com"));
        assert_eq!(fields.get_str("vars[name]"), Some("Bob Smith"));
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["action", "email", "vars[name]", "sig"]);
    }

    #[test]
    fn empty_map_encodes_to_empty_string() {
        assert_eq!(encode_form(&ParameterMap::new()), "");
    }
}
