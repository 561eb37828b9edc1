//! JSON text <-> value model.

use std::io::Read;

use jsondoc_util::normalize;

use crate::error::DocumentResult;
use crate::value::Value;

/// Parse JSON text into a canonical value.
pub fn parse(text: &str) -> DocumentResult<Value> {
    let value: Value = serde_json::from_str(text)?;
    Ok(normalize(value))
}

/// Parse JSON from a reader into a canonical value.
pub fn parse_reader<R: Read>(reader: R) -> DocumentResult<Value> {
    let value: Value = serde_json::from_reader(reader)?;
    Ok(normalize(value))
}

/// Compact JSON text. Object members come out in key order.
pub fn to_json(value: &Value) -> String {
    value.to_string()
}

/// Indented JSON text.
pub fn to_json_pretty(value: &Value) -> String {
    format!("{value:#}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocumentError;
    use jsondoc_util::deep_equal;
    use serde_json::json;

    #[test]
    fn test_parse_canonicalizes_numbers() {
        assert_eq!(parse("[1.0, 2.5, -0.0]").unwrap(), json!([1, 2.5, 0]));
    }

    #[test]
    fn test_parse_error() {
        for text in ["", "{", "{\"a\" 1}", "[1,]", "nul"] {
            assert!(matches!(parse(text), Err(DocumentError::Parse(_))), "{text:?}");
        }
    }

    #[test]
    fn test_round_trip() {
        let text = r#"{ "f1": "v1", "f3": [10, 20, 30], "f4": {"f41": "v2"}, "f5": 9.9 }"#;
        let value = parse(text).unwrap();
        let back = parse(&to_json(&value)).unwrap();
        assert!(deep_equal(&value, &back));
        assert_eq!(
            to_json(&value),
            r#"{"f1":"v1","f3":[10,20,30],"f4":{"f41":"v2"},"f5":9.9}"#
        );
    }

    #[test]
    fn test_pretty() {
        assert_eq!(to_json_pretty(&json!({"a": [1]})), "{\n  \"a\": [\n    1\n  ]\n}");
    }

    #[test]
    fn test_parse_reader() {
        let value = parse_reader("{\"a\": 2.0}".as_bytes()).unwrap();
        assert_eq!(value, json!({"a": 2}));
    }
}
