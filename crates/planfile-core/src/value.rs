//! JSON node type names and the NaN sentinel convention.
//!
//! Persisted files use JSON `null` wherever a numeric field is unknown
//! (altitude of a point with no terrain data, for example). Decoders map
//! `null` to `f64::NAN` rather than treating it as malformed input.

use serde_json::Value;
use std::fmt;

/// The six JSON node types, named the way they appear in error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    Null,
    Bool,
    Double,
    String,
    Array,
    Object,
}

impl JsonType {
    /// Dynamic type of a `serde_json::Value`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonType::Null,
            Value::Bool(_) => JsonType::Bool,
            Value::Number(_) => JsonType::Double,
            Value::String(_) => JsonType::String,
            Value::Array(_) => JsonType::Array,
            Value::Object(_) => JsonType::Object,
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonType::Null => "NULL",
            JsonType::Bool => "Bool",
            JsonType::Double => "Double",
            JsonType::String => "String",
            JsonType::Array => "Array",
            JsonType::Object => "Object",
        };
        f.write_str(name)
    }
}

/// Numeric value of a node, honoring the NaN sentinel: `null` decodes to
/// NaN, numbers decode to themselves, anything else decodes to 0.0.
pub fn possible_nan(value: &Value) -> f64 {
    match value {
        Value::Null => f64::NAN,
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Number node for a possibly-NaN value; NaN encodes back to `null`.
pub fn number_or_null(value: f64) -> Value {
    match serde_json::Number::from_f64(value) {
        Some(n) => Value::Number(n),
        None => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_names_match_error_text() {
        assert_eq!(JsonType::of(&json!(null)).to_string(), "NULL");
        assert_eq!(JsonType::of(&json!(true)).to_string(), "Bool");
        assert_eq!(JsonType::of(&json!(1.5)).to_string(), "Double");
        assert_eq!(JsonType::of(&json!("x")).to_string(), "String");
        assert_eq!(JsonType::of(&json!([])).to_string(), "Array");
        assert_eq!(JsonType::of(&json!({})).to_string(), "Object");
    }

    #[test]
    fn null_decodes_to_nan() {
        assert!(possible_nan(&json!(null)).is_nan());
        assert_eq!(possible_nan(&json!(47.376)), 47.376);
        assert_eq!(possible_nan(&json!("not a number")), 0.0);
    }

    #[test]
    fn nan_encodes_to_null() {
        assert_eq!(number_or_null(f64::NAN), Value::Null);
        assert_eq!(number_or_null(8.542), json!(8.542));
    }
}
