//! Required-key and key-type validation over a document's object level.
//!
//! Presence checks aggregate every missing key into one error so a user can
//! fix a broken file in a single pass. Type checks fail fast on the first
//! mismatch, in rule order, with one carve-out: `null` is accepted wherever
//! a `Double` is expected, because `null` is the NaN sentinel for unknown
//! numeric values.

use crate::error::DocumentError;
use crate::value::JsonType;
use serde_json::{Map, Value};

/// One schema rule for a top-level (or nested-object) key.
#[derive(Debug, Clone)]
pub struct KeyRule {
    pub key: String,
    pub expected: JsonType,
    pub required: bool,
}

impl KeyRule {
    pub fn required(key: impl Into<String>, expected: JsonType) -> Self {
        Self {
            key: key.into(),
            expected,
            required: true,
        }
    }

    pub fn optional(key: impl Into<String>, expected: JsonType) -> Self {
        Self {
            key: key.into(),
            expected,
            required: false,
        }
    }
}

/// Check that every key in `keys` is present, reporting all missing keys
/// at once in their input order.
pub fn validate_required_keys(
    object: &Map<String, Value>,
    keys: &[&str],
) -> Result<(), DocumentError> {
    let missing: Vec<String> = keys
        .iter()
        .filter(|key| !object.contains_key(**key))
        .map(|key| (*key).to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DocumentError::MissingRequiredKeys { keys: missing })
    }
}

/// Check the type of every present key against its rule, stopping at the
/// first mismatch. Absent keys are skipped regardless of `required`.
pub fn validate_key_types(
    object: &Map<String, Value>,
    rules: &[KeyRule],
) -> Result<(), DocumentError> {
    for rule in rules {
        let Some(value) = object.get(&rule.key) else {
            continue;
        };
        let found = JsonType::of(value);
        if found == JsonType::Null && rule.expected == JsonType::Double {
            // Null signals a NaN on a double value
            continue;
        }
        if found != rule.expected {
            return Err(DocumentError::IncorrectValueType {
                key: rule.key.clone(),
                found,
                expected: rule.expected,
            });
        }
    }

    Ok(())
}

/// Presence pass over the required rules, then a type pass over all rules.
pub fn validate_keys(object: &Map<String, Value>, rules: &[KeyRule]) -> Result<(), DocumentError> {
    let required: Vec<&str> = rules
        .iter()
        .filter(|rule| rule.required)
        .map(|rule| rule.key.as_str())
        .collect();
    validate_required_keys(object, &required)?;
    validate_key_types(object, rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn reports_every_missing_key_in_declaration_order() {
        let obj = object(json!({ "present": 1 }));
        let err = validate_required_keys(&obj, &["a", "present", "b", "c"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The following required keys are missing: a, b, c"
        );
    }

    #[test]
    fn all_keys_present_is_ok() {
        let obj = object(json!({ "a": 1, "b": 2 }));
        assert!(validate_required_keys(&obj, &["a", "b"]).is_ok());
    }

    #[test]
    fn null_is_accepted_where_double_is_expected() {
        let obj = object(json!({ "altitude": null }));
        let rules = [KeyRule::required("altitude", JsonType::Double)];
        assert!(validate_key_types(&obj, &rules).is_ok());
    }

    #[test]
    fn null_is_rejected_for_non_double_types() {
        for expected in [JsonType::String, JsonType::Array, JsonType::Object] {
            let obj = object(json!({ "k": null }));
            let rules = [KeyRule::required("k", expected)];
            let err = validate_key_types(&obj, &rules).unwrap_err();
            assert!(matches!(
                err,
                DocumentError::IncorrectValueType { found: JsonType::Null, .. }
            ));
        }
    }

    #[test]
    fn first_mismatch_wins() {
        let obj = object(json!({ "a": true, "b": "also wrong" }));
        let rules = [
            KeyRule::required("a", JsonType::String),
            KeyRule::required("b", JsonType::Double),
        ];
        let err = validate_key_types(&obj, &rules).unwrap_err();
        assert!(matches!(err, DocumentError::IncorrectValueType { ref key, .. } if key == "a"));
    }

    #[test]
    fn optional_absent_key_is_skipped() {
        let obj = object(json!({ "present": "yes" }));
        let rules = [
            KeyRule::optional("absent", JsonType::Double),
            KeyRule::required("present", JsonType::String),
        ];
        assert!(validate_keys(&obj, &rules).is_ok());
    }

    #[test]
    fn composed_check_runs_presence_before_types() {
        let obj = object(json!({ "b": true }));
        let rules = [
            KeyRule::required("a", JsonType::String),
            KeyRule::required("b", JsonType::String),
        ];
        // "a" missing is reported before "b" has the wrong type.
        let err = validate_keys(&obj, &rules).unwrap_err();
        assert!(matches!(err, DocumentError::MissingRequiredKeys { .. }));
    }
}
