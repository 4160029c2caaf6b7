//! Loose scalar coercion for JSON request values.
//!
//! Browser clients routinely send numbers and booleans as strings (`"75"`, `"true"`), so
//! every rule looks at a value through these helpers instead of matching on its JSON type.
//! `None` stands for a field that is absent from the request.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").expect("valid numeric regex"));

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?[0-9]+$").expect("valid integer regex"));

/// Text form of a value; absent and `null` values are empty.
pub fn to_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => match n.as_f64() {
            // 75.0 reads as "75"
            Some(f) if n.is_f64() => format!("{f}"),
            _ => n.to_string(),
        },
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| to_text(Some(item)))
            .collect::<Vec<_>>()
            .join(","),
        Some(Value::Object(_)) => "[object Object]".to_string(),
    }
}

/// Numeric reading of a value, `None` when it has no meaningful number.
///
/// Blank strings and `null` read as zero, booleans as 1 and 0.
pub fn to_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Some(0.0);
            }
            trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// `true`, `false`, `"true"`, `"false"`, `"1"` and `"0"` are booleans.
pub fn to_bool(value: Option<&Value>) -> Option<bool> {
    match to_text(value).as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

pub fn is_numeric(value: Option<&Value>) -> bool {
    NUMERIC.is_match(&to_text(value))
}

pub fn is_int(value: Option<&Value>) -> bool {
    INTEGER.is_match(&to_text(value))
}

pub fn is_boolean(value: Option<&Value>) -> bool {
    to_bool(value).is_some()
}

/// Whitespace-only text counts as empty.
pub fn is_not_empty(value: Option<&Value>) -> bool {
    !to_text(value).trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_text() {
        assert_eq!(to_text(None), "");
        assert_eq!(to_text(Some(&json!(null))), "");
        assert_eq!(to_text(Some(&json!(75))), "75");
        assert_eq!(to_text(Some(&json!(75.0))), "75");
        assert_eq!(to_text(Some(&json!(19.99))), "19.99");
        assert_eq!(to_text(Some(&json!(1e19))), "10000000000000000000");
        assert_eq!(to_text(Some(&json!(-2e19))), "-20000000000000000000");
        assert_eq!(to_text(Some(&json!(true))), "true");
        assert_eq!(to_text(Some(&json!([1, "a"]))), "1,a");
        assert_eq!(to_text(Some(&json!({"a": 1}))), "[object Object]");
    }

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric(Some(&json!(75))));
        assert!(is_numeric(Some(&json!("75"))));
        assert!(is_numeric(Some(&json!("-0.5"))));
        assert!(is_numeric(Some(&json!(".5"))));
        assert!(!is_numeric(Some(&json!("Hola"))));
        assert!(!is_numeric(Some(&json!(""))));
        assert!(!is_numeric(Some(&json!(true))));
        assert!(!is_numeric(None));
    }

    #[test]
    fn test_to_number() {
        assert_eq!(to_number(Some(&json!("75"))), Some(75.0));
        assert_eq!(to_number(Some(&json!(" 12.5 "))), Some(12.5));
        assert_eq!(to_number(Some(&json!(""))), Some(0.0));
        assert_eq!(to_number(Some(&json!(null))), Some(0.0));
        assert_eq!(to_number(Some(&json!(true))), Some(1.0));
        assert_eq!(to_number(Some(&json!("Hola"))), None);
        assert_eq!(to_number(Some(&json!("inf"))), None);
        assert_eq!(to_number(None), None);
    }

    #[test]
    fn test_is_int() {
        assert!(is_int(Some(&json!("1"))));
        assert!(is_int(Some(&json!("+42"))));
        assert!(is_int(Some(&json!("007"))));
        assert!(!is_int(Some(&json!("not-valid-url"))));
        assert!(!is_int(Some(&json!("1.5"))));
        assert!(!is_int(Some(&json!(""))));
    }

    #[test]
    fn test_booleans() {
        assert_eq!(to_bool(Some(&json!(true))), Some(true));
        assert_eq!(to_bool(Some(&json!("false"))), Some(false));
        assert_eq!(to_bool(Some(&json!("1"))), Some(true));
        assert_eq!(to_bool(Some(&json!(0))), Some(false));
        assert_eq!(to_bool(Some(&json!("yes"))), None);
        assert_eq!(to_bool(Some(&json!(""))), None);
        assert!(!is_boolean(None));
    }

    #[test]
    fn test_not_empty() {
        assert!(is_not_empty(Some(&json!("Mouse"))));
        assert!(is_not_empty(Some(&json!(0))));
        assert!(!is_not_empty(Some(&json!("   "))));
        assert!(!is_not_empty(Some(&json!(null))));
        assert!(!is_not_empty(None));
    }
}
