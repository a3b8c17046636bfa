//! Coercion of loosely-typed numeric values.
//!
//! Recipe data arrives with numbers written in several shapes: JSON numbers,
//! numeric strings, `"NaN"`, empty strings or nothing at all. Both the seeder and
//! the filter parser funnel every value through [`coerce_number`] / [`parse_number`]
//! so the two call sites agree on what counts as a number.

use serde_json::Value;
use std::fmt;

/// A number recovered from loosely-typed input.
///
/// Integers are kept apart from fractional values so callers that store whole
/// minutes can tell `12` from `12.5`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    /// Truncates toward zero. Returns `None` when the value does not fit in an
    /// `i32` (or is infinite).
    pub fn to_i32(self) -> Option<i32> {
        match self {
            Number::Int(n) => i32::try_from(n).ok(),
            Number::Float(f) => {
                let truncated = f.trunc();
                if truncated >= i32::MIN as f64 && truncated <= i32::MAX as f64 {
                    Some(truncated as i32)
                } else {
                    None
                }
            }
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(x) => write!(f, "{}", x),
        }
    }
}

/// Coerce a JSON value into a number.
///
/// - `null` is absent
/// - numbers pass through (there is no NaN in `serde_json`, but a float that
///   somehow is NaN is still treated as absent)
/// - strings go through [`parse_number`]
/// - booleans, arrays and objects are absent
pub fn coerce_number(value: &Value) -> Option<Number> {
    match value {
        Value::Null => None,
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Number::Int(i))
            } else {
                n.as_f64().filter(|f| !f.is_nan()).map(Number::Float)
            }
        }
        Value::String(s) => parse_number(s),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Parse a textual number.
///
/// Surrounding whitespace is ignored. `"nan"` (any case) and the empty string are
/// absent. An integer parse is tried before a fractional one, so `"12"` becomes
/// `Int(12)` and `"3.5"` becomes `Float(3.5)`.
pub fn parse_number(text: &str) -> Option<Number> {
    let s = text.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") {
        return None;
    }

    if let Ok(n) = s.parse::<i64>() {
        return Some(Number::Int(n));
    }

    // f64's parser also accepts "NaN" spelled with a sign, e.g. "-nan"
    s.parse::<f64>()
        .ok()
        .filter(|f| !f.is_nan())
        .map(Number::Float)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_is_absent() {
        assert_eq!(coerce_number(&Value::Null), None);
    }

    #[test]
    fn test_nan_strings_are_absent() {
        assert_eq!(parse_number("nan"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("  NAN "), None);
        assert_eq!(parse_number("-nan"), None);
    }

    #[test]
    fn test_empty_and_blank_are_absent() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
    }

    #[test]
    fn test_integer_wins_over_float() {
        assert_eq!(parse_number("12"), Some(Number::Int(12)));
        assert_eq!(parse_number(" -7 "), Some(Number::Int(-7)));
        assert_eq!(parse_number("+3"), Some(Number::Int(3)));
    }

    #[test]
    fn test_fractional_text() {
        assert_eq!(parse_number("3.5"), Some(Number::Float(3.5)));
        assert_eq!(parse_number("12.0"), Some(Number::Float(12.0)));
    }

    #[test]
    fn test_garbage_text_is_absent() {
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("12 mins"), None);
    }

    #[test]
    fn test_json_numbers_pass_through() {
        assert_eq!(coerce_number(&json!(42)), Some(Number::Int(42)));
        assert_eq!(coerce_number(&json!(4.5)), Some(Number::Float(4.5)));
        assert_eq!(coerce_number(&json!("12")), Some(Number::Int(12)));
    }

    #[test]
    fn test_non_numeric_json_is_absent() {
        assert_eq!(coerce_number(&json!(true)), None);
        assert_eq!(coerce_number(&json!([1])), None);
        assert_eq!(coerce_number(&json!({"a": 1})), None);
    }

    #[test]
    fn test_to_i32_truncates() {
        assert_eq!(Number::Float(12.9).to_i32(), Some(12));
        assert_eq!(Number::Float(-1.5).to_i32(), Some(-1));
        assert_eq!(Number::Int(i64::MAX).to_i32(), None);
        assert_eq!(Number::Float(f64::INFINITY).to_i32(), None);
    }
}
