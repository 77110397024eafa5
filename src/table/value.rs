//! Cell helpers over `serde_json::Value`.

use serde_json::{Number, Value};
use std::cmp::Ordering;
use std::fmt;

/// Float cell; NaN and infinities become null.
pub fn float(x: f64) -> Value {
    Number::from_f64(x).map(Value::Number).unwrap_or(Value::Null)
}

pub fn float_opt(x: Option<f64>) -> Value {
    x.map(float).unwrap_or(Value::Null)
}

pub fn int_opt(x: Option<i64>) -> Value {
    x.map(Value::from).unwrap_or(Value::Null)
}

pub fn str_opt(x: Option<&str>) -> Value {
    x.map(|s| Value::String(s.to_string())).unwrap_or(Value::Null)
}

/// Numeric view of a cell. Numeric strings are accepted.
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|x| x.is_finite()),
        _ => None,
    }
}

/// Integer view of a cell; integral floats and digit strings qualify.
pub fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|x| x.fract() == 0.0 && x.abs() < i64::MAX as f64)
                .map(|x| x as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

pub fn as_str(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        _ => None,
    }
}

/// Hashable form of a cell used for join and grouping keys.
///
/// Integral numbers compare equal regardless of whether they were stored as
/// `7` or `7.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(u64),
    Str(String),
}

impl KeyValue {
    pub fn is_null(&self) -> bool {
        matches!(self, KeyValue::Null)
    }
}

impl From<&Value> for KeyValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => KeyValue::Null,
            Value::Bool(b) => KeyValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => KeyValue::Int(i),
                None => match n.as_f64() {
                    Some(x) if x.fract() == 0.0 && x.abs() < i64::MAX as f64 => {
                        KeyValue::Int(x as i64)
                    }
                    Some(x) => KeyValue::Float(x.to_bits()),
                    None => KeyValue::Null,
                },
            },
            Value::String(s) => KeyValue::Str(s.clone()),
            other => KeyValue::Str(other.to_string()),
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Null => write!(f, "null"),
            KeyValue::Bool(b) => write!(f, "{}", b),
            KeyValue::Int(i) => write!(f, "{}", i),
            KeyValue::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            KeyValue::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Render a composite key as `(a, b, c)` for error messages.
pub fn display_key(key: &[KeyValue]) -> String {
    let parts: Vec<String> = key.iter().map(|k| k.to_string()).collect();
    format!("({})", parts.join(", "))
}

/// Total order for sorting: numbers before strings, nulls last.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Bool(_) => 0,
            Value::Number(_) => 1,
            Value::String(_) => 2,
            Value::Array(_) | Value::Object(_) => 3,
            Value::Null => 4,
        }
    }

    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_float_rejects_nan() {
        assert_eq!(float(f64::NAN), Value::Null);
        assert_eq!(float(1.5), json!(1.5));
    }

    #[test]
    fn test_numeric_views() {
        assert_eq!(as_i64(&json!(7)), Some(7));
        assert_eq!(as_i64(&json!(7.0)), Some(7));
        assert_eq!(as_i64(&json!(7.5)), None);
        assert_eq!(as_i64(&json!("12")), Some(12));
        assert_eq!(as_f64(&json!("2.5")), Some(2.5));
        assert_eq!(as_f64(&json!(null)), None);
        assert_eq!(as_f64(&json!(true)), None);
    }

    #[test]
    fn test_key_value_unifies_integral_numbers() {
        assert_eq!(KeyValue::from(&json!(2023)), KeyValue::from(&json!(2023.0)));
        assert_ne!(KeyValue::from(&json!(1.5)), KeyValue::from(&json!(1)));
        assert!(KeyValue::from(&Value::Null).is_null());
    }

    #[test]
    fn test_compare_values_nulls_last() {
        let mut values = vec![json!(null), json!(3), json!("a"), json!(1)];
        values.sort_by(compare_values);
        assert_eq!(values, vec![json!(1), json!(3), json!("a"), json!(null)]);
    }

    #[test]
    fn test_display_key() {
        let key = vec![KeyValue::Int(2023), KeyValue::Str("KC".to_string())];
        assert_eq!(display_key(&key), "(2023, KC)");
    }
}
