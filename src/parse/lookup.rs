//! Tolerant field lookup over loosely typed JSON objects.
//!
//! Registries name the same field differently between endpoints and
//! versions, so every logical field is read through an ordered list of
//! candidate keys.

use serde_json::{Map, Value};

pub(crate) type Object = Map<String, Value>;

/// First candidate key holding a non-null value.
pub(crate) fn first_present<'a>(obj: &'a Object, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| !value.is_null())
}

/// Trimmed text of the first candidate key with a non-blank value.
///
/// Numbers and booleans are rendered as text; arrays and objects are skipped.
pub(crate) fn text(obj: &Object, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .filter_map(value_text)
        .find(|s| !s.is_empty())
}

/// Like [`text`] but yields an empty string when nothing matches.
pub(crate) fn text_or_empty(obj: &Object, keys: &[&str]) -> String {
    text(obj, keys).unwrap_or_default()
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse a float from a JSON number or a string using `.` or `,` as decimal mark.
pub(crate) fn parse_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim().replace(',', ".");
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok().filter(|f| f.is_finite())
        }
        _ => None,
    }
}

/// Float value of the first present candidate key.
pub(crate) fn float(obj: &Object, keys: &[&str]) -> Option<f64> {
    first_present(obj, keys).and_then(parse_float)
}

/// Parse an integer from a JSON number or a numeric string.
pub(crate) fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| is_whole_i64(*f)).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Whole number that fits an `i64` without saturating.
fn is_whole_i64(f: f64) -> bool {
    f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64
}

/// Non-negative integer of the first present candidate key, 0 when absent
/// or unparseable.
pub(crate) fn count(obj: &Object, keys: &[&str]) -> u32 {
    first_present(obj, keys)
        .and_then(parse_int)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}

/// Object of the first candidate key whose value is an object.
pub(crate) fn object<'a>(obj: &'a Object, keys: &[&str]) -> Option<&'a Object> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find_map(Value::as_object)
}

/// Record list of a list-style payload.
///
/// A bare array is used as-is; for an object the first candidate key holding
/// a non-empty array wins. Any other shape yields no records.
pub(crate) fn records<'a>(data: &'a Value, keys: &[&str]) -> &'a [Value] {
    match data {
        Value::Array(items) => items,
        Value::Object(obj) => keys
            .iter()
            .filter_map(|key| obj.get(*key))
            .filter_map(Value::as_array)
            .find(|items| !items.is_empty())
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}
