//! Record value helpers: nested paths, equality, and ordering
//!
//! These are free functions over `serde_json::Value` so every query
//! operation shares one edge-case policy.

use serde_json::Value;
use std::borrow::Cow;
use std::cmp::Ordering;

/// Resolve a dot-separated path against a record, one step at a time.
///
/// A step into an object looks up the field; a step into an array parses the
/// step as an index. A missing intermediate or leaf resolves to `None`,
/// never an error.
///
/// # Examples
///
/// ```
/// use recall::core::value::nested_value;
/// use serde_json::json;
///
/// let record = json!({"a": {"b": {"c": 3}}});
/// assert_eq!(nested_value(&record, "a.b.c"), Some(&json!(3)));
/// assert_eq!(nested_value(&record, "a.x.c"), None);
/// ```
pub fn nested_value<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for step in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(step)?,
            Value::Array(items) => items.get(step.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Equality with numeric coercion.
///
/// Values are loosely equal when they are strictly equal, or when both have
/// a numeric form (numbers, numeric strings, booleans as 1/0) and those
/// forms are equal. Anything without a numeric form only matches strictly.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    match (as_numeric(a), as_numeric(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

fn as_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Total order over optionally-present record values, used for sorting.
///
/// Rank order: missing < null < booleans < numbers < strings < arrays <
/// objects. Within a rank, booleans, numbers, and strings use their native
/// order; arrays and objects compare equal so a stable sort keeps their
/// pre-sort relative order.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let by_rank = rank(a).cmp(&rank(b));
    if by_rank != Ordering::Equal {
        return by_rank;
    }
    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            }
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn rank(value: Option<&Value>) -> u8 {
    match value {
        None => 0,
        Some(Value::Null) => 1,
        Some(Value::Bool(_)) => 2,
        Some(Value::Number(_)) => 3,
        Some(Value::String(_)) => 4,
        Some(Value::Array(_)) => 5,
        Some(Value::Object(_)) => 6,
    }
}

/// The string form a field presents to like-matching.
///
/// Strings match as-is; numbers and booleans match via their display form.
/// Null, arrays, and objects have no string form and never match.
pub fn matchable_str(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}

/// Human-readable name of a value's kind, for error messages
pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
