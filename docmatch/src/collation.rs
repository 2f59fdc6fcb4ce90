//! Equality, ordering and containment over JSON values.
//!
//! Every comparison works on a closed set of [`ValueKind`]s. A missing field (an unresolved
//! path) is represented by `None` and is its own kind, distinct from `null`.

use serde_json::{Number, Value};
use std::cmp::Ordering;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Missing,
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn of_field(value: Option<&Value>) -> Self { value.map(ValueKind::of).unwrap_or(ValueKind::Missing) }

    /// Null and missing never take part in a type mismatch.
    pub fn is_nullish(&self) -> bool { matches!(self, ValueKind::Missing | ValueKind::Null) }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ValueKind::Missing => "missing",
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        })
    }
}

/// How string/number pairs are treated by [`equals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// `"137"` equals `137`: the number is compared by its string form
    NumberToString,
    /// Values of different kinds are never equal
    None,
}

/// Structural equality.
///
/// Arrays are equal when they have the same length and pairwise equal elements, objects when
/// they have the same key set and pairwise equal values, both recursively under the same
/// coercion rule. A missing value equals nothing, not even another missing value.
pub fn equals(left: Option<&Value>, right: Option<&Value>, coercion: Coercion) -> bool {
    let (Some(left), Some(right)) = (left, right) else { return false };
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b) == Some(Ordering::Equal),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::String(s), Value::Number(n)) | (Value::Number(n), Value::String(s)) => {
            coercion == Coercion::NumberToString && number_to_string(n) == *s
        }
        (Value::Array(a), Value::Array(b)) => a.len() == b.len() && a.iter().zip(b).all(|(x, y)| equals(Some(x), Some(y), coercion)),
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len() && a.iter().all(|(key, x)| b.get(key).is_some_and(|y| equals(Some(x), Some(y), coercion)))
        }
        _ => false,
    }
}

/// True when `needle` is structurally equal to some element of `haystack`.
pub fn contains(haystack: &[Value], needle: Option<&Value>, coercion: Coercion) -> bool {
    haystack.iter().any(|item| equals(needle, Some(item), coercion))
}

/// Native ordering of two same-kind scalars. Numbers, strings and booleans are ordered; every
/// other pairing (including any cross-kind pair) is unordered.
pub fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Compare integers exactly when both sides are integers, falling back to floating point.
pub fn compare_numbers(a: &Number, b: &Number) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        return Some(a.cmp(&b));
    }
    if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
        return Some(a.cmp(&b));
    }
    a.as_f64()?.partial_cmp(&b.as_f64()?)
}

/// Canonical string form of a number: integral floats print without a fractional part,
/// so `137.0` and `137` both become `"137"`.
pub fn number_to_string(n: &Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 {
                return format!("{}", f as i128);
            }
        }
    }
    n.to_string()
}

/// String form used when a value is matched against a pattern. Missing has no string form.
pub fn string_form(value: Option<&Value>) -> Option<String> {
    Some(match value? {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_to_string(n),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    })
}
