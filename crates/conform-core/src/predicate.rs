//! # Primitive Predicates
//!
//! Runtime type tagging and the four equality/ordering relations the
//! interpreter needs at leaf rules:
//!
//! | Function | Used by | NaN vs NaN |
//! |----------|---------|------------|
//! | [`deep_equal`] | `$same` | unequal |
//! | [`strict_equal`] | `$neq` | unequal |
//! | [`same_value_zero`] | `$enum` | equal |
//! | [`loose_compare`] | `$lt` `$gt` `$leq` `$geq` `$range` | unordered |

use std::cmp::Ordering;

use crate::value::{Object, Value};

/// Test `value` against a runtime type name.
///
/// `"Integer"` holds for finite numbers with no fractional part. `"Float"`
/// holds for every other non-NaN number, so the infinities are floats.
/// `"NaN"` holds only for the not-a-number value. `"TypedArray"` holds for
/// typed numeric views and excludes untyped byte views. Every other name is
/// compared against [`Value::tag`].
pub fn check_type(value: &Value, name: &str) -> bool {
    match name {
        "Integer" => matches!(value, Value::Number(n) if is_integral(*n)),
        "Float" => matches!(value, Value::Number(n) if !n.is_nan() && !is_integral(*n)),
        "NaN" => matches!(value, Value::Number(n) if n.is_nan()),
        "TypedArray" => matches!(value, Value::TypedArray(_)),
        other => value.tag() == other,
    }
}

fn is_integral(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0
}

/// Host strict equality.
///
/// Primitives compare by value (NaN is unequal to itself, `+0` equals `-0`),
/// symbols and callables by identity. Compound values are never strictly
/// equal: a snapshot value has no reference identity to compare.
pub fn strict_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::BigInt(x), Value::BigInt(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Symbol(x), Value::Symbol(y)) => x == y,
        (Value::Function(x), Value::Function(y)) => x == y,
        (Value::Promise(x), Value::Promise(y)) => x == y,
        _ => false,
    }
}

/// Membership equality: strict equality except that NaN equals NaN.
pub fn same_value_zero(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) if x.is_nan() && y.is_nan() => true,
        _ => strict_equal(a, b),
    }
}

/// Structural equality.
///
/// Strict equality first, then by kind: typed arrays element-wise within
/// the same element kind, byte buffers and byte views byte-wise, arrays
/// element-wise, dates by instant, objects by the same key set with deep
/// equality per key, sets and maps
/// by size with every member or entry matched in both directions,
/// regexes by source and flags. Values of different kinds are unequal.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    if strict_equal(a, b) {
        return true;
    }
    match (a, b) {
        (Value::TypedArray(x), Value::TypedArray(y)) => x == y,
        (Value::ArrayBuffer(x), Value::ArrayBuffer(y)) | (Value::DataView(x), Value::DataView(y)) => {
            x == y
        }
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| deep_equal(l, r))
        }
        (Value::Date(x), Value::Date(y)) => x == y,
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len() && fields_within(x, y) && fields_within(y, x)
        }
        (Value::Set(x), Value::Set(y)) => {
            x.len() == y.len() && members_within(x, y) && members_within(y, x)
        }
        (Value::Map(x), Value::Map(y)) => {
            x.len() == y.len() && entries_within(x, y) && entries_within(y, x)
        }
        (Value::RegExp(x), Value::RegExp(y)) => x == y,
        _ => false,
    }
}

fn fields_within(x: &Object, y: &Object) -> bool {
    x.iter()
        .all(|(k, v)| y.get(k).is_some_and(|w| deep_equal(v, w)))
}

fn members_within(x: &[Value], y: &[Value]) -> bool {
    x.iter().all(|m| y.iter().any(|n| deep_equal(m, n)))
}

fn entries_within(x: &[(Value, Value)], y: &[(Value, Value)]) -> bool {
    x.iter()
        .all(|(k, v)| y.iter().any(|(k2, v2)| deep_equal(k, k2) && deep_equal(v, v2)))
}

/// Host relational comparison.
///
/// Both sides are first reduced to primitives (dates to epoch
/// milliseconds, other objects to their string form). Two strings compare
/// by UTF-16 code units and bigints compare exactly; everything else
/// compares numerically. `None` means the pair is unordered: a NaN or a
/// symbol is involved.
pub fn loose_compare(a: &Value, b: &Value) -> Option<Ordering> {
    let a = to_primitive(a);
    let b = to_primitive(b);
    match (&a, &b) {
        (Value::Symbol(_), _) | (_, Value::Symbol(_)) => None,
        (Value::String(x), Value::String(y)) => Some(x.encode_utf16().cmp(y.encode_utf16())),
        (Value::BigInt(x), Value::BigInt(y)) => Some(x.cmp(y)),
        _ => a.to_number().partial_cmp(&b.to_number()),
    }
}

fn to_primitive(value: &Value) -> Value {
    match value {
        Value::Date(d) => Value::Number(d.timestamp_millis() as f64),
        v if v.is_object_like() || matches!(v, Value::Function(_)) => Value::String(v.to_string()),
        v => v.clone(),
    }
}
