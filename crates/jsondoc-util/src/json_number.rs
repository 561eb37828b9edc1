//! Number canonicalization.
//!
//! `serde_json` keeps integers and floats apart; jsondoc has a single double
//! type. Every number is stored in one canonical form: integral doubles within
//! the exactly representable range become integers, everything else is a
//! float. Non-finite doubles have no JSON form and become `null`.

use serde_json::{Number, Value};

/// Largest integer a double represents exactly (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Canonical JSON value for a double.
///
/// ```
/// use jsondoc_util::canonical_number;
/// use serde_json::json;
///
/// assert_eq!(canonical_number(20.0), json!(20));
/// assert_eq!(canonical_number(9.9), json!(9.9));
/// assert_eq!(canonical_number(f64::NAN), json!(null));
/// ```
pub fn canonical_number(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        // `-0.0 as i64` is 0.
        return Value::from(n as i64);
    }
    Number::from_f64(n).map_or(Value::Null, Value::Number)
}

fn canonical(n: &Number) -> Option<Value> {
    if n.is_f64() {
        return n.as_f64().map(canonical_number);
    }
    // Integers beyond 2^53 are only representable approximately.
    let f = n.as_f64()?;
    if f.abs() > MAX_SAFE_INTEGER {
        return Some(canonical_number(f));
    }
    None
}

/// Canonicalize every number in `value`.
pub fn normalize(mut value: Value) -> Value {
    normalize_in_place(&mut value);
    value
}

/// Canonicalize every number in `value`, in place.
pub fn normalize_in_place(value: &mut Value) {
    match value {
        Value::Number(n) => {
            if let Some(v) = canonical(n) {
                *value = v;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(normalize_in_place),
        Value::Object(map) => map.values_mut().for_each(normalize_in_place),
        _ => {}
    }
}
