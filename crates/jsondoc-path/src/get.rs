use serde_json::Value;

use crate::types::Step;

/// Get a value from a JSON document by steps.
///
/// Returns `None` if any step does not resolve: a missing member, an
/// out-of-range index, or a step of the wrong kind for its container.
pub fn get<'a>(val: &'a Value, steps: &[Step]) -> Option<&'a Value> {
    let mut current = val;
    for step in steps {
        current = match (current, step) {
            (Value::Object(map), Step::Key(key)) => map.get(key)?,
            (Value::Array(arr), Step::Index(idx)) => arr.get(*idx)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Get a mutable reference to a value in a JSON document by steps.
pub fn get_mut<'a>(val: &'a mut Value, steps: &[Step]) -> Option<&'a mut Value> {
    let mut current = val;
    for step in steps {
        current = match (current, step) {
            (Value::Object(map), Step::Key(key)) => map.get_mut(key)?,
            (Value::Array(arr), Step::Index(idx)) => arr.get_mut(*idx)?,
            _ => return None,
        };
    }
    Some(current)
}
