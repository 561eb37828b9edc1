//! Path resolution.
//!
//! Segments resolve left to right. Each segment is looked up in the value the
//! previous segment addressed, which must be a container. The result is an
//! [`Address`]: the steps from the shared root to the container of the last
//! segment, plus that segment's key.

use jsondoc_path::{get, parse_path, Key, Step, Steps};

use crate::error::{DocumentError, DocumentResult};
use crate::value::{Kind, Value};

/// A resolved location: the container of the final segment and its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// Steps from the shared root to the container.
    pub container: Steps,
    pub key: Key,
}

impl Address {
    /// Steps from the shared root to the addressed value itself.
    pub fn target(&self) -> Steps {
        let mut steps = self.container.clone();
        steps.extend(self.key.steps());
        steps
    }
}

/// Resolve `path` against the view of `root` found at `base`.
pub fn resolve(root: &Value, base: &[Step], path: &str) -> DocumentResult<Address> {
    let keys = parse_path(path)?;
    let mut current = get(root, base).ok_or_else(|| {
        tracing::debug!(path, "document view no longer resolves in its parent");
        DocumentError::invalid_path(path, "document view is detached from its parent")
    })?;
    let mut container: Steps = base.to_vec();

    let last = keys.len().saturating_sub(1);
    for (i, key) in keys.into_iter().enumerate() {
        check_key(current, &key, path)?;
        if i == last {
            return Ok(Address { container, key });
        }
        let steps = key.steps();
        let next = get(current, &steps).ok_or_else(|| {
            DocumentError::invalid_path(path, format!("no member {:?}", key.to_string()))
        })?;
        let kind = Kind::of(next);
        if !kind.is_container() {
            return Err(DocumentError::invalid_path(
                path,
                format!("{key} is a {kind} and has no members"),
            ));
        }
        container.extend(steps);
        current = next;
    }
    Err(DocumentError::invalid_path(path, "empty path"))
}

/// Check that `key` can address something inside `container`.
///
/// A missing object member is fine here: `set` creates it.
fn check_key(container: &Value, key: &Key, path: &str) -> DocumentResult<()> {
    match key {
        Key::Root => Ok(()),
        Key::Field { name } => match container {
            Value::Object(_) => Ok(()),
            other => Err(DocumentError::invalid_path(
                path,
                format!("field {name:?} on a {}", Kind::of(other)),
            )),
        },
        Key::Indexed { name, index } => {
            let arr = if name.is_empty() {
                container
            } else {
                match container {
                    Value::Object(map) => map.get(name).ok_or_else(|| {
                        DocumentError::invalid_path(path, format!("no member {name:?}"))
                    })?,
                    other => {
                        return Err(DocumentError::invalid_path(
                            path,
                            format!("field {name:?} on a {}", Kind::of(other)),
                        ))
                    }
                }
            };
            match arr {
                Value::Array(items) if *index < items.len() => Ok(()),
                Value::Array(items) => Err(DocumentError::invalid_path(
                    path,
                    format!("index {index} out of range for length {}", items.len()),
                )),
                other => Err(DocumentError::invalid_path(
                    path,
                    format!("index {index} on a {}", Kind::of(other)),
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(k: &str) -> Step {
        Step::Key(k.to_string())
    }

    fn doc() -> Value {
        json!({
            "f1": "v1",
            "f3": [10, 20, 30],
            "f4": {"f41": "v2", "f42": ["v3", "v4", "v5"], "f43": [[1, 2], {"a": 1}]}
        })
    }

    #[test]
    fn test_resolve_root() {
        let addr = resolve(&doc(), &[], "").unwrap();
        assert_eq!(addr, Address { container: vec![], key: Key::Root });
        assert!(addr.target().is_empty());
    }

    #[test]
    fn test_resolve_nested() {
        let addr = resolve(&doc(), &[], "f4.f42[1]").unwrap();
        assert_eq!(addr.container, vec![key("f4")]);
        assert_eq!(addr.key, Key::indexed("f42", 1));
        assert_eq!(addr.target(), vec![key("f4"), key("f42"), Step::Index(1)]);
    }

    #[test]
    fn test_resolve_through_array_elements() {
        let addr = resolve(&doc(), &[], "f4.f43[1].a").unwrap();
        assert_eq!(addr.container, vec![key("f4"), key("f43"), Step::Index(1)]);
        assert_eq!(addr.key, Key::field("a"));

        let addr = resolve(&doc(), &[], "f4.f43[0].[1]").unwrap();
        assert_eq!(addr.container, vec![key("f4"), key("f43"), Step::Index(0)]);
        assert_eq!(addr.key, Key::indexed("", 1));
    }

    #[test]
    fn test_resolve_from_base() {
        let base = vec![key("f4"), key("f42")];
        let addr = resolve(&doc(), &base, "[2]").unwrap();
        assert_eq!(addr.container, base);
        assert_eq!(addr.key, Key::indexed("", 2));
    }

    #[test]
    fn test_missing_terminal_member_resolves() {
        let addr = resolve(&doc(), &[], "f4.new").unwrap();
        assert_eq!(addr.key, Key::field("new"));
    }

    #[test]
    fn test_invalid_paths() {
        for path in [
            "f1.x",         // scalar mid-path
            "missing.x",    // absent mid-path
            "f3[3]",        // out of range
            "f3.x",         // field on an array
            "f1[0]",        // index on a string
            "[0]",          // index-only key on an object
            "f4.nope[0]",   // named array missing
            "f4.f41[0]",    // named member not an array
            "f4.f42[0].x",  // string mid-path
        ] {
            assert!(
                matches!(resolve(&doc(), &[], path), Err(DocumentError::InvalidPath { .. })),
                "{path:?}"
            );
        }
    }

    #[test]
    fn test_invalid_key() {
        assert!(matches!(
            resolve(&doc(), &[], "f4..f41"),
            Err(DocumentError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_detached_base() {
        let result = resolve(&doc(), &[key("gone")], "");
        assert!(matches!(result, Err(DocumentError::InvalidPath { .. })));
    }
}
