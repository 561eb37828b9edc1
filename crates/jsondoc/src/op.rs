//! The operation set.
//!
//! Every operation is a transform over a [`Target`] returning a
//! [`WriteBack`]; traversal and write-back are shared.

use std::fmt;

use jsondoc_path::Key;
use jsondoc_util::normalize;

use crate::document::Document;
use crate::error::{DocumentError, DocumentResult};
use crate::mutate::{Target, WriteBack};
use crate::options::{DocumentOptions, EmptyFilter, IndexedDelete};
use crate::value::{Kind, Map, Value};

/// Predicate over a read-only view of one array element.
pub type Predicate<'a> = &'a mut dyn FnMut(&Document) -> bool;

pub enum Op<'a> {
    /// Read the value at the path.
    Get,
    /// Store a value at the path, whatever is there.
    Set(Value),
    /// Push a value onto the array at the path.
    Append(Value),
    /// Shallow-merge an object into the object at the path.
    Merge(Value),
    /// Keep only the array elements the predicate accepts.
    Filter(Predicate<'a>),
    /// Remove the member or element at the path; at the root, reset to `{}`.
    Delete,
}

impl Op<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Op::Get => "get",
            Op::Set(_) => "set",
            Op::Append(_) => "append",
            Op::Merge(_) => "merge",
            Op::Filter(_) => "filter",
            Op::Delete => "delete",
        }
    }

    /// Whether the transform needs a copy of the current value.
    pub(crate) fn reads_current(&self) -> bool {
        matches!(self, Op::Get | Op::Filter(_))
    }

    pub(crate) fn transform(
        self,
        target: Target<'_>,
        path: &str,
        options: &DocumentOptions,
    ) -> DocumentResult<WriteBack> {
        let name = self.name();
        match self {
            Op::Get => match target.current {
                Some(value) => Ok(WriteBack::Unchanged(Some(value))),
                None => Err(DocumentError::invalid_path(
                    path,
                    format!("no member {:?}", target.key.name()),
                )),
            },

            Op::Set(value) => Ok(WriteBack::Replace(normalize(value))),

            Op::Append(value) => match target.kind {
                Some(Kind::Array) => Ok(WriteBack::Push(normalize(value))),
                other => Err(op_type(name, path, Kind::Array, other)),
            },

            Op::Merge(value) => {
                if target.kind != Some(Kind::Object) {
                    return Err(op_type(name, path, Kind::Object, target.kind));
                }
                match normalize(value) {
                    Value::Object(members) => Ok(WriteBack::Extend(members)),
                    other => Err(op_type(name, path, Kind::Object, Some(Kind::of(&other)))),
                }
            }

            Op::Filter(predicate) => {
                let items = match target.current {
                    Some(Value::Array(items)) => items,
                    _ => return Err(op_type(name, path, Kind::Array, target.kind)),
                };
                // Each element is judged on its own copy; the array itself is
                // edited in place by the mask.
                let mask: Vec<bool> = items
                    .into_iter()
                    .map(|item| predicate(&Document::from_parts(item, *options)))
                    .collect();
                if !mask.contains(&true) && options.empty_filter == EmptyFilter::Null {
                    return Ok(WriteBack::Replace(Value::Null));
                }
                Ok(WriteBack::Retain(mask))
            }

            Op::Delete => match target.key {
                Key::Root => Ok(WriteBack::Replace(Value::Object(Map::new()))),
                Key::Field { .. } => Ok(WriteBack::Remove),
                Key::Indexed { .. } => match options.indexed_delete {
                    IndexedDelete::Remove => Ok(WriteBack::Remove),
                    IndexedDelete::TrimLast => match target.kind {
                        Some(Kind::Array) => Ok(WriteBack::Pop),
                        _ => Ok(WriteBack::Unchanged(None)),
                    },
                },
            },
        }
    }
}

fn op_type(op: &'static str, path: &str, expected: Kind, found: Option<Kind>) -> DocumentError {
    DocumentError::OperationType {
        op,
        path: path.to_string(),
        expected,
        found: found.map_or("missing", |kind| kind.as_str()),
    }
}

impl fmt::Debug for Op<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Set(v) | Op::Append(v) | Op::Merge(v) => {
                f.debug_tuple(self.name()).field(v).finish()
            }
            Op::Filter(_) => f.write_str("filter(<predicate>)"),
            Op::Get | Op::Delete => f.write_str(self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn target(current: Option<Value>, key: &Key) -> Target<'_> {
        Target {
            container: Some(Kind::Object),
            kind: current.as_ref().map(Kind::of),
            current,
            key,
        }
    }

    fn run(op: Op<'_>, current: Option<Value>, key: &Key) -> DocumentResult<WriteBack> {
        op.transform(target(current, key), "p", &DocumentOptions::default())
    }

    #[test]
    fn test_get() {
        let key = Key::field("a");
        assert_eq!(
            run(Op::Get, Some(json!(1)), &key).unwrap(),
            WriteBack::Unchanged(Some(json!(1)))
        );
        assert!(matches!(
            run(Op::Get, None, &key),
            Err(DocumentError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_set_normalizes() {
        let key = Key::field("a");
        assert_eq!(
            run(Op::Set(json!(3.0)), None, &key).unwrap(),
            WriteBack::Replace(json!(3))
        );
    }

    #[test]
    fn test_append_pushes_in_place() {
        let key = Key::field("a");
        assert_eq!(
            run(Op::Append(json!(4.0)), Some(json!([1])), &key).unwrap(),
            WriteBack::Push(json!(4))
        );
        let err = run(Op::Append(json!(4)), Some(json!({})), &key).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::OperationType { op: "append", expected: Kind::Array, found: "object", .. }
        ));
        let err = run(Op::Append(json!(4)), None, &key).unwrap_err();
        assert!(matches!(err, DocumentError::OperationType { found: "missing", .. }));
    }

    #[test]
    fn test_merge_extends_in_place() {
        let key = Key::field("a");
        let out = run(
            Op::Merge(json!({"a": 1, "b": 2, "n": {"y": 1}})),
            Some(json!({"b": 9, "c": 3, "n": {"x": 1}})),
            &key,
        )
        .unwrap();
        let WriteBack::Extend(members) = out else {
            panic!("expected extend, got {out:?}");
        };
        assert_eq!(Value::Object(members), json!({"a": 1, "b": 2, "n": {"y": 1}}));
    }

    #[test]
    fn test_merge_type_errors() {
        let key = Key::field("a");
        assert!(matches!(
            run(Op::Merge(json!({})), Some(json!([])), &key),
            Err(DocumentError::OperationType { found: "array", .. })
        ));
        assert!(matches!(
            run(Op::Merge(json!([1])), Some(json!({})), &key),
            Err(DocumentError::OperationType { found: "array", .. })
        ));
    }

    #[test]
    fn test_filter_builds_mask() {
        let key = Key::field("a");
        let mut seen = 0;
        let mut pred = |d: &Document| {
            seen += 1;
            d.get_int("").map(|n| n % 2 == 0).unwrap_or(false)
        };
        let out = run(Op::Filter(&mut pred), Some(json!([1, 2, 3, 4])), &key).unwrap();
        assert_eq!(out, WriteBack::Retain(vec![false, true, false, true]));
        assert_eq!(seen, 4);
    }

    #[test]
    fn test_filter_empty_result_policy() {
        let key = Key::field("a");
        let mut never = |_: &Document| false;
        assert_eq!(
            run(Op::Filter(&mut never), Some(json!([1])), &key).unwrap(),
            WriteBack::Retain(vec![false])
        );

        let legacy = DocumentOptions::legacy();
        let out = Op::Filter(&mut never)
            .transform(target(Some(json!([1])), &key), "p", &legacy)
            .unwrap();
        assert_eq!(out, WriteBack::Replace(Value::Null));
    }

    #[test]
    fn test_delete_by_key_kind() {
        assert_eq!(
            run(Op::Delete, None, &Key::Root).unwrap(),
            WriteBack::Replace(json!({}))
        );
        assert_eq!(run(Op::Delete, None, &Key::field("a")).unwrap(), WriteBack::Remove);
        assert_eq!(
            run(Op::Delete, Some(json!(1)), &Key::indexed("a", 0)).unwrap(),
            WriteBack::Remove
        );
    }

    #[test]
    fn test_delete_indexed_trim_last() {
        let legacy = DocumentOptions::legacy();
        let key = Key::indexed("a", 0);
        let out = Op::Delete
            .transform(target(Some(json!([1, 2, 3])), &key), "p", &legacy)
            .unwrap();
        assert_eq!(out, WriteBack::Pop);

        let out = Op::Delete
            .transform(target(Some(json!("x")), &key), "p", &legacy)
            .unwrap();
        assert_eq!(out, WriteBack::Unchanged(None));
    }

    #[test]
    fn test_reads_current() {
        assert!(!Op::Set(json!(1)).reads_current());
        assert!(!Op::Append(json!(1)).reads_current());
        assert!(!Op::Merge(json!({})).reads_current());
        assert!(!Op::Delete.reads_current());
        assert!(Op::Get.reads_current());
        let mut keep = |_: &Document| true;
        assert!(Op::Filter(&mut keep).reads_current());
    }
}
