//! Path-addressed JSON documents.
//!
//! A [`Document`] is a handle on a JSON value tree. Handles made with
//! [`Document::get_doc`] on a container share the parent's storage: writes
//! through either handle are visible through the other. A handle on a scalar
//! is an independent copy.
//!
//! A view follows the container it was taken from: when earlier siblings
//! are removed or filtered out, the view moves with its container. When the
//! container itself is removed or replaced, the view is detached and every
//! operation on it fails with `InvalidPath`. A detached view never rebinds
//! to whatever later occupies its old position.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::rc::Rc;
use std::str::FromStr;

use jsondoc_path::get;
use jsondoc_util::{canonical_number, deep_equal, normalize};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec;
use crate::error::{DocumentError, DocumentResult};
use crate::mutate::mutate;
use crate::navigate::resolve;
use crate::op::Op;
use crate::options::DocumentOptions;
use crate::store::{Anchor, Store};
use crate::value::{Kind, Map, Value};

#[derive(Debug)]
pub struct Document {
    store: Rc<Store>,
    /// Where this handle's root sits in the shared value.
    anchor: Rc<Anchor>,
    options: DocumentOptions,
}

impl Document {
    /// An empty document: `{}`.
    pub fn new() -> Self {
        Self::from_parts(Value::Object(Map::new()), DocumentOptions::default())
    }

    pub(crate) fn from_parts(value: Value, options: DocumentOptions) -> Self {
        let store = Store::new(value);
        let anchor = store.anchor(Vec::new());
        Self {
            store,
            anchor,
            options,
        }
    }

    pub fn from_value(value: Value) -> Self {
        Self::from_parts(normalize(value), DocumentOptions::default())
    }

    /// Parse JSON text into a new document.
    pub fn parse(text: &str) -> DocumentResult<Self> {
        Ok(Self::from_parts(codec::parse(text)?, DocumentOptions::default()))
    }

    pub fn from_reader<R: Read>(reader: R) -> DocumentResult<Self> {
        Ok(Self::from_parts(codec::parse_reader(reader)?, DocumentOptions::default()))
    }

    /// Load a document from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> DocumentResult<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn with_options(mut self, options: DocumentOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    // ── Dispatch ──────────────────────────────────────────────────────────

    /// Run one operation at `path`.
    ///
    /// Returns the value read by [`Op::Get`]; mutating operations return
    /// `None`.
    pub fn apply(&mut self, path: &str, op: Op<'_>) -> DocumentResult<Option<Value>> {
        self.run(path, op)
    }

    fn run(&self, path: &str, op: Op<'_>) -> DocumentResult<Option<Value>> {
        let name = op.name();
        tracing::trace!(op = name, path, segments = path.split('.').count(), "apply");
        let with_current = op.reads_current();
        let options = self.options;
        mutate(&self.store, &self.anchor, path, with_current, |target| {
            op.transform(target, path, &options)
        })
        .inspect_err(|e| tracing::debug!(op = name, path, error = %e, "operation failed"))
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    /// The value at `path`.
    pub fn get(&self, path: &str) -> DocumentResult<Value> {
        self.run(path, Op::Get)?
            .ok_or_else(|| DocumentError::invalid_path(path, "no value"))
    }

    /// The value at `path` as compact JSON text.
    pub fn get_json(&self, path: &str) -> DocumentResult<String> {
        Ok(codec::to_json(&self.get(path)?))
    }

    pub fn get_str(&self, path: &str) -> DocumentResult<String> {
        match self.get(path)? {
            Value::String(s) => Ok(s),
            other => Err(mismatch(path, Kind::String, &other)),
        }
    }

    /// The number at `path`, truncated toward zero.
    ///
    /// Numbers outside the `i64` range are a `TypeMismatch`.
    pub fn get_int(&self, path: &str) -> DocumentResult<i64> {
        let n = self.get_float(path)?;
        // 2^63 is exact as a double; i64::MAX is not.
        const LIMIT: f64 = 9_223_372_036_854_775_808.0;
        if !(-LIMIT..LIMIT).contains(&n) {
            return Err(DocumentError::TypeMismatch {
                path: path.to_string(),
                expected: Kind::Number,
                found: "number outside the i64 range",
            });
        }
        Ok(n as i64)
    }

    pub fn get_float(&self, path: &str) -> DocumentResult<f64> {
        let value = self.get(path)?;
        match &value {
            Value::Number(n) => n.as_f64().ok_or_else(|| mismatch(path, Kind::Number, &value)),
            other => Err(mismatch(path, Kind::Number, other)),
        }
    }

    pub fn get_bool(&self, path: &str) -> DocumentResult<bool> {
        match self.get(path)? {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch(path, Kind::Bool, &other)),
        }
    }

    /// A document rooted at the value at `path`.
    ///
    /// Arrays and objects are shared with this document; scalars are copied.
    pub fn get_doc(&self, path: &str) -> DocumentResult<Document> {
        let base = self.anchor.steps().ok_or_else(|| {
            tracing::debug!(path, "document view is detached from its parent");
            DocumentError::invalid_path(path, "document view is detached from its parent")
        })?;
        let doc = self.store.value().borrow();
        let addr = resolve(&doc, &base, path)?;
        let steps = addr.target();
        let value = get(&doc, &steps).ok_or_else(|| {
            DocumentError::invalid_path(path, format!("no member {:?}", addr.key.name()))
        })?;
        if Kind::of(value).is_container() {
            Ok(Document {
                store: Rc::clone(&self.store),
                anchor: self.store.anchor(steps),
                options: self.options,
            })
        } else {
            Ok(Document::from_parts(value.clone(), self.options))
        }
    }

    // ── Writes ────────────────────────────────────────────────────────────

    /// Store `value` at `path`, replacing whatever is there.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> DocumentResult<&mut Self> {
        self.apply(path, Op::Set(value.into()))?;
        Ok(self)
    }

    /// Store the value parsed from `json` at `path`.
    pub fn set_json(&mut self, path: &str, json: &str) -> DocumentResult<&mut Self> {
        let value = codec::parse(json)?;
        self.set(path, value)
    }

    pub fn set_str(&mut self, path: &str, value: &str) -> DocumentResult<&mut Self> {
        self.set(path, value)
    }

    pub fn set_int(&mut self, path: &str, value: i64) -> DocumentResult<&mut Self> {
        self.set(path, value)
    }

    pub fn set_float(&mut self, path: &str, value: f64) -> DocumentResult<&mut Self> {
        self.set(path, canonical_number(value))
    }

    pub fn set_bool(&mut self, path: &str, value: bool) -> DocumentResult<&mut Self> {
        self.set(path, value)
    }

    /// Push `value` onto the array at `path`.
    pub fn append(&mut self, path: &str, value: impl Into<Value>) -> DocumentResult<&mut Self> {
        self.apply(path, Op::Append(value.into()))?;
        Ok(self)
    }

    pub fn append_json(&mut self, path: &str, json: &str) -> DocumentResult<&mut Self> {
        let value = codec::parse(json)?;
        self.append(path, value)
    }

    pub fn append_str(&mut self, path: &str, value: &str) -> DocumentResult<&mut Self> {
        self.append(path, value)
    }

    pub fn append_int(&mut self, path: &str, value: i64) -> DocumentResult<&mut Self> {
        self.append(path, value)
    }

    pub fn append_float(&mut self, path: &str, value: f64) -> DocumentResult<&mut Self> {
        self.append(path, canonical_number(value))
    }

    pub fn append_bool(&mut self, path: &str, value: bool) -> DocumentResult<&mut Self> {
        self.append(path, value)
    }

    /// Shallow-merge the object `value` into the object at `path`.
    pub fn merge(&mut self, path: &str, value: impl Into<Value>) -> DocumentResult<&mut Self> {
        self.apply(path, Op::Merge(value.into()))?;
        Ok(self)
    }

    pub fn merge_json(&mut self, path: &str, json: &str) -> DocumentResult<&mut Self> {
        let value = codec::parse(json)?;
        self.merge(path, value)
    }

    /// Keep the elements of the array at `path` for which `predicate` holds.
    ///
    /// The predicate sees each element as a read-only document.
    pub fn filter<F>(&mut self, path: &str, mut predicate: F) -> DocumentResult<&mut Self>
    where
        F: FnMut(&Document) -> bool,
    {
        self.apply(path, Op::Filter(&mut predicate))?;
        Ok(self)
    }

    /// Delete the value at `path`. Deleting the root resets it to `{}`.
    pub fn delete(&mut self, path: &str) -> DocumentResult<&mut Self> {
        self.apply(path, Op::Delete)?;
        Ok(self)
    }

    // ── Output ────────────────────────────────────────────────────────────

    /// Compact JSON text of the whole document.
    pub fn to_json(&self) -> DocumentResult<String> {
        self.get_json("")
    }

    pub fn to_json_pretty(&self) -> DocumentResult<String> {
        Ok(codec::to_json_pretty(&self.get("")?))
    }

    /// Whether both handles address the same underlying storage.
    pub fn shares_storage_with(&self, other: &Document) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
    }

    /// Whether this handle lost its container to a removal or replacement.
    pub fn is_detached(&self) -> bool {
        self.anchor.is_detached()
    }

    /// Copy of this handle's root value; `None` for a detached view.
    fn snapshot(&self) -> Option<Value> {
        let base = self.anchor.steps()?;
        let doc = self.store.value().borrow();
        get(&doc, &base).cloned()
    }

    /// Take the root value out of the document.
    ///
    /// Copies when the storage is shared with other handles. A detached view
    /// yields `null`.
    pub fn into_value(self) -> Value {
        let at_root = self.anchor.steps().is_some_and(|steps| steps.is_empty());
        if !at_root {
            return self.snapshot().unwrap_or(Value::Null);
        }
        match Rc::try_unwrap(self.store) {
            Ok(store) => store.into_value(),
            Err(store) => {
                let value = store.value().borrow().clone();
                value
            }
        }
    }
}

fn mismatch(path: &str, expected: Kind, found: &Value) -> DocumentError {
    DocumentError::TypeMismatch {
        path: path.to_string(),
        expected,
        found: Kind::of(found).as_str(),
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloning copies the value; the clone shares nothing with its source.
impl Clone for Document {
    fn clone(&self) -> Self {
        let value = self.snapshot().unwrap_or_else(|| Value::Object(Map::new()));
        Self::from_parts(value, self.options)
    }
}

/// Handles compare by value. A handle always equals itself; a detached view
/// equals no other handle.
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        if Rc::ptr_eq(&self.anchor, &other.anchor) {
            return true;
        }
        match (self.snapshot(), other.snapshot()) {
            (Some(a), Some(b)) => deep_equal(&a, &b),
            _ => false,
        }
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl FromStr for Document {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.snapshot() {
            Some(value) => value.serialize(serializer),
            None => Err(serde::ser::Error::custom("document view is detached from its parent")),
        }
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Document::from_value)
    }
}
