//! The transform-and-write-back primitive behind every operation.
//!
//! An operation runs in two phases. The read phase resolves the path and
//! reports what is there; no borrow of the document is held while the
//! transform runs, so a transform may freely read other views of the same
//! storage. The write phase applies the transform's result in place at the
//! resolved address and relocates the views the write affected.

use jsondoc_path::{format_steps, get, get_mut, Key, Step};

use crate::error::{DocumentError, DocumentResult};
use crate::navigate::{resolve, Address};
use crate::store::{Anchor, Relocation, Store};
use crate::value::{Kind, Map, Value};

/// What a transform sees at the resolved address.
#[derive(Debug)]
pub struct Target<'a> {
    /// Kind of the container holding the value. `None` for the root.
    pub container: Option<Kind>,
    /// Kind of the value at the key. `None` when there is no value.
    pub kind: Option<Kind>,
    /// Copy of the value at the key, if there is one and the operation
    /// asked for it.
    pub current: Option<Value>,
    pub key: &'a Key,
}

impl Target<'_> {
    /// Key name; empty for the root and for index-only keys.
    pub fn name(&self) -> &str {
        self.key.name()
    }
}

/// The result of a transform.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteBack {
    /// Leave the document as it is and hand the value back to the caller.
    Unchanged(Option<Value>),
    /// Store the value at the address, creating object members as needed.
    Replace(Value),
    /// Remove the addressed member or element. At the root, reset to `{}`.
    Remove,
    /// Push onto the array at the address.
    Push(Value),
    /// Insert every member into the object at the address.
    Extend(Map<String, Value>),
    /// Keep the elements of the array at the address marked `true`.
    Retain(Vec<bool>),
    /// Drop the last element of the array at the address, if any.
    Pop,
}

impl WriteBack {
    fn kind(&self) -> &'static str {
        match self {
            WriteBack::Unchanged(_) => "unchanged",
            WriteBack::Replace(_) => "replace",
            WriteBack::Remove => "remove",
            WriteBack::Push(_) => "push",
            WriteBack::Extend(_) => "extend",
            WriteBack::Retain(_) => "retain",
            WriteBack::Pop => "pop",
        }
    }
}

/// Resolve `path` in the handle anchored at `anchor`, run `transform`, and
/// write back.
///
/// Returns the value carried by [`WriteBack::Unchanged`], if any. When the
/// transform fails nothing is written.
pub fn mutate<F>(
    store: &Store,
    anchor: &Anchor,
    path: &str,
    with_current: bool,
    transform: F,
) -> DocumentResult<Option<Value>>
where
    F: FnOnce(Target<'_>) -> DocumentResult<WriteBack>,
{
    let base = anchor.steps().ok_or_else(|| {
        tracing::debug!(path, "document view is detached from its parent");
        DocumentError::invalid_path(path, "document view is detached from its parent")
    })?;

    let (addr, container, kind, current) = {
        let doc = store.value().borrow();
        let addr = resolve(&doc, &base, path)?;
        let (container, value) = read(&doc, &addr);
        let current = if with_current { value.cloned() } else { None };
        (addr, container, value.map(Kind::of), current)
    };

    let write = transform(Target {
        container,
        kind,
        current,
        key: &addr.key,
    })?;

    if let WriteBack::Unchanged(value) = write {
        return Ok(value);
    }
    let target = addr.target();
    tracing::trace!(
        path,
        container = %format_steps(&addr.container),
        key = %addr.key,
        write = write.kind(),
        "write back"
    );
    let relocation = {
        let mut doc = store.value().borrow_mut();
        write_back(&mut doc, &addr, &target, write, path)?
    };
    if let Some(relocation) = relocation {
        store.relocate(anchor, &target, &relocation);
    }
    Ok(None)
}

fn read<'a>(doc: &'a Value, addr: &Address) -> (Option<Kind>, Option<&'a Value>) {
    let container = get(doc, &addr.container);
    let value = container.and_then(|c| get(c, &addr.key.steps()));
    let kind = match addr.key {
        Key::Root => None,
        _ => container.map(Kind::of),
    };
    (kind, value)
}

fn changed(path: &str) -> DocumentError {
    DocumentError::invalid_path(path, "value changed while the operation ran")
}

fn write_back(
    doc: &mut Value,
    addr: &Address,
    target: &[Step],
    write: WriteBack,
    path: &str,
) -> DocumentResult<Option<Relocation>> {
    match write {
        WriteBack::Unchanged(_) => Ok(None),
        WriteBack::Replace(value) => {
            *slot(doc, addr, path)? = value;
            Ok(Some(Relocation::Replaced))
        }
        WriteBack::Remove => remove(doc, addr, path),
        WriteBack::Push(value) => match get_mut(doc, target) {
            Some(Value::Array(items)) => {
                items.push(value);
                Ok(None)
            }
            _ => Err(changed(path)),
        },
        WriteBack::Extend(members) => match get_mut(doc, target) {
            Some(Value::Object(map)) => {
                let keys = members.keys().cloned().collect();
                map.extend(members);
                Ok(Some(Relocation::Overwritten(keys)))
            }
            _ => Err(changed(path)),
        },
        WriteBack::Retain(mask) => match get_mut(doc, target) {
            Some(Value::Array(items)) if items.len() == mask.len() => {
                let mut keep = mask.iter().copied();
                items.retain(|_| keep.next().unwrap_or(false));
                Ok(Some(Relocation::Retained(mask)))
            }
            _ => Err(changed(path)),
        },
        WriteBack::Pop => match get_mut(doc, target) {
            Some(Value::Array(items)) if !items.is_empty() => {
                items.pop();
                Ok(Some(Relocation::Popped(items.len())))
            }
            _ => Ok(None),
        },
    }
}

/// The slot a `Replace` writes into, creating an object member if needed.
fn slot<'a>(doc: &'a mut Value, addr: &Address, path: &str) -> DocumentResult<&'a mut Value> {
    let container = get_mut(doc, &addr.container).ok_or_else(|| changed(path))?;
    match &addr.key {
        Key::Root => Ok(container),
        Key::Field { name } => match container {
            Value::Object(map) => Ok(map.entry(name.clone()).or_insert(Value::Null)),
            _ => Err(changed(path)),
        },
        Key::Indexed { name, index } => {
            let arr = if name.is_empty() {
                Some(container)
            } else {
                match container {
                    Value::Object(map) => map.get_mut(name),
                    _ => None,
                }
            };
            match arr {
                Some(Value::Array(items)) => items.get_mut(*index).ok_or_else(|| changed(path)),
                _ => Err(changed(path)),
            }
        }
    }
}

fn remove(doc: &mut Value, addr: &Address, path: &str) -> DocumentResult<Option<Relocation>> {
    let container = get_mut(doc, &addr.container).ok_or_else(|| changed(path))?;
    match &addr.key {
        Key::Root => {
            *container = Value::Object(Map::new());
            Ok(Some(Relocation::Replaced))
        }
        Key::Field { name } => match container {
            Value::Object(map) => Ok(map.remove(name).map(|_| Relocation::Removed)),
            _ => Err(changed(path)),
        },
        Key::Indexed { name, index } => {
            let arr = if name.is_empty() {
                Some(container)
            } else {
                match container {
                    Value::Object(map) => map.get_mut(name),
                    _ => None,
                }
            };
            match arr {
                Some(Value::Array(items)) if *index < items.len() => {
                    items.remove(*index);
                    Ok(Some(Relocation::Removed))
                }
                _ => Err(changed(path)),
            }
        }
    }
}
