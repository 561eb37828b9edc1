//! Path-addressed JSON documents.
//!
//! A [`Document`] wraps a JSON value tree and is read and changed through
//! dotted paths (see [`jsondoc_path`]):
//!
//! ```
//! use jsondoc::Document;
//!
//! let mut doc = Document::parse(r#"{"f3": [10, 20, 30], "f4": {"f41": "v2"}}"#).unwrap();
//! assert_eq!(doc.get_int("f3[1]").unwrap(), 20);
//!
//! doc.set_str("f4.f44", "new")
//!     .and_then(|d| d.append_int("f3", 40))
//!     .and_then(|d| d.merge_json("f4", r#"{"f41": "v9"}"#))
//!     .unwrap();
//! doc.filter("f3", |item| item.get_int("").map(|n| n > 15).unwrap_or(false))
//!     .unwrap();
//!
//! assert_eq!(
//!     doc.to_json().unwrap(),
//!     r#"{"f3":[20,30,40],"f4":{"f41":"v9","f44":"new"}}"#
//! );
//! ```
//!
//! Every operation shares one traversal and write-back primitive
//! ([`mutate`]); the operations themselves are the closed set in [`Op`].

pub mod cli;
pub mod codec;
mod document;
mod error;
pub mod mutate;
pub mod navigate;
mod op;
mod options;
pub mod store;
mod value;

pub use document::Document;
pub use error::{DocumentError, DocumentResult};
pub use mutate::{mutate, Target, WriteBack};
pub use navigate::{resolve, Address};
pub use op::{Op, Predicate};
pub use options::{DocumentOptions, EmptyFilter, IndexedDelete};
pub use store::{Anchor, Relocation, Store};
pub use value::{Kind, Map, Value};
