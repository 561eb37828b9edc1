//! Dotted path expressions for JSON documents.
//!
//! A path is a `.`-separated list of segments. Each segment is a member name,
//! optionally followed by an array index: `f4.f42[1]`. A segment may also be
//! an index on its own (`[1]`), which indexes into the current value directly.
//! The empty path addresses the root.
//!
//! # Example
//!
//! ```
//! use jsondoc_path::{get, parse_path, Key, Step};
//!
//! let keys = parse_path("f4.f42[1]").unwrap();
//! assert_eq!(keys, vec![Key::field("f4"), Key::indexed("f42", 1)]);
//!
//! let steps: Vec<Step> = keys.iter().flat_map(Key::steps).collect();
//! let doc = serde_json::json!({"f4": {"f42": ["v3", "v4"]}});
//! assert_eq!(get(&doc, &steps), Some(&serde_json::json!("v4")));
//! ```

use thiserror::Error;

mod get;
mod parse;
pub mod types;

pub use get::{get, get_mut};
pub use parse::{format_path, format_steps, parse_key, parse_path};
pub use types::{Key, Step, Steps};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("INVALID_KEY: {0:?}")]
    InvalidKey(String),
}
