//! The value model.
//!
//! Documents hold plain `serde_json` values. Numbers are doubles: every number
//! entering a document is canonicalized (see [`jsondoc_util::json_number`]),
//! so an integer and the equal double are the same value.

use std::fmt;

pub use serde_json::{Map, Value};

/// The variant of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }

    /// Name of the kind of an optional value; absent values are `"missing"`.
    pub fn describe(value: Option<&Value>) -> &'static str {
        value.map_or("missing", |v| Kind::of(v).as_str())
    }

    /// Arrays and objects are containers; everything else is a scalar.
    pub fn is_container(&self) -> bool {
        matches!(self, Kind::Array | Kind::Object)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
