use jsondoc_path::PathError;
use thiserror::Error;

use crate::value::Kind;

#[derive(Debug, Error)]
pub enum DocumentError {
    /// Malformed JSON text.
    #[error("PARSE_ERROR: {0}")]
    Parse(String),
    /// Malformed path segment.
    #[error("INVALID_KEY: {0:?}")]
    InvalidKey(String),
    /// A segment does not resolve: missing member, index out of range, or a
    /// scalar in the middle of the path.
    #[error("INVALID_PATH: {path:?} ({reason})")]
    InvalidPath { path: String, reason: String },
    /// A typed accessor met a value of another kind.
    #[error("TYPE_MISMATCH: {path:?} expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: Kind,
        found: &'static str,
    },
    /// Append, merge or filter applied to the wrong kind of value.
    #[error("OPERATION_TYPE: {op} at {path:?} expected {expected}, found {found}")]
    OperationType {
        op: &'static str,
        path: String,
        expected: Kind,
        found: &'static str,
    },
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("CONFIG: {0}")]
    Config(#[from] toml::de::Error),
}

impl DocumentError {
    pub(crate) fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        DocumentError::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<PathError> for DocumentError {
    fn from(e: PathError) -> Self {
        match e {
            PathError::InvalidKey(key) => DocumentError::InvalidKey(key),
        }
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(e: serde_json::Error) -> Self {
        DocumentError::Parse(e.to_string())
    }
}

pub type DocumentResult<T> = Result<T, DocumentError>;
