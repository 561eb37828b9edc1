//! Document options.
//!
//! Two behaviors of the operation set have more than one defensible reading.
//! Both are selectable here; the defaults are the unambiguous ones.
//!
//! ```
//! use jsondoc::{DocumentOptions, EmptyFilter, IndexedDelete};
//!
//! let options = DocumentOptions::from_toml_str(r#"
//!     indexed_delete = "trim_last"
//!     empty_filter = "null"
//! "#).unwrap();
//! assert_eq!(options.indexed_delete, IndexedDelete::TrimLast);
//! assert_eq!(options.empty_filter, EmptyFilter::Null);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::DocumentResult;

/// How `delete` treats an indexed key such as `f3[1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexedDelete {
    /// Remove the element at the index and shift the rest down.
    #[default]
    Remove,
    /// Legacy behavior: when the element at the index is itself an array,
    /// drop that array's last element; otherwise leave the document as is.
    TrimLast,
}

/// What `filter` stores when no element matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyFilter {
    /// An empty array.
    #[default]
    EmptyArray,
    /// Legacy behavior: `null`.
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentOptions {
    pub indexed_delete: IndexedDelete,
    pub empty_filter: EmptyFilter,
}

impl DocumentOptions {
    /// Legacy options: indexed deletes trim the last element and an empty
    /// filter result is `null`.
    pub fn legacy() -> Self {
        Self {
            indexed_delete: IndexedDelete::TrimLast,
            empty_filter: EmptyFilter::Null,
        }
    }

    /// Load options from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> DocumentResult<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocumentError;

    #[test]
    fn test_defaults() {
        let options = DocumentOptions::default();
        assert_eq!(options.indexed_delete, IndexedDelete::Remove);
        assert_eq!(options.empty_filter, EmptyFilter::EmptyArray);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let options = DocumentOptions::from_toml_str("empty_filter = \"null\"").unwrap();
        assert_eq!(options.indexed_delete, IndexedDelete::Remove);
        assert_eq!(options.empty_filter, EmptyFilter::Null);
        assert_eq!(DocumentOptions::from_toml_str("").unwrap(), DocumentOptions::default());
    }

    #[test]
    fn test_unknown_variant_is_config_error() {
        let err = DocumentOptions::from_toml_str("indexed_delete = \"shift\"").unwrap_err();
        assert!(matches!(err, DocumentError::Config(_)));
    }

    #[test]
    fn test_options_from_json() {
        let options: DocumentOptions =
            serde_json::from_str(r#"{"indexed_delete": "trim_last", "empty_filter": "null"}"#)
                .unwrap();
        assert_eq!(options, DocumentOptions::legacy());
    }
}
