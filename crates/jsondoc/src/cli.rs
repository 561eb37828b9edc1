//! `jsondoc`: run one path operation against a document read from stdin.
//!
//! Provides the core logic behind the `jsondoc` binary:
//!
//! ```text
//! jsondoc [--legacy] get    <path>
//! jsondoc [--legacy] set    <path> <json>
//! jsondoc [--legacy] append <path> <json>
//! jsondoc [--legacy] merge  <path> <json>
//! jsondoc [--legacy] delete <path>
//! ```
//!
//! `get` prints the value at the path; the other commands print the whole
//! document after the change.

use crate::codec;
use crate::document::Document;
use crate::error::DocumentError;
use crate::options::DocumentOptions;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum CliError {
    Usage(String),
    Document(DocumentError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(e)    => write!(f, "{e}"),
            CliError::Document(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<DocumentError> for CliError {
    fn from(e: DocumentError) -> Self { CliError::Document(e) }
}

pub const USAGE: &str = "Usage: jsondoc [--legacy] get|set|append|merge|delete <path> [json]";

// ── Commands ──────────────────────────────────────────────────────────────

/// Run the command in `args` (without the program name) against `input`.
///
/// Empty input is an empty document.
pub fn run(args: &[String], input: &str) -> Result<String, CliError> {
    let mut options = DocumentOptions::default();
    let mut rest = Vec::with_capacity(args.len());
    for arg in args {
        match arg.as_str() {
            "--legacy" => options = DocumentOptions::legacy(),
            _ => rest.push(arg.as_str()),
        }
    }

    let (command, path, json) = match rest.as_slice() {
        [command, path] => (*command, *path, None),
        [command, path, json] => (*command, *path, Some(*json)),
        _ => return Err(CliError::Usage(USAGE.to_string())),
    };

    let input = input.trim();
    let doc = if input.is_empty() {
        Document::new()
    } else {
        Document::parse(input)?
    };
    let mut doc = doc.with_options(options);

    match (command, json) {
        ("get", None) => return Ok(codec::to_json_pretty(&doc.get(path)?)),
        ("set", Some(json)) => {
            doc.set_json(path, json)?;
        }
        ("append", Some(json)) => {
            doc.append_json(path, json)?;
        }
        ("merge", Some(json)) => {
            doc.merge_json(path, json)?;
        }
        ("delete", None) => {
            doc.delete(path)?;
        }
        ("get" | "set" | "append" | "merge" | "delete", _) => {
            return Err(CliError::Usage(USAGE.to_string()))
        }
        (other, _) => return Err(CliError::Usage(format!("Unknown command: {other}"))),
    }
    Ok(doc.to_json_pretty()?)
}
