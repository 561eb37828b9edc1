use std::sync::OnceLock;

use regex::Regex;

use crate::types::{Key, Step};
use crate::PathError;

fn segment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([^\[]*)(?:\[([0-9]+)\])?$").expect("segment regex must compile")
    })
}

/// Parse a single path segment into a [`Key`].
///
/// The empty segment is `Root`. `name` is a field, `name[3]` and `[3]` are
/// indexed keys.
///
/// # Example
///
/// ```
/// use jsondoc_path::{parse_key, Key};
///
/// assert_eq!(parse_key("").unwrap(), Key::Root);
/// assert_eq!(parse_key("f1").unwrap(), Key::field("f1"));
/// assert_eq!(parse_key("f3[1]").unwrap(), Key::indexed("f3", 1));
/// assert_eq!(parse_key("[2]").unwrap(), Key::indexed("", 2));
/// assert!(parse_key("f3[x]").is_err());
/// ```
pub fn parse_key(segment: &str) -> Result<Key, PathError> {
    if segment.is_empty() {
        return Ok(Key::Root);
    }
    let caps = segment_re()
        .captures(segment)
        .ok_or_else(|| PathError::InvalidKey(segment.to_string()))?;
    let name = caps.get(1).map_or("", |m| m.as_str());
    match caps.get(2) {
        None => Ok(Key::field(name)),
        Some(digits) => {
            let index: usize = digits
                .as_str()
                .parse()
                .map_err(|_| PathError::InvalidKey(segment.to_string()))?;
            Ok(Key::indexed(name, index))
        }
    }
}

/// Parse a dotted path into key descriptors.
///
/// The empty path is the single `Root` key. Any other empty segment
/// (`"a..b"`, `".a"`, `"a."`) is rejected: `Root` is only valid on its own.
///
/// # Example
///
/// ```
/// use jsondoc_path::{parse_path, Key};
///
/// assert_eq!(parse_path("").unwrap(), vec![Key::Root]);
/// assert_eq!(
///     parse_path("f4.f42[1]").unwrap(),
///     vec![Key::field("f4"), Key::indexed("f42", 1)]
/// );
/// assert!(parse_path("f4..f42").is_err());
/// ```
pub fn parse_path(path: &str) -> Result<Vec<Key>, PathError> {
    if path.is_empty() {
        return Ok(vec![Key::Root]);
    }
    path.split('.')
        .map(|segment| match parse_key(segment)? {
            Key::Root => Err(PathError::InvalidKey(path.to_string())),
            key => Ok(key),
        })
        .collect()
}

/// Format key descriptors back into a dotted path.
///
/// ```
/// use jsondoc_path::{format_path, parse_path};
///
/// let keys = parse_path("f4.f42[1]").unwrap();
/// assert_eq!(format_path(&keys), "f4.f42[1]");
/// ```
pub fn format_path(keys: &[Key]) -> String {
    let mut out = String::new();
    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push_str(&key.to_string());
    }
    out
}

/// Format steps for diagnostics, e.g. `$.f4.f42[1]`.
pub fn format_steps(steps: &[Step]) -> String {
    let mut out = String::from("$");
    for step in steps {
        out.push_str(&step.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_root() {
        assert_eq!(parse_key("").unwrap(), Key::Root);
    }

    #[test]
    fn test_parse_key_field() {
        assert_eq!(parse_key("f1").unwrap(), Key::field("f1"));
        // Anything but `.` and `[` is part of the name.
        assert_eq!(parse_key("a b]-c").unwrap(), Key::field("a b]-c"));
    }

    #[test]
    fn test_parse_key_indexed() {
        assert_eq!(parse_key("f3[0]").unwrap(), Key::indexed("f3", 0));
        assert_eq!(parse_key("f3[12]").unwrap(), Key::indexed("f3", 12));
        assert_eq!(parse_key("[5]").unwrap(), Key::indexed("", 5));
        assert_eq!(parse_key("a[007]").unwrap(), Key::indexed("a", 7));
    }

    #[test]
    fn test_parse_key_invalid() {
        assert!(parse_key("f3[").is_err());
        assert!(parse_key("f3[]").is_err());
        assert!(parse_key("f3[-1]").is_err());
        assert!(parse_key("f3[1.5]").is_err());
        assert!(parse_key("f3[a]").is_err());
        assert!(parse_key("f3[1][2]").is_err());
        assert!(parse_key("f3[1]x").is_err());
        assert!(parse_key("a[b").is_err());
    }

    #[test]
    fn test_parse_key_index_overflow() {
        let err = parse_key("a[99999999999999999999999999]").unwrap_err();
        assert_eq!(
            err,
            PathError::InvalidKey("a[99999999999999999999999999]".to_string())
        );
    }

    #[test]
    fn test_parse_path() {
        assert_eq!(parse_path("").unwrap(), vec![Key::Root]);
        assert_eq!(parse_path("f1").unwrap(), vec![Key::field("f1")]);
        assert_eq!(
            parse_path("f4.f43[1].f432").unwrap(),
            vec![Key::field("f4"), Key::indexed("f43", 1), Key::field("f432")]
        );
        assert_eq!(
            parse_path("[0].[1]").unwrap(),
            vec![Key::indexed("", 0), Key::indexed("", 1)]
        );
    }

    #[test]
    fn test_parse_path_empty_segments() {
        assert!(parse_path(".").is_err());
        assert!(parse_path(".a").is_err());
        assert!(parse_path("a.").is_err());
        assert!(parse_path("a..b").is_err());
    }

    #[test]
    fn test_format_path() {
        assert_eq!(format_path(&[Key::Root]), "");
        assert_eq!(
            format_path(&[Key::field("f4"), Key::indexed("", 2)]),
            "f4.[2]"
        );
    }

    #[test]
    fn test_format_steps() {
        assert_eq!(format_steps(&[]), "$");
        assert_eq!(
            format_steps(&[Step::Key("f4".to_string()), Step::Index(1)]),
            "$.f4[1]"
        );
    }
}
