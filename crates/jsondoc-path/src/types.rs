//! Type definitions for dotted paths.

use std::fmt;

/// One concrete move inside a JSON value tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// Object member access.
    Key(String),
    /// Array element access.
    Index(usize),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Key(k) => write!(f, ".{k}"),
            Step::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// A sequence of steps, relative to some value.
pub type Steps = Vec<Step>;

/// The parsed form of one path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// The empty path: addresses the document root itself.
    Root,
    /// `name`: a member of an object.
    Field { name: String },
    /// `name[index]`, or `[index]` when `name` is empty.
    ///
    /// With a name, addresses an element of the array stored under `name`.
    /// Without one, addresses an element of the current container, which must
    /// already be an array.
    Indexed { name: String, index: usize },
}

impl Key {
    pub fn field(name: impl Into<String>) -> Self {
        Key::Field { name: name.into() }
    }

    pub fn indexed(name: impl Into<String>, index: usize) -> Self {
        Key::Indexed {
            name: name.into(),
            index,
        }
    }

    /// The key's member name. Empty for `Root` and index-only keys.
    pub fn name(&self) -> &str {
        match self {
            Key::Root => "",
            Key::Field { name } | Key::Indexed { name, .. } => name,
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Key::Root)
    }

    /// Index-only keys (`[3]`) address into the container itself.
    pub fn is_index_only(&self) -> bool {
        matches!(self, Key::Indexed { name, .. } if name.is_empty())
    }

    /// Expands the key into the steps that reach its value from the container.
    ///
    /// `Root` expands to nothing.
    pub fn steps(&self) -> Steps {
        match self {
            Key::Root => Vec::new(),
            Key::Field { name } => vec![Step::Key(name.clone())],
            Key::Indexed { name, index } if name.is_empty() => vec![Step::Index(*index)],
            Key::Indexed { name, index } => vec![Step::Key(name.clone()), Step::Index(*index)],
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Root => Ok(()),
            Key::Field { name } => f.write_str(name),
            Key::Indexed { name, index } => write!(f, "{name}[{index}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_steps() {
        assert!(Key::Root.steps().is_empty());
        assert_eq!(Key::field("a").steps(), vec![Step::Key("a".to_string())]);
        assert_eq!(Key::indexed("", 2).steps(), vec![Step::Index(2)]);
        assert_eq!(
            Key::indexed("f3", 1).steps(),
            vec![Step::Key("f3".to_string()), Step::Index(1)]
        );
    }

    #[test]
    fn test_key_name() {
        assert_eq!(Key::Root.name(), "");
        assert_eq!(Key::field("f1").name(), "f1");
        assert_eq!(Key::indexed("f3", 0).name(), "f3");
        assert_eq!(Key::indexed("", 0).name(), "");
    }

    #[test]
    fn test_key_kinds() {
        assert!(Key::Root.is_root());
        assert!(Key::indexed("", 0).is_index_only());
        assert!(!Key::indexed("a", 0).is_index_only());
        assert!(!Key::field("a").is_index_only());
    }

    #[test]
    fn test_display() {
        assert_eq!(Key::Root.to_string(), "");
        assert_eq!(Key::field("f4").to_string(), "f4");
        assert_eq!(Key::indexed("f42", 1).to_string(), "f42[1]");
        assert_eq!(Key::indexed("", 7).to_string(), "[7]");
        assert_eq!(Step::Key("a".to_string()).to_string(), ".a");
        assert_eq!(Step::Index(3).to_string(), "[3]");
    }
}
