//! Domain entities: tree nodes, paths and separators

use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::errors::{TrictError, TrictResult};

/// A mapping level of the tree. Iteration order is ascending key order.
pub type Map<V> = BTreeMap<String, Node<V>>;

/// A tree node: either a nested mapping or an opaque leaf value.
///
/// Deserializes untagged: anything that reads as a string-keyed map becomes
/// `Node::Map`, everything else becomes `Node::Leaf`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node<V> {
    Map(Map<V>),
    Leaf(V),
}

impl<V> Node<V> {
    pub fn leaf(value: V) -> Self {
        Node::Leaf(value)
    }

    pub fn empty_map() -> Self {
        Node::Map(Map::new())
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Node::Map(_))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn as_map(&self) -> Option<&Map<V>> {
        match self {
            Node::Map(map) => Some(map),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&V> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Map(_) => None,
        }
    }

    pub fn into_leaf(self) -> Option<V> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Map(_) => None,
        }
    }
}

impl<V> From<V> for Node<V> {
    fn from(value: V) -> Self {
        Node::Leaf(value)
    }
}

/// Key separator for string-form paths.
///
/// Configuration text maps the empty string to `Disabled`; see `From<String>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Separator {
    Str(String),
    /// Only explicit key sequences are accepted as paths.
    Disabled,
}

impl Default for Separator {
    fn default() -> Self {
        Separator::Str(".".to_string())
    }
}

impl From<String> for Separator {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Separator::Disabled
        } else {
            Separator::Str(value)
        }
    }
}

impl From<Separator> for String {
    fn from(value: Separator) -> Self {
        match value {
            Separator::Str(sep) => sep,
            Separator::Disabled => String::new(),
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Separator::Str(sep) => write!(f, "{}", sep),
            Separator::Disabled => write!(f, "<none>"),
        }
    }
}

impl Separator {
    /// Create a string separator, rejecting the empty string.
    pub fn new(sep: impl Into<String>) -> TrictResult<Self> {
        let sep = Separator::Str(sep.into());
        sep.validate()?;
        Ok(sep)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Separator::Str(sep) => Some(sep),
            Separator::Disabled => None,
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Separator::Disabled)
    }

    pub fn validate(&self) -> TrictResult<()> {
        match self {
            Separator::Str(sep) if sep.is_empty() => Err(TrictError::InvalidSeparator {
                reason: "separator must not be empty".to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Split a joined path into its keys.
    pub fn split(&self, joined: &str) -> TrictResult<Vec<String>> {
        self.validate()?;
        match self {
            Separator::Str(sep) => Ok(joined.split(sep.as_str()).map(String::from).collect()),
            Separator::Disabled => Err(TrictError::InvalidSeparator {
                reason: format!("cannot split '{}' without a separator", joined),
            }),
        }
    }

    /// Separator used when joining flattened paths; a disabled separator joins with ".".
    pub(crate) fn join_str(&self) -> &str {
        self.as_str().unwrap_or(".")
    }
}

/// A path into a tree: keys joined by a separator, or an explicit key sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPath {
    Joined(String),
    Keys(Vec<String>),
}

impl KeyPath {
    /// Normalize into the canonical key sequence.
    pub fn resolve(&self, separator: &Separator) -> TrictResult<Vec<String>> {
        match self {
            KeyPath::Joined(joined) => {
                if separator.is_disabled() {
                    return Err(TrictError::InvalidPath {
                        reason: format!(
                            "string path '{}' given but no separator is configured",
                            joined
                        ),
                    });
                }
                separator.split(joined)
            }
            KeyPath::Keys(keys) if keys.is_empty() => Err(TrictError::InvalidPath {
                reason: "key sequence is empty".to_string(),
            }),
            KeyPath::Keys(keys) => Ok(keys.clone()),
        }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPath::Joined(joined) => write!(f, "{}", joined),
            KeyPath::Keys(keys) => write!(f, "[{}]", keys.iter().join(", ")),
        }
    }
}

impl From<&str> for KeyPath {
    fn from(value: &str) -> Self {
        KeyPath::Joined(value.to_string())
    }
}

impl From<String> for KeyPath {
    fn from(value: String) -> Self {
        KeyPath::Joined(value)
    }
}

impl From<&String> for KeyPath {
    fn from(value: &String) -> Self {
        KeyPath::Joined(value.clone())
    }
}

impl From<Vec<String>> for KeyPath {
    fn from(value: Vec<String>) -> Self {
        KeyPath::Keys(value)
    }
}

impl From<Vec<&str>> for KeyPath {
    fn from(value: Vec<&str>) -> Self {
        KeyPath::Keys(value.into_iter().map(String::from).collect())
    }
}

impl From<&[String]> for KeyPath {
    fn from(value: &[String]) -> Self {
        KeyPath::Keys(value.to_vec())
    }
}

impl From<&[&str]> for KeyPath {
    fn from(value: &[&str]) -> Self {
        KeyPath::Keys(value.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for KeyPath {
    fn from(value: [&str; N]) -> Self {
        KeyPath::Keys(value.iter().map(|s| s.to_string()).collect())
    }
}
