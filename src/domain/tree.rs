//! Path/tree primitives operating directly on a raw nested mapping.
//!
//! All traversals use explicit stacks, so tree depth is bounded by memory
//! rather than by the native call stack.

use std::collections::btree_map;
use std::collections::BTreeMap;

use tracing::{instrument, trace};

use crate::domain::entities::{Map, Node};
use crate::errors::{TrictError, TrictResult};

/// Default cap on path length for [`flatten`].
pub const DEFAULT_MAX_DEPTH: usize = 1000;

fn empty_path() -> TrictError {
    TrictError::InvalidPath {
        reason: "path must contain at least one key".to_string(),
    }
}

/// Recursively set a value, creating missing intermediate mappings.
///
/// Descending through an existing leaf fails with [`TrictError::NotAMapping`];
/// the tree is left untouched in that case.
///
/// ```
/// use trict::{recursive_set, Map, Node};
///
/// let mut root: Map<&str> = Map::new();
/// let path: Vec<String> = "user.information.attribute".split('.').map(String::from).collect();
/// recursive_set(&mut root, &path, Node::Leaf("infonugget")).unwrap();
/// assert!(root["user"].is_map());
/// ```
#[instrument(level = "trace", skip(root, value))]
pub fn recursive_set<V>(root: &mut Map<V>, path: &[String], value: Node<V>) -> TrictResult<()> {
    let (last, parents) = path.split_last().ok_or_else(empty_path)?;

    // Structural check first, so a failing set leaves no auto-vivified mappings behind.
    let mut probe = &*root;
    for (i, key) in parents.iter().enumerate() {
        match probe.get(key) {
            Some(Node::Map(map)) => probe = map,
            Some(Node::Leaf(_)) => return Err(TrictError::not_a_mapping(&path[..=i])),
            None => break,
        }
    }

    let mut current = root;
    for (i, key) in parents.iter().enumerate() {
        let child = current.entry(key.clone()).or_insert_with(|| {
            trace!("creating intermediate mapping at {:?}", &path[..=i]);
            Node::empty_map()
        });
        current = match child {
            Node::Map(map) => map,
            Node::Leaf(_) => return Err(TrictError::not_a_mapping(&path[..=i])),
        };
    }
    current.insert(last.clone(), value);
    Ok(())
}

/// Remove the node at `path` and return it. Emptied parents are kept.
#[instrument(level = "trace", skip(root))]
pub fn recursive_delete<V>(root: &mut Map<V>, path: &[String]) -> TrictResult<Node<V>> {
    let (last, parents) = path.split_last().ok_or_else(empty_path)?;

    let mut current = root;
    for (i, key) in parents.iter().enumerate() {
        current = match current.get_mut(key) {
            Some(Node::Map(map)) => map,
            Some(Node::Leaf(_)) => return Err(TrictError::not_a_mapping(&path[..=i])),
            None => return Err(TrictError::not_found(path)),
        };
    }
    current
        .remove(last)
        .ok_or_else(|| TrictError::not_found(path))
}

/// Resolve `path` by chained indexing.
pub fn lookup<'a, V>(root: &'a Map<V>, path: &[String]) -> TrictResult<&'a Node<V>> {
    let (last, parents) = path.split_last().ok_or_else(empty_path)?;

    let mut current = root;
    for (i, key) in parents.iter().enumerate() {
        current = match current.get(key) {
            Some(Node::Map(map)) => map,
            Some(Node::Leaf(_)) => return Err(TrictError::not_a_mapping(&path[..=i])),
            None => return Err(TrictError::not_found(path)),
        };
    }
    current.get(last).ok_or_else(|| TrictError::not_found(path))
}

/// Depth-first, pre-order iterator over every node with its full path.
#[derive(Debug)]
pub struct Traverse<'a, V> {
    stack: Vec<(Vec<String>, btree_map::Iter<'a, String, Node<V>>)>,
}

impl<'a, V> Iterator for Traverse<'a, V> {
    type Item = (Vec<String>, &'a Node<V>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (prefix, children) = self.stack.last_mut()?;
            match children.next() {
                Some((key, node)) => {
                    let mut path = prefix.clone();
                    path.push(key.clone());
                    if let Node::Map(map) = node {
                        self.stack.push((path.clone(), map.iter()));
                    }
                    return Some((path, node));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Iterator over the non-mapping nodes of a tree, in traversal order.
#[derive(Debug)]
pub struct Leaves<'a, V> {
    inner: Traverse<'a, V>,
}

impl<'a, V> Iterator for Leaves<'a, V> {
    type Item = (Vec<String>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (path, node) = self.inner.next()?;
            if let Node::Leaf(value) = node {
                return Some((path, value));
            }
        }
    }
}

/// Every node, mappings included, paired with its path.
pub fn traverse<V>(root: &Map<V>) -> Traverse<'_, V> {
    Traverse {
        stack: vec![(Vec::new(), root.iter())],
    }
}

/// Keys-only mode of [`traverse`].
pub fn traverse_keys<V>(root: &Map<V>) -> impl Iterator<Item = Vec<String>> + '_ {
    traverse(root).map(|(path, _)| path)
}

/// Leaf values paired with their paths.
pub fn leaves<V>(root: &Map<V>) -> Leaves<'_, V> {
    Leaves {
        inner: traverse(root),
    }
}

/// Every key at every level, pre-order.
pub fn iter_keys<V>(root: &Map<V>) -> impl Iterator<Item = &String> + '_ {
    let mut stack = vec![root.iter()];
    std::iter::from_fn(move || loop {
        let children = stack.last_mut()?;
        match children.next() {
            Some((key, node)) => {
                if let Node::Map(map) = node {
                    stack.push(map.iter());
                }
                return Some(key);
            }
            None => {
                stack.pop();
            }
        }
    })
}

/// Length of the longest path in the tree; 0 for an empty root.
pub fn depth<V>(root: &Map<V>) -> usize {
    let mut max_depth = 0;
    let mut stack = vec![(root, 0usize)];

    while let Some((map, level)) = stack.pop() {
        for node in map.values() {
            max_depth = max_depth.max(level + 1);
            if let Node::Map(child) = node {
                stack.push((child, level + 1));
            }
        }
    }

    max_depth
}

/// Flatten into a single-level mapping keyed by separator-joined paths.
///
/// Fails if any key on a leaf path contains `separator` or the joined path does
/// not split back into the same keys, or if any node lies
/// deeper than `max_depth` keys. Empty mappings have no leaves and vanish.
#[instrument(level = "trace", skip(root))]
pub fn flatten<V: Clone>(
    root: &Map<V>,
    separator: &str,
    max_depth: usize,
) -> TrictResult<BTreeMap<String, V>> {
    if separator.is_empty() {
        return Err(TrictError::InvalidSeparator {
            reason: "cannot flatten with an empty separator".to_string(),
        });
    }

    let mut flat = BTreeMap::new();
    for (path, node) in traverse(root) {
        if path.len() > max_depth {
            return Err(TrictError::DepthExceeded { max_depth, path });
        }
        let Node::Leaf(value) = node else {
            continue;
        };
        // joined path must split back into the same keys
        let joined = path.join(separator);
        if path.iter().any(|key| key.contains(separator))
            || !joined.split(separator).eq(path.iter().map(String::as_str))
        {
            return Err(TrictError::SeparatorInPath {
                separator: separator.to_string(),
                path,
            });
        }
        flat.insert(joined, value.clone());
    }
    Ok(flat)
}
