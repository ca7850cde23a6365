//! Domain layer: tree entities and path/tree primitives
//!
//! Pure in-memory logic, no configuration and no I/O.

pub mod entities;
pub mod tree;

pub use entities::{KeyPath, Map, Node, Separator};
pub use tree::{
    depth, flatten, iter_keys, leaves, lookup, recursive_delete, recursive_set, traverse,
    traverse_keys, Leaves, Traverse, DEFAULT_MAX_DEPTH,
};
