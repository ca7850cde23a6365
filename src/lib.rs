//! Path-addressed access to nested key-value trees.
//!
//! A tree maps string keys either to nested mappings or to opaque leaf values.
//! Nodes are addressed by a separator-joined path (`"user.information.attribute"`)
//! or by an explicit key sequence (`["user", "information", "attribute"]`).
//!
//! - [`domain`]: the raw primitives (`recursive_set`, `recursive_delete`,
//!   `leaves`, `traverse`, `flatten`, ...) over a [`Map`].
//! - [`Trict`]: the addressable container that normalizes paths and guards the
//!   no-separator-in-key invariant.
//!
//! ```
//! use trict::{Separator, Trict};
//!
//! let tr: Trict<&str> = Trict::from_flat_dict(
//!     [("user.information.attribute", "infonugget"), ("user.moreinformation", "extranugget")],
//!     Separator::default(),
//! )
//! .unwrap();
//! assert_eq!(tr.get_leaf("user.moreinformation").unwrap(), Some(&"extranugget"));
//! assert_eq!(tr.flatten().unwrap().len(), 2);
//! ```

pub mod config;
pub mod domain;
pub mod errors;
pub mod tree_traits;
pub mod trict;

#[cfg(test)]
mod util;

pub use config::{RawTrictConfig, TrictConfig};
pub use domain::{
    depth, flatten, iter_keys, leaves, lookup, recursive_delete, recursive_set, traverse,
    traverse_keys, KeyPath, Leaves, Map, Node, Separator, Traverse, DEFAULT_MAX_DEPTH,
};
pub use errors::{TrictError, TrictResult};
pub use tree_traits::TreeConvert;
pub use trict::{Mapper, Trict};
