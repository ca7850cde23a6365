//! Error taxonomy for tree primitives and the addressable container

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrictError {
    #[error("invalid path: {reason}")]
    InvalidPath { reason: String },

    #[error("invalid separator: {reason}")]
    InvalidSeparator { reason: String },

    #[error("separator \"{separator}\" found in key {key}")]
    SeparatorInKey { separator: String, key: String },

    #[error("separator \"{separator}\" found in a subkey in path {path:?}")]
    SeparatorInPath {
        separator: String,
        path: Vec<String>,
    },

    #[error("path not found: {path:?}")]
    PathNotFound { path: Vec<String> },

    #[error("no key in {candidates:?} found")]
    NoCandidateFound { candidates: Vec<Vec<String>> },

    #[error("cannot descend into leaf value at {path:?}")]
    NotAMapping { path: Vec<String> },

    #[error("node at {path:?} is a mapping, not a leaf")]
    NotALeaf { path: Vec<String> },

    #[error("max depth {max_depth} exceeded at {path:?}")]
    DepthExceeded { max_depth: usize, path: Vec<String> },

    #[error("config error: {message}")]
    Config { message: String },
}

impl TrictError {
    /// True for the failures that non-strict lookups suppress.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TrictError::PathNotFound { .. } | TrictError::NoCandidateFound { .. }
        )
    }

    pub(crate) fn not_found(path: &[String]) -> Self {
        Self::PathNotFound {
            path: path.to_vec(),
        }
    }

    pub(crate) fn not_a_mapping(path: &[String]) -> Self {
        Self::NotAMapping {
            path: path.to_vec(),
        }
    }
}

pub type TrictResult<T> = Result<T, TrictError>;
