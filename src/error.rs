//! Error types for grappe.

use thiserror::Error;

use crate::Violation;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// min/max or their removal on a tree with no entries.
    #[error("tree is empty")]
    EmptyTree,

    #[error("key not found")]
    KeyNotFound,

    /// A rebuilt node graph broke a red-black or ordering invariant.
    #[error("corrupted tree: {0}")]
    Corrupted(#[from] Violation),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("codec error: {0}")]
    Codec(#[from] bincode::Error),
}
