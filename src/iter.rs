//! Ordered enumerators.
//!
//! Every enumerator borrows the tree it walks, so the tree cannot change
//! while one is alive. Creating a new one always starts over from the end
//! matching its direction.
mod nodes;
mod tree;

pub use nodes::Nodes;
pub use tree::{IntoIter, Iter, Keys, Values};
