//! A red-black tree that keeps every entry it is given, including entries
//! whose keys compare equal.
//!
//! Equal keys form small clusters: a new entry whose key matches a node on
//! the way down is hung off that node's free child slot (right first, then
//! left). The usual red-black rebalancing then runs unchanged, so a cluster
//! may be spread over neighbouring nodes once rotations kick in. Lookups by
//! key return *some* member of the cluster; lookups by key and value scan the
//! whole equal-key range.
//!
//! ```
//! use grappe::Tree;
//!
//! let mut tree = Tree::new();
//! tree.insert(7, "a");
//! tree.insert(7, "b");
//! assert_eq!(2, tree.len());
//!
//! assert_eq!(Some((7, "a")), tree.remove_entry(&7, &"a"));
//! assert_eq!(Some(&"b"), tree.try_get(&7));
//! assert!(tree.verify());
//! ```
mod alloc;
mod config;
mod error;
mod iter;
mod map;
mod node;
mod root;
mod stream;
mod tree;
mod verify;

use std::{cell::Cell, marker::PhantomData, ptr::NonNull};

pub use config::Config;
pub use error::{Error, Result};
pub use iter::{IntoIter, Iter, Keys, Nodes, Values};
pub use stream::{Subtree, SubtreeReader, SubtreeWriter};
#[cfg(feature = "serde")]
pub use stream::BincodeStream;
pub use tree::NodeEntry;
pub use verify::Violation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    Red = 0,
    Black = 1,
}

/// Traversal order of an enumerator, fixed when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

pub type NodePtr<K, V> = Option<NonNull<Node<K, V>>>;

/// Link accessors on nullable node pointers.
///
/// A missing node reads as black with no links, and writes through a missing
/// node are dropped. Every caller holds the only live access to the graph
/// while using these.
pub(crate) trait NodePtrExt: Copy {
    type Key;
    type Value;

    fn color(self) -> Color;
    fn is_black(self) -> bool;
    fn is_red(self) -> bool;
    fn left(self) -> NodePtr<Self::Key, Self::Value>;
    fn parent(self) -> NodePtr<Self::Key, Self::Value>;
    fn right(self) -> NodePtr<Self::Key, Self::Value>;
    fn set_color(self, color: Color);
    fn set_left(self, left: NodePtr<Self::Key, Self::Value>);
    fn set_parent(self, parent: NodePtr<Self::Key, Self::Value>);
    fn set_right(self, right: NodePtr<Self::Key, Self::Value>);
}

impl<K, V> NodePtrExt for NodePtr<K, V> {
    type Key = K;
    type Value = V;

    #[inline(always)]
    fn color(self) -> Color {
        self.map_or(Color::Black, |v| unsafe { v.as_ref() }.color)
    }

    #[inline(always)]
    fn is_black(self) -> bool {
        self.color() == Color::Black
    }

    #[inline(always)]
    fn is_red(self) -> bool {
        self.color() == Color::Red
    }

    #[inline(always)]
    fn left(self) -> NodePtr<K, V> {
        self.and_then(|v| unsafe { v.as_ref() }.left)
    }

    #[inline(always)]
    fn parent(self) -> NodePtr<K, V> {
        self.and_then(|v| unsafe { v.as_ref() }.parent)
    }

    #[inline(always)]
    fn right(self) -> NodePtr<K, V> {
        self.and_then(|v| unsafe { v.as_ref() }.right)
    }

    #[inline(always)]
    fn set_color(self, color: Color) {
        if let Some(mut node) = self {
            unsafe { node.as_mut() }.color = color;
        }
    }

    #[inline(always)]
    fn set_left(self, left: NodePtr<K, V>) {
        if let Some(mut node) = self {
            unsafe { node.as_mut() }.left = left;
        }
    }

    #[inline(always)]
    fn set_parent(self, parent: NodePtr<K, V>) {
        if let Some(mut node) = self {
            unsafe { node.as_mut() }.parent = parent;
        }
    }

    #[inline(always)]
    fn set_right(self, right: NodePtr<K, V>) {
        if let Some(mut node) = self {
            unsafe { node.as_mut() }.right = right;
        }
    }
}

impl<K, V> From<&Node<K, V>> for NodePtr<K, V> {
    fn from(node: &Node<K, V>) -> Self {
        Some(NonNull::from(node))
    }
}

pub struct Node<K, V> {
    pub(crate) parent: NodePtr<K, V>,
    pub(crate) left: NodePtr<K, V>,
    pub(crate) right: NodePtr<K, V>,
    pub(crate) color: Color,
    pub(crate) key: K,
    pub(crate) value: V,
}

/// A red-black tree multimap.
///
/// The tree owns its nodes through raw links; parents are back-references.
/// It is neither `Send` nor `Sync`: a single mutator is assumed.
pub struct Tree<K, V> {
    pub(crate) root: NodePtr<K, V>,
    pub(crate) len: usize,
    /// Search accelerator, never an owner. Cleared on every erase.
    pub(crate) last_found: Cell<NodePtr<K, V>>,
    pub(crate) config: Config,
    _marker: PhantomData<Box<Node<K, V>>>,
}

