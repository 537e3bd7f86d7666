use thiserror::Error;
use tracing::warn;

use crate::{Node, NodePtr, Tree};

/// The first broken invariant found by [`Tree::check`].
///
/// This is a diagnostic: insertion and removal never produce one on a sound
/// tree, so any value seen here points at a bug or at corrupted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("root is red")]
    RedRoot,
    #[error("root has a parent")]
    RootHasParent,
    #[error("child does not point back at its parent")]
    BrokenParentLink,
    #[error("keys out of order")]
    OutOfOrder,
    #[error("red node with a red child")]
    RedRed,
    #[error("black height mismatch: left {left}, right {right}")]
    BlackHeight { left: usize, right: usize },
    #[error("tree holds {found} nodes but counts {expected}")]
    CountMismatch { expected: usize, found: usize },
    #[error("{depth} levels deep, at most {limit} fit {nodes} nodes")]
    TooDeep {
        depth: usize,
        limit: usize,
        nodes: usize,
    },
}

impl<K: Ord, V> Tree<K, V> {
    /// Walks the whole tree and returns its black height, counting nodes
    /// only (missing leaves add nothing).
    pub fn check(&self) -> Result<usize, Violation> {
        if let Some(root) = self.root() {
            if root.parent.is_some() {
                return Err(Violation::RootHasParent);
            }
            if root.is_red() {
                return Err(Violation::RedRoot);
            }
        }

        let (height, found) = Self::check_subtree(self.root)?;
        if found != self.len {
            return Err(Violation::CountMismatch {
                expected: self.len,
                found,
            });
        }
        if self.keys().zip(self.keys().skip(1)).any(|(a, b)| a > b) {
            return Err(Violation::OutOfOrder);
        }
        Ok(height)
    }

    pub fn verify(&self) -> bool {
        match self.check() {
            Ok(_) => true,
            Err(violation) => {
                warn!(%violation, len = self.len, "integrity check failed");
                false
            }
        }
    }

    /// Returns (black height, node count) of the subtree under `node`.
    fn check_subtree(node: NodePtr<K, V>) -> Result<(usize, usize), Violation> {
        let Some(ptr) = node else {
            return Ok((0, 0));
        };
        let current = unsafe { ptr.as_ref() };

        if let Some(left) = current.left {
            Self::check_link(current, unsafe { left.as_ref() }, node)?;
            if unsafe { left.as_ref() }.key > current.key {
                return Err(Violation::OutOfOrder);
            }
        }
        if let Some(right) = current.right {
            Self::check_link(current, unsafe { right.as_ref() }, node)?;
            if unsafe { right.as_ref() }.key < current.key {
                return Err(Violation::OutOfOrder);
            }
        }

        let (left, left_count) = Self::check_subtree(current.left)?;
        let (right, right_count) = Self::check_subtree(current.right)?;
        if left != right {
            return Err(Violation::BlackHeight { left, right });
        }

        Ok((
            left + usize::from(current.is_black()),
            left_count + right_count + 1,
        ))
    }

    fn check_link(
        parent: &Node<K, V>,
        child: &Node<K, V>,
        parent_ptr: NodePtr<K, V>,
    ) -> Result<(), Violation> {
        if child.parent != parent_ptr {
            return Err(Violation::BrokenParentLink);
        }
        if parent.is_red() && child.is_red() {
            return Err(Violation::RedRed);
        }
        Ok(())
    }
}
