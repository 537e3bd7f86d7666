use std::ptr::NonNull;

use crate::{Color, Node, NodePtr};

/// Allocates a detached red node.
///
/// # Safety
///
/// It leaks; pair it with [`own_back`] once the node leaves the tree.
pub(crate) unsafe fn leak_alloc_node<K, V>(key: K, value: V) -> NonNull<Node<K, V>> {
    let node = Node {
        parent: None,
        left: None,
        right: None,
        color: Color::Red,
        key,
        value,
    };
    NonNull::from(Box::leak(Box::new(node)))
}

/// # Safety
///
/// `node` must come from [`leak_alloc_node`], be unlinked from any tree, and
/// not be owned back twice.
pub(crate) unsafe fn own_back<K, V>(node: NonNull<Node<K, V>>) -> Box<Node<K, V>> {
    unsafe { Box::from_raw(node.as_ptr()) }
}

/// Frees every node reachable from `root` without recursion: go down to a
/// leaf, unhook it from its parent, free it, climb back.
///
/// # Safety
///
/// `root` must be the root of a well-linked graph of nodes allocated by
/// [`leak_alloc_node`] that nothing else references.
pub(crate) unsafe fn free_subtree<K, V>(root: NodePtr<K, V>) {
    let mut current = root;
    while let Some(node) = current {
        let (left, right, parent) = {
            let node_ref = unsafe { node.as_ref() };
            (node_ref.left, node_ref.right, node_ref.parent)
        };
        if left.is_some() {
            current = left;
            continue;
        }
        if right.is_some() {
            current = right;
            continue;
        }
        // Don't go through erase: no rebalancing needed on the way out.
        if current != root {
            if let Some(mut parent) = parent {
                let parent = unsafe { parent.as_mut() };
                if parent.left == current {
                    parent.left = None;
                } else {
                    parent.right = None;
                }
            }
            current = parent;
        } else {
            current = None;
        }
        drop(unsafe { own_back(node) });
    }
}
