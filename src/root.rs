use std::{mem, ptr::NonNull};

use tracing::trace;

use super::{
    Color, Node, NodePtr, NodePtrExt, Tree,
    alloc::{leak_alloc_node, own_back},
};

/// Which child slot of the parent a new node hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ComingFrom {
    Left,
    Right,
}

// Structural mutation. Nothing else in the crate rewires links.
impl<K, V> Tree<K, V> {
    /// Allocates a node for `key`/`value` and hangs it from `parent`, then
    /// rebalances. `parent` of `None` means the tree is empty.
    pub(crate) fn link(
        &mut self,
        key: K,
        value: V,
        parent: NodePtr<K, V>,
        direction: ComingFrom,
    ) -> NonNull<Node<K, V>> {
        // SAFETY: handed to the tree right below, returned by erase.
        let node = unsafe { leak_alloc_node(key, value) };
        let ptr = Some(node);
        ptr.set_parent(parent);
        match (parent, direction) {
            (None, _) => self.root = ptr,
            (Some(_), ComingFrom::Left) => parent.set_left(ptr),
            (Some(_), ComingFrom::Right) => parent.set_right(ptr),
        }
        self.len += 1;
        self.insert_color(node);
        trace!(len = self.len, ?direction, "linked node");
        node
    }

    /// Restores the red-black properties after `node` was linked red.
    fn insert_color(&mut self, node: NonNull<Node<K, V>>) {
        let mut node: NodePtr<K, V> = Some(node);

        // Loop invariant: node is red. A red parent is never the root, so the
        // grandparent exists whenever we get inside.
        while node.parent().is_red() {
            let parent = node.parent();
            let gparent = parent.parent();

            if parent == gparent.left() {
                let uncle = gparent.right();
                if uncle.is_red() {
                    /*
                     * Case 1 - uncle is red (color flips).
                     *
                     *       G            g
                     *      / \          / \
                     *     p   u  -->   P   U
                     *    /            /
                     *   n            n
                     *
                     * g's parent might be red: recurse at g.
                     */
                    parent.set_color(Color::Black);
                    uncle.set_color(Color::Black);
                    gparent.set_color(Color::Red);
                    node = gparent;
                    continue;
                }

                if node == parent.right() {
                    /*
                     * Case 2 - uncle is black and node is the inner child
                     * (left rotate at parent).
                     *
                     *      G             G
                     *     / \           / \
                     *    p   U  -->    n   U
                     *     \           /
                     *      n         p
                     */
                    node = parent;
                    self.rotate_left(node);
                }

                /*
                 * Case 3 - uncle is black and node is the outer child
                 * (right rotate at gparent).
                 *
                 *        G           P
                 *       / \         / \
                 *      p   U  -->  n   g
                 *     /                 \
                 *    n                   U
                 */
                let parent = node.parent();
                let gparent = parent.parent();
                parent.set_color(Color::Black);
                gparent.set_color(Color::Red);
                self.rotate_right(gparent);
            } else {
                let uncle = gparent.left();
                if uncle.is_red() {
                    /* Case 1 - color flips */
                    parent.set_color(Color::Black);
                    uncle.set_color(Color::Black);
                    gparent.set_color(Color::Red);
                    node = gparent;
                    continue;
                }

                if node == parent.left() {
                    /* Case 2 - right rotate at parent */
                    node = parent;
                    self.rotate_right(node);
                }

                /* Case 3 - left rotate at gparent */
                let parent = node.parent();
                let gparent = parent.parent();
                parent.set_color(Color::Black);
                gparent.set_color(Color::Red);
                self.rotate_left(gparent);
            }
        }

        self.root.set_color(Color::Black);
    }

    /// Unlinks `node` and returns the entry it held.
    ///
    /// When `node` has two children its successor is spliced out instead and
    /// the successor's entry moves into `node`, so `node` stays allocated.
    pub(crate) fn erase(&mut self, node: NonNull<Node<K, V>>) -> (K, V) {
        let z: NodePtr<K, V> = Some(node);
        let y = if z.left().is_none() || z.right().is_none() {
            z
        } else {
            Self::minimum(z.right())
        };
        let x = if y.left().is_some() { y.left() } else { y.right() };
        let x_parent = y.parent();

        x.set_parent(x_parent);
        self.change_child(y, x, x_parent);

        let rebalance = y.is_black();
        let Some(y) = y else {
            unreachable!("the spliced node is either the target or its successor")
        };
        // SAFETY: y is unlinked and nothing points at it anymore.
        let mut spliced = unsafe { own_back(y) };
        if y != node {
            // SAFETY: node is still linked and we hold the tree mutably.
            let target = unsafe { &mut *node.as_ptr() };
            mem::swap(&mut target.key, &mut spliced.key);
            mem::swap(&mut target.value, &mut spliced.value);
        }

        if rebalance {
            self.erase_color(x, x_parent);
        }
        self.len -= 1;
        self.last_found.set(None);
        trace!(len = self.len, rebalance, "erased node");

        let Node { key, value, .. } = *spliced;
        (key, value)
    }

    /// Restores the black height after a black node left from above `node`.
    /// `node` may be missing, hence the explicit `parent`.
    fn erase_color(&mut self, mut node: NodePtr<K, V>, mut parent: NodePtr<K, V>) {
        // Loop invariants:
        // - node is black (or missing)
        // - node is not the root, so parent is present
        // - every path through node is one black short
        while node != self.root && node.is_black() {
            if node == parent.left() {
                let mut sibling = parent.right();
                if sibling.is_red() {
                    /*
                     * Case 1 - left rotate at parent
                     *
                     *     P               S
                     *    / \             / \
                     *   N   s    -->    p   Sr
                     *      / \         / \
                     *     Sl  Sr      N   Sl
                     */
                    sibling.set_color(Color::Black);
                    parent.set_color(Color::Red);
                    self.rotate_left(parent);
                    sibling = parent.right();
                }
                if sibling.left().is_black() && sibling.right().is_black() {
                    /*
                     * Case 2 - sibling color flip, recurse at p
                     *
                     *    (p)           (p)
                     *    / \           / \
                     *   N   S    -->  N   s
                     *      / \           / \
                     *     Sl  Sr        Sl  Sr
                     */
                    sibling.set_color(Color::Red);
                    node = parent;
                    parent = node.parent();
                    continue;
                }
                if sibling.right().is_black() {
                    /*
                     * Case 3 - right rotate at sibling
                     *
                     *   (p)           (p)
                     *   / \           / \
                     *  N   S    -->  N   sl
                     *     / \             \
                     *    sl  Sr            S
                     *                       \
                     *                        Sr
                     */
                    sibling.left().set_color(Color::Black);
                    sibling.set_color(Color::Red);
                    self.rotate_right(sibling);
                    sibling = parent.right();
                }
                /*
                 * Case 4 - left rotate at parent + color flips
                 *
                 *      (p)             (s)
                 *      / \             / \
                 *     N   S     -->   P   Sr
                 *        / \         / \
                 *      (sl) sr      N  (sl)
                 */
                sibling.set_color(parent.color());
                parent.set_color(Color::Black);
                sibling.right().set_color(Color::Black);
                self.rotate_left(parent);
                node = self.root;
                parent = None;
            } else {
                let mut sibling = parent.left();
                if sibling.is_red() {
                    /* Case 1 - right rotate at parent */
                    sibling.set_color(Color::Black);
                    parent.set_color(Color::Red);
                    self.rotate_right(parent);
                    sibling = parent.left();
                }
                if sibling.left().is_black() && sibling.right().is_black() {
                    /* Case 2 - sibling color flip */
                    sibling.set_color(Color::Red);
                    node = parent;
                    parent = node.parent();
                    continue;
                }
                if sibling.left().is_black() {
                    /* Case 3 - left rotate at sibling */
                    sibling.right().set_color(Color::Black);
                    sibling.set_color(Color::Red);
                    self.rotate_left(sibling);
                    sibling = parent.left();
                }
                /* Case 4 - right rotate at parent + color flips */
                sibling.set_color(parent.color());
                parent.set_color(Color::Black);
                sibling.left().set_color(Color::Black);
                self.rotate_right(parent);
                node = self.root;
                parent = None;
            }
        }
        node.set_color(Color::Black);
    }

    /// ```text
    ///     x               y
    ///    / \             / \
    ///   a   y    -->    x   c
    ///      / \         / \
    ///     b   c       a   b
    /// ```
    /// `x.right` must be present.
    pub(crate) fn rotate_left(&mut self, x: NodePtr<K, V>) {
        let y = x.right();
        debug_assert!(y.is_some(), "rotate_left without a right child");
        let b = y.left();
        x.set_right(b);
        b.set_parent(x);
        let parent = x.parent();
        y.set_parent(parent);
        self.change_child(x, y, parent);
        y.set_left(x);
        x.set_parent(y);
    }

    /// Mirror of [`Self::rotate_left`]; `x.left` must be present.
    pub(crate) fn rotate_right(&mut self, x: NodePtr<K, V>) {
        let y = x.left();
        debug_assert!(y.is_some(), "rotate_right without a left child");
        let b = y.right();
        x.set_left(b);
        b.set_parent(x);
        let parent = x.parent();
        y.set_parent(parent);
        self.change_child(x, y, parent);
        y.set_right(x);
        x.set_parent(y);
    }

    fn change_child(&mut self, old: NodePtr<K, V>, new: NodePtr<K, V>, parent: NodePtr<K, V>) {
        if parent.is_some() {
            if parent.left() == old {
                parent.set_left(new);
            } else {
                parent.set_right(new);
            }
        } else {
            self.root = new;
        }
    }

    pub(crate) fn minimum(mut node: NodePtr<K, V>) -> NodePtr<K, V> {
        while node.left().is_some() {
            node = node.left();
        }
        node
    }

    pub(crate) fn maximum(mut node: NodePtr<K, V>) -> NodePtr<K, V> {
        while node.right().is_some() {
            node = node.right();
        }
        node
    }
}
