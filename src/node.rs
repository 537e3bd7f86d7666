use std::fmt::Debug;

use super::{Color, Node, NodePtr};

// Public API.
impl<K, V> Node<K, V> {
    #[inline(always)]
    pub fn key(&self) -> &K {
        &self.key
    }

    #[inline(always)]
    pub fn value(&self) -> &V {
        &self.value
    }

    #[inline(always)]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline(always)]
    pub fn is_black(&self) -> bool {
        self.color == Color::Black
    }

    #[inline(always)]
    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    #[inline(always)]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// The in-order successor.
    #[inline(always)]
    pub(crate) fn next(&self) -> NodePtr<K, V> {
        // If we have a right-hand child, go down and then left as far as we
        // can.
        if let Some(mut current) = self.right {
            // SAFETY: links of a live node point to live nodes.
            while let Some(left) = unsafe { current.as_ref() }.left {
                current = left;
            }
            return Some(current);
        }
        // No right-hand children. Everything down and left is smaller than us,
        // so any 'next' node must be in the general direction of our parent.
        //
        // [1] Go up the tree
        //     [2] any time the ancestor is a right-hand child of its parent,
        //         keep going up.
        //     [3] First time it's a left-hand child of its parent, said
        //         parent is our 'next' node.
        let mut child: NodePtr<K, V> = self.into();
        let mut parent = self.parent;
        while let Some(candidate) = parent {
            // SAFETY: parent links of a live node point to live nodes.
            let candidate = unsafe { candidate.as_ref() };
            if candidate.right != child {
                break; // [3]
            }
            // [2]
            child = parent;
            parent = candidate.parent;
        }
        parent
    }

    /// The in-order predecessor.
    #[inline(always)]
    pub(crate) fn prev(&self) -> NodePtr<K, V> {
        if let Some(mut current) = self.left {
            // SAFETY: links of a live node point to live nodes.
            while let Some(right) = unsafe { current.as_ref() }.right {
                current = right;
            }
            return Some(current);
        }
        // Mirror of next: climb while we are a left-hand child.
        let mut child: NodePtr<K, V> = self.into();
        let mut parent = self.parent;
        while let Some(candidate) = parent {
            // SAFETY: parent links of a live node point to live nodes.
            let candidate = unsafe { candidate.as_ref() };
            if candidate.left != child {
                break;
            }
            child = parent;
            parent = candidate.parent;
        }
        parent
    }
}

impl<K, V> Debug for Node<K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{:?}::({:?},{:?})",
            self.color, self.key, self.value
        ))
    }
}

#[cfg(test)]
mod test {
    use std::ptr::NonNull;

    use super::*;

    // Links parent to child and sets the child's back-reference.
    macro_rules! link {
        ($parent:expr, $child:expr, left) => {
            $parent.left = Some(NonNull::from(&*$child));
            $child.parent = Some(NonNull::from(&*$parent));
        };
        ($parent:expr, $child:expr, right) => {
            $parent.right = Some(NonNull::from(&*$child));
            $child.parent = Some(NonNull::from(&*$parent));
        };
    }

    fn node(key: i32) -> Node<i32, &'static str> {
        Node {
            parent: None,
            left: None,
            right: None,
            color: Color::Black,
            key,
            value: "",
        }
    }

    fn key_of(ptr: NodePtr<i32, &'static str>) -> Option<i32> {
        ptr.map(|n| unsafe { n.as_ref() }.key)
    }

    #[test]
    fn single_node_has_no_neighbours() {
        let n = node(1);
        assert!(n.next().is_none());
        assert!(n.prev().is_none());
        assert!(n.is_root());
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn successor_and_predecessor() {
        //        7
        //      /   \
        //     3     10
        //    / \      \
        //   1   5      12
        let mut n7 = node(7);
        let mut n3 = node(3);
        let mut n10 = node(10);
        let mut n1 = node(1);
        let mut n5 = node(5);
        let mut n12 = node(12);

        link!(&mut n10, &mut n12, right);
        link!(&mut n3, &mut n1, left);
        link!(&mut n3, &mut n5, right);
        link!(&mut n7, &mut n3, left);
        link!(&mut n7, &mut n10, right);

        assert_eq!(Some(3), key_of(n1.next()));
        assert_eq!(Some(5), key_of(n3.next()));
        assert_eq!(Some(7), key_of(n5.next()));
        assert_eq!(Some(10), key_of(n7.next()));
        assert_eq!(Some(12), key_of(n10.next()));
        assert_eq!(None, key_of(n12.next()));

        assert_eq!(None, key_of(n1.prev()));
        assert_eq!(Some(1), key_of(n3.prev()));
        assert_eq!(Some(3), key_of(n5.prev()));
        assert_eq!(Some(5), key_of(n7.prev()));
        assert_eq!(Some(7), key_of(n10.prev()));
        assert_eq!(Some(10), key_of(n12.prev()));
    }

    #[test]
    fn debug_shows_color_key_and_value() {
        let mut n = node(4);
        n.value = "four";
        n.color = Color::Red;
        assert_eq!("Red::(4,\"four\")", format!("{n:?}"));
    }
}
