//! Persisting a tree through an injected stream.
//!
//! The tree only knows that it writes its entry count followed by its root
//! subtree as one nested unit (or an empty marker). How a node becomes bytes
//! is up to the stream.

use tracing::debug;

use crate::{
    Color, Config, Error, Node, NodePtr, NodePtrExt, Result, Tree, Violation,
    alloc::leak_alloc_node, root::ComingFrom,
};

/// An owned node with its whole subtree, as read back from a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Subtree<K, V> {
    pub key: K,
    pub value: V,
    pub color: Color,
    pub left: Option<Box<Subtree<K, V>>>,
    pub right: Option<Box<Subtree<K, V>>>,
}

impl<K: Clone, V: Clone> Subtree<K, V> {
    /// Deep copy of `node` and everything below it.
    pub fn from_node(node: &Node<K, V>) -> Self {
        let child = |link: NodePtr<K, V>| {
            link.map(|n| Box::new(Subtree::from_node(unsafe { n.as_ref() })))
        };
        Subtree {
            key: node.key.clone(),
            value: node.value.clone(),
            color: node.color,
            left: child(node.left),
            right: child(node.right),
        }
    }
}

pub trait SubtreeWriter<K, V> {
    fn write_count(&mut self, count: u32) -> Result<()>;
    /// `None` stands for an empty tree.
    fn write_subtree(&mut self, root: Option<&Node<K, V>>) -> Result<()>;
}

pub trait SubtreeReader<K, V> {
    fn read_count(&mut self) -> Result<u32>;
    fn read_subtree(&mut self) -> Result<Option<Subtree<K, V>>>;
}

impl<K, V> Tree<K, V> {
    /// Writes the entry count, then the root subtree.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] when the count does not fit in 32 bits, and
    /// whatever the writer reports.
    pub fn serialize<W: SubtreeWriter<K, V>>(&self, writer: &mut W) -> Result<()> {
        let count = u32::try_from(self.len).map_err(|_| {
            Error::InvalidArgument(format!("{} entries exceed a 32-bit count", self.len))
        })?;
        writer.write_count(count)?;
        writer.write_subtree(self.root())
    }
}

impl<K: Ord, V> Tree<K, V> {
    /// Rebuilds a tree written by [`Tree::serialize`], keeping the stored
    /// shape and colors.
    ///
    /// # Errors
    ///
    /// [`Error::Corrupted`] when the stored shape is not a valid red-black
    /// tree or disagrees with the stored count; reader errors otherwise.
    pub fn deserialize<R: SubtreeReader<K, V>>(reader: &mut R) -> Result<Self> {
        Self::deserialize_with_config(reader, Default::default())
    }

    pub fn deserialize_with_config<R: SubtreeReader<K, V>>(
        reader: &mut R,
        config: Config,
    ) -> Result<Self> {
        let count = reader.read_count()?;
        let subtree = reader.read_subtree()?;

        let mut tree = Tree::with_config(config);
        let (nodes, depth) = match subtree {
            Some(subtree) => tree.attach(subtree),
            None => (0, 0),
        };
        tree.len = count as usize;
        // A bad tree is dropped on return, which frees whatever was attached.
        // Depth goes first so that the recursive check only sees shallow
        // graphs.
        let limit = Self::depth_limit(nodes);
        if depth > limit {
            return Err(Violation::TooDeep {
                depth,
                limit,
                nodes,
            }
            .into());
        }
        tree.check()?;
        debug!(count, depth, "rebuilt tree from stream");
        Ok(tree)
    }

    /// A red-black tree of `n` nodes is at most `2 * log2(n + 1)` levels deep.
    fn depth_limit(nodes: usize) -> usize {
        2 * (usize::BITS - nodes.leading_zeros()) as usize
    }

    /// Links `subtree` in as the root of this empty tree, without recursion,
    /// consuming it as it goes. Returns the node count and the depth reached.
    fn attach(&mut self, subtree: Subtree<K, V>) -> (usize, usize) {
        let mut nodes = 0;
        let mut deepest = 0;
        let mut pending = vec![(subtree, None, ComingFrom::Left, 1)];
        while let Some((subtree, parent, side, depth)) = pending.pop() {
            let Subtree {
                key,
                value,
                color,
                left,
                right,
            } = subtree;
            // SAFETY: linked into the tree under construction, which owns it.
            let node = Some(unsafe { leak_alloc_node(key, value) });
            node.set_color(color);
            node.set_parent(parent);
            match (parent, side) {
                (None, _) => self.root = node,
                (Some(_), ComingFrom::Left) => parent.set_left(node),
                (Some(_), ComingFrom::Right) => parent.set_right(node),
            }
            nodes += 1;
            deepest = deepest.max(depth);
            if let Some(left) = left {
                pending.push((*left, node, ComingFrom::Left, depth + 1));
            }
            if let Some(right) = right {
                pending.push((*right, node, ComingFrom::Right, depth + 1));
            }
        }
        (nodes, deepest)
    }
}

/// A [`SubtreeWriter`]/[`SubtreeReader`] over any byte stream, encoding with
/// `bincode`.
///
/// ```
/// use grappe::{BincodeStream, Tree};
///
/// let tree: Tree<u32, String> = (0..10).map(|k| (k, k.to_string())).collect();
/// let mut bytes = Vec::new();
/// tree.serialize(&mut BincodeStream::new(&mut bytes)).unwrap();
///
/// let copy: Tree<u32, String> =
///     Tree::deserialize(&mut BincodeStream::new(bytes.as_slice())).unwrap();
/// assert!(copy.iter().eq(tree.iter()));
/// ```
#[cfg(feature = "serde")]
pub struct BincodeStream<S> {
    inner: S,
}

#[cfg(feature = "serde")]
mod bincode_stream {
    use std::io::{Read, Write};

    use serde::{Serialize, Serializer, de::DeserializeOwned, ser::SerializeStruct};

    use super::{BincodeStream, Subtree, SubtreeReader, SubtreeWriter};
    use crate::{Node, Result};

    impl<S> BincodeStream<S> {
        pub fn new(inner: S) -> Self {
            BincodeStream { inner }
        }

        pub fn into_inner(self) -> S {
            self.inner
        }
    }

    /// Borrowed view of a node serialized with the same layout as
    /// [`Subtree`], so that writing never clones entries.
    struct View<'a, K, V>(&'a Node<K, V>);

    impl<K: Serialize, V: Serialize> Serialize for View<'_, K, V> {
        fn serialize<Ser: Serializer>(
            &self,
            serializer: Ser,
        ) -> std::result::Result<Ser::Ok, Ser::Error> {
            let node = self.0;
            let child = |link: crate::NodePtr<K, V>| link.map(|n| View(unsafe { n.as_ref() }));
            let mut state = serializer.serialize_struct("Subtree", 5)?;
            state.serialize_field("key", &node.key)?;
            state.serialize_field("value", &node.value)?;
            state.serialize_field("color", &node.color)?;
            state.serialize_field("left", &child(node.left))?;
            state.serialize_field("right", &child(node.right))?;
            state.end()
        }
    }

    impl<K: Serialize, V: Serialize, W: Write> SubtreeWriter<K, V> for BincodeStream<W> {
        fn write_count(&mut self, count: u32) -> Result<()> {
            bincode::serialize_into(&mut self.inner, &count)?;
            Ok(())
        }

        fn write_subtree(&mut self, root: Option<&Node<K, V>>) -> Result<()> {
            bincode::serialize_into(&mut self.inner, &root.map(View))?;
            Ok(())
        }
    }

    impl<K: DeserializeOwned, V: DeserializeOwned, R: Read> SubtreeReader<K, V>
        for BincodeStream<R>
    {
        fn read_count(&mut self) -> Result<u32> {
            Ok(bincode::deserialize_from(&mut self.inner)?)
        }

        fn read_subtree(&mut self) -> Result<Option<Subtree<K, V>>> {
            Ok(bincode::deserialize_from(&mut self.inner)?)
        }
    }
}
