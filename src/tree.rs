use std::{borrow::Borrow, cell::Cell, cmp::Ordering::*, marker::PhantomData, ptr::NonNull};

use crate::{
    Color, Config, Error, Node, NodePtr, NodePtrExt, Result, Tree, alloc::free_subtree,
    root::ComingFrom,
};

impl<K, V> Drop for Tree<K, V> {
    fn drop(&mut self) {
        // SAFETY: the tree owns the whole graph hanging from root.
        unsafe { free_subtree(self.root.take()) };
    }
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Tree<K, V> {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Tree {
            root: None,
            len: 0,
            last_found: Cell::new(None),
            config,
            _marker: PhantomData,
        }
    }

    pub const fn config(&self) -> Config {
        self.config
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn root(&self) -> Option<&Node<K, V>> {
        self.root.map(|r| unsafe { r.as_ref() })
    }

    pub fn clear(&mut self) {
        self.last_found.set(None);
        self.len = 0;
        // SAFETY: the graph is detached from self before being freed.
        unsafe { free_subtree(self.root.take()) };
    }

    /// The entry with the smallest key, or `None` on an empty tree.
    pub fn first(&self) -> Option<&Node<K, V>> {
        Self::minimum(self.root).map(|n| unsafe { n.as_ref() })
    }

    /// The entry with the largest key, or `None` on an empty tree.
    pub fn last(&self) -> Option<&Node<K, V>> {
        Self::maximum(self.root).map(|n| unsafe { n.as_ref() })
    }

    /// # Errors
    ///
    /// [`Error::EmptyTree`] when there is nothing to return.
    pub fn min(&self) -> Result<&Node<K, V>> {
        self.first().ok_or(Error::EmptyTree)
    }

    /// # Errors
    ///
    /// [`Error::EmptyTree`] when there is nothing to return.
    pub fn max(&self) -> Result<&Node<K, V>> {
        self.last().ok_or(Error::EmptyTree)
    }

    pub fn min_key(&self) -> Result<&K> {
        self.min().map(Node::key)
    }

    pub fn max_key(&self) -> Result<&K> {
        self.max().map(Node::key)
    }

    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let first = Self::minimum(self.root)?;
        Some(self.erase(first))
    }

    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let last = Self::maximum(self.root)?;
        Some(self.erase(last))
    }

    /// # Errors
    ///
    /// [`Error::EmptyTree`] on an empty tree.
    pub fn remove_min(&mut self) -> Result<(K, V)> {
        self.pop_first().ok_or(Error::EmptyTree)
    }

    /// # Errors
    ///
    /// [`Error::EmptyTree`] on an empty tree.
    pub fn remove_max(&mut self) -> Result<(K, V)> {
        self.pop_last().ok_or(Error::EmptyTree)
    }

    pub fn first_mut(&mut self) -> Option<NodeEntry<'_, K, V>> {
        let node = Self::minimum(self.root)?;
        Some(NodeEntry { tree: self, node })
    }

    pub fn last_mut(&mut self) -> Option<NodeEntry<'_, K, V>> {
        let node = Self::maximum(self.root)?;
        Some(NodeEntry { tree: self, node })
    }

    /// Full scan: true when any entry holds `value`, whatever its key.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|v| v == value)
    }
}

impl<K, V> Tree<K, V> {
    /// Adds an entry. Never replaces: an equal key yields a second entry.
    pub fn insert(&mut self, key: K, value: V)
    where
        K: Ord,
    {
        let mut parent = None;
        let mut direction = ComingFrom::Left;
        let mut link = self.root;
        while let Some(candidate) = link {
            parent = link;
            let candidate = unsafe { candidate.as_ref() };
            match key.cmp(&candidate.key) {
                Less => {
                    direction = ComingFrom::Left;
                    link = candidate.left;
                }
                Greater => {
                    direction = ComingFrom::Right;
                    link = candidate.right;
                }
                // Equal keys hang off the first free slot, right first. A full
                // node is passed as if the new key were greater.
                Equal => {
                    if candidate.right.is_none() {
                        direction = ComingFrom::Right;
                        link = None;
                    } else if candidate.left.is_none() {
                        direction = ComingFrom::Left;
                        link = None;
                    } else {
                        direction = ComingFrom::Right;
                        link = candidate.right;
                    }
                }
            }
        }

        let node = self.link(key, value, parent, direction);
        self.last_found.set(Some(node));
    }

    /// Returns some node whose key equals `key`.
    ///
    /// With several equal entries, which one comes back is unspecified and
    /// may change between calls.
    pub fn search<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        self.locate(key).map(|n| unsafe { n.as_ref() })
    }

    /// Returns the node whose key equals `key` and whose value equals `value`.
    pub fn search_entry<Q>(&self, key: &Q, value: &V) -> Option<&Node<K, V>>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
        V: PartialEq,
    {
        self.locate_entry(key, value).map(|n| unsafe { n.as_ref() })
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        self.locate(key).is_some()
    }

    pub fn contains_entry<Q>(&self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
        V: PartialEq,
    {
        self.locate_entry(key, value).is_some()
    }

    /// Removes some entry whose key equals `key`.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let node = self.locate(key)?;
        Some(self.erase(node))
    }

    /// Removes the entry matching both `key` and `value`, leaving the other
    /// members of the key's cluster alone.
    pub fn remove_entry<Q>(&mut self, key: &Q, value: &V) -> Option<(K, V)>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
        V: PartialEq,
    {
        let node = self.locate_entry(key, value)?;
        Some(self.erase(node))
    }

    pub fn find_mut<Q>(&mut self, key: &Q) -> Option<NodeEntry<'_, K, V>>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let node = self.locate(key)?;
        Some(NodeEntry { tree: self, node })
    }

    pub fn find_entry_mut<Q>(&mut self, key: &Q, value: &V) -> Option<NodeEntry<'_, K, V>>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
        V: PartialEq,
    {
        let node = self.locate_entry(key, value)?;
        Some(NodeEntry { tree: self, node })
    }

    fn locate<Q>(&self, key: &Q) -> NodePtr<K, V>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        if self.config.search_cache {
            if let Some(hit) = self.cached(key) {
                return Some(hit);
            }
        }
        let found = self.descend(key);
        if self.config.search_cache && found.is_some() {
            self.last_found.set(found);
        }
        found
    }

    /// Serves a repeated lookup from the last node found: climb the chain of
    /// ancestors sharing its key and answer with the topmost one.
    fn cached<Q>(&self, key: &Q) -> NodePtr<K, V>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let mut hit = self.last_found.get()?;
        if key.cmp(unsafe { hit.as_ref() }.key.borrow()) != Equal {
            return None;
        }
        while let Some(parent) = unsafe { hit.as_ref() }.parent {
            if key.cmp(unsafe { parent.as_ref() }.key.borrow()) != Equal {
                break;
            }
            hit = parent;
        }
        Some(hit)
    }

    /// Plain descent; stops at the first equal node, which is the topmost
    /// member of the key's range on the search path.
    fn descend<Q>(&self, key: &Q) -> NodePtr<K, V>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let mut node = self.root;
        while let Some(candidate) = node {
            let candidate = unsafe { candidate.as_ref() };
            match key.cmp(candidate.key.borrow()) {
                Equal => break,
                Greater => node = candidate.right,
                Less => node = candidate.left,
            }
        }
        node
    }

    fn locate_entry<Q>(&self, key: &Q, value: &V) -> NodePtr<K, V>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
        V: PartialEq,
    {
        Self::scan_cluster(self.descend(key), key, &mut |n: &Node<K, V>| {
            n.value == *value
        })
    }

    /// Walks the range of nodes equal to `key` under `node`. Equal entries
    /// may sit on either side of an equal node, so both are visited.
    fn scan_cluster<Q, F>(node: NodePtr<K, V>, key: &Q, matches: &mut F) -> NodePtr<K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        F: FnMut(&Node<K, V>) -> bool,
    {
        let candidate = unsafe { node?.as_ref() };
        match key.cmp(candidate.key.borrow()) {
            Less => Self::scan_cluster(candidate.left, key, matches),
            Greater => Self::scan_cluster(candidate.right, key, matches),
            Equal => {
                if matches(candidate) {
                    return node;
                }
                Self::scan_cluster(candidate.left, key, matches)
                    .or_else(|| Self::scan_cluster(candidate.right, key, matches))
            }
        }
    }
}

/// A node of a mutably borrowed tree, able to delete exactly itself.
pub struct NodeEntry<'a, K, V> {
    tree: &'a mut Tree<K, V>,
    node: NonNull<Node<K, V>>,
}

impl<'a, K, V> NodeEntry<'a, K, V> {
    pub fn key(&self) -> &K {
        &unsafe { self.node.as_ref() }.key
    }

    pub fn value(&self) -> &V {
        &unsafe { self.node.as_ref() }.value
    }

    pub fn color(&self) -> Color {
        unsafe { self.node.as_ref() }.color
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut unsafe { self.node.as_mut() }.value
    }

    pub fn into_value_mut(mut self) -> &'a mut V {
        &mut unsafe { self.node.as_mut() }.value
    }

    /// Removes this node from the tree and returns its entry.
    pub fn delete(self) -> (K, V) {
        self.tree.erase(self.node)
    }
}

impl<K, V> Tree<K, V> {
    /// Height of the tree in nodes, 0 when empty.
    pub fn height(&self) -> usize {
        fn height<K, V>(node: NodePtr<K, V>) -> usize {
            match node {
                None => 0,
                Some(_) => 1 + height(node.left()).max(height(node.right())),
            }
        }
        height(self.root)
    }
}
