use std::iter::FusedIterator;

use crate::{Direction, Nodes, Tree};

impl<K, V> Tree<K, V> {
    /// Gets an iterator over the entries of the tree, sorted by key. Entries
    /// sharing a key come out next to each other.
    ///
    /// # Examples
    ///
    /// ```
    /// use grappe::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2, "b");
    /// tree.insert(1, "a");
    ///
    /// let entries: Vec<_> = tree.iter().collect();
    /// assert_eq!(entries, [(&1, &"a"), (&2, &"b")]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.nodes(Direction::Ascending),
        }
    }

    /// Gets an iterator over the keys of the tree, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the tree, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use grappe::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, "hello");
    /// tree.insert(2, "goodbye");
    ///
    /// let values: Vec<&str> = tree.values().cloned().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        self.values_in(Direction::Ascending)
    }

    pub fn values_in(&self, direction: Direction) -> Values<'_, K, V> {
        Values {
            inner: Iter {
                inner: self.nodes(direction),
            },
        }
    }
}

#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    inner: Nodes<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|n| (&n.key, &n.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|n| (&n.key, &n.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a Tree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<&'a K> {
        self.next_back()
    }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<&'a V> {
        self.next_back()
    }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

/// Owning iterator, drains the tree from both ends.
pub struct IntoIter<K, V>(Tree<K, V>);

impl<K, V> IntoIterator for Tree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the tree, sorted by key.
    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter(self)
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.0.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }

    fn last(mut self) -> Option<(K, V)> {
        self.next_back()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.0.pop_last()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.0.len
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: Ord, V> FromIterator<(K, V)> for Tree<K, V> {
    /// Builds a tree from key-value pairs. Equal keys all stay.
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Tree<K, V> {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for Tree<K, V> {
    #[inline]
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        iter.into_iter().for_each(move |(k, v)| {
            self.insert(k, v);
        });
    }
}

impl<'a, K: Ord + Copy, V: Copy> Extend<(&'a K, &'a V)> for Tree<K, V> {
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

#[cfg(test)]
mod test {
    use crate::{Direction, Tree};
    use pretty_assertions::assert_eq;

    #[test]
    fn extend() {
        let mut tree = Tree::new();
        let zero = "zero".to_string();
        let one = "one".to_string();
        let forty_two = "forty_two".to_string();
        let hundo = "hundo".to_string();

        tree.insert(100, hundo.clone());
        tree.insert(0, zero.clone());
        tree.insert(42, forty_two.clone());
        tree.extend(vec![(1, one.clone()), (42, "again".to_string())]);

        assert_eq!(5, tree.len());
        let mut iter = tree.iter();
        assert_eq!(Some((&0, &zero)), iter.next());
        assert_eq!(Some((&1, &one)), iter.next());
        assert_eq!(Some(&42), iter.next().map(|(k, _)| k));
        assert_eq!(Some(&42), iter.next().map(|(k, _)| k));
        assert_eq!(Some((&100, &hundo)), iter.next());
        assert_eq!(None, iter.next());
    }

    #[test]
    fn extend_by_ref() {
        let source: Tree<i32, i32> = (0..4).map(|x| (x, x * 10)).collect();
        let mut target: Tree<i32, i32> = Tree::new();
        target.extend(&source);
        assert!(target.iter().eq(source.iter()));
    }

    #[test]
    fn for_loop() {
        let mut tree = Tree::new();
        tree.insert(100, "hundo".to_string());
        tree.insert(0, "zero".to_string());

        for (k, _v) in &tree {
            // This is a test for compilation.
            let _ = k;
        }

        for (_k, v) in tree {
            // This is a test for compilation.
            let _ = v;
        }
    }

    #[test]
    fn into_iter_empty() {
        let tree = Tree::<usize, ()>::new();
        let vec = tree.into_iter().collect::<Vec<_>>();
        assert_eq!(0, vec.len());
    }

    #[test]
    fn into_iter_both_ends() {
        let tree: Tree<i32, char> = [(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
        let mut iter = tree.into_iter();
        assert_eq!(3, iter.len());
        assert_eq!(Some((1, 'a')), iter.next());
        assert_eq!(Some((3, 'c')), iter.next_back());
        assert_eq!(Some((2, 'b')), iter.next());
        assert_eq!(None, iter.next());
    }

    #[test]
    fn iter() {
        let mut tree = Tree::new();
        for i in 0..128 {
            tree.insert(i, ());
        }
        let mut iter = tree.iter();
        for i in 0..128 {
            assert_eq!(Some((&i, &())), iter.next());
        }
        assert_eq!(None, iter.next());
        assert_eq!(None, iter.next());
    }

    #[test]
    fn iter_rev_insert() {
        let mut tree = Tree::new();
        for i in (0..128).rev() {
            tree.insert(i, ());
        }
        let mut iter = tree.iter().rev();
        for i in (0..128).rev() {
            assert_eq!(Some((&i, &())), iter.next());
        }
        assert_eq!(None, iter.next());
    }

    #[test]
    fn keys_and_values() {
        let tree: Tree<i32, i32> = (0..8).map(|x| (x, x * 10)).collect();
        assert_eq!(vec![0, 1, 2, 3, 4, 5, 6, 7], tree.keys().copied().collect::<Vec<_>>());
        assert_eq!(Some(&7), tree.keys().last());
        assert_eq!(
            vec![70, 60, 50, 40, 30, 20, 10, 0],
            tree.values_in(Direction::Descending)
                .copied()
                .collect::<Vec<_>>()
        );
        assert_eq!(8, tree.values().len());
    }
}
