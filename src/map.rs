//! Dictionary-style helpers layered on the tree.

use std::{borrow::Borrow, fmt::Debug, ops::Index};

use crate::{Error, Node, Result, Tree};

impl<K, V> Tree<K, V> {
    /// The value of some entry keyed `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] when no entry has that key.
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        self.try_get(key).ok_or(Error::KeyNotFound)
    }

    pub fn try_get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        self.search(key).map(Node::value)
    }

    /// Same as [`Tree::insert`]: never updates an existing entry in place.
    pub fn set(&mut self, key: K, value: V)
    where
        K: Ord,
    {
        self.insert(key, value);
    }

    /// Clones every entry, in key order, into `buffer` starting at `offset`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] when `buffer[offset..]` is shorter than the
    /// tree.
    pub fn copy_to(&self, buffer: &mut [(K, V)], offset: usize) -> Result<()>
    where
        K: Clone,
        V: Clone,
    {
        let end = offset
            .checked_add(self.len)
            .filter(|&end| end <= buffer.len())
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "{} entries do not fit at offset {offset} of a buffer of {}",
                    self.len,
                    buffer.len()
                ))
            })?;
        for (slot, (key, value)) in buffer[offset..end].iter_mut().zip(self.iter()) {
            *slot = (key.clone(), value.clone());
        }
        Ok(())
    }
}

impl<K, Q: ?Sized, V> Index<&Q> for Tree<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord,
{
    type Output = V;

    /// Returns a reference to the value of some entry keyed `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `Tree`.
    #[inline]
    fn index(&self, key: &Q) -> &V {
        self.try_get(key).expect("no entry found for key")
    }
}

impl<K: Debug, V: Debug> Debug for Tree<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
