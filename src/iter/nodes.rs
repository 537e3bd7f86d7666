use std::{iter::FusedIterator, marker::PhantomData};

use crate::{Direction, Node, NodePtr, Tree};

/// Walks the nodes of a tree in key order.
///
/// The direction is fixed at construction; [`DoubleEndedIterator`] walks
/// from the opposite end.
pub struct Nodes<'a, K, V> {
    front: NodePtr<K, V>,
    back: NodePtr<K, V>,
    len: usize,
    direction: Direction,
    _phantom: PhantomData<&'a Node<K, V>>,
}

impl<K, V> Tree<K, V> {
    pub fn nodes(&self, direction: Direction) -> Nodes<'_, K, V> {
        Nodes {
            front: Self::minimum(self.root),
            back: Self::maximum(self.root),
            len: self.len,
            direction,
            _phantom: PhantomData,
        }
    }
}

impl<'a, K, V> Nodes<'a, K, V> {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn has_next(&self) -> bool {
        self.len > 0
    }

    fn pop_front(&mut self) -> Option<&'a Node<K, V>> {
        if self.len == 0 {
            return None;
        }
        let node = unsafe { self.front?.as_ref() };
        self.len -= 1;
        self.front = node.next();
        Some(node)
    }

    fn pop_back(&mut self) -> Option<&'a Node<K, V>> {
        if self.len == 0 {
            return None;
        }
        let node = unsafe { self.back?.as_ref() };
        self.len -= 1;
        self.back = node.prev();
        Some(node)
    }
}

impl<'a, K, V> Iterator for Nodes<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.direction {
            Direction::Ascending => self.pop_front(),
            Direction::Descending => self.pop_back(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K, V> DoubleEndedIterator for Nodes<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        match self.direction {
            Direction::Ascending => self.pop_back(),
            Direction::Descending => self.pop_front(),
        }
    }
}

impl<K, V> ExactSizeIterator for Nodes<'_, K, V> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<K, V> FusedIterator for Nodes<'_, K, V> {}

impl<K, V> Clone for Nodes<'_, K, V> {
    fn clone(&self) -> Self {
        Nodes {
            front: self.front,
            back: self.back,
            len: self.len,
            direction: self.direction,
            _phantom: PhantomData,
        }
    }
}
