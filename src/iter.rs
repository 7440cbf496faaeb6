use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::{node::Node, AvlTree};

/// An iterator over the elements of an [`AvlTree`] in ascending order.
///
/// Nodes have no parent pointers, so the iterator keeps the path of ancestors whose value has not
/// yet been yielded. The path is never longer than the height of the tree.
pub struct Iter<'tree, T> {
    // Top of the stack is the next node to yield.
    stack: Vec<&'tree Node<T>>,

    len: usize,
}

impl<'tree, T> Iter<'tree, T> {
    pub(crate) fn new(tree: &'tree AvlTree<T>) -> Self {
        let mut iter = Iter {
            stack: Vec::with_capacity(tree.height()),
            len: tree.len(),
        };

        iter.push_left_spine(tree.root.as_deref());
        iter
    }

    // Upon entering a new subtree, walk down to its minimum element.
    fn push_left_spine(&mut self, mut opt_cur: Option<&'tree Node<T>>) {
        while let Some(cur) = opt_cur {
            self.stack.push(cur);
            opt_cur = cur.left.as_deref();
        }
    }
}

impl<'tree, T> Iterator for Iter<'tree, T> {
    type Item = &'tree T;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.stack.pop()?;

        // The left subtree of `cur` has been exhausted. Its successor is the minimum of its right
        // subtree, or else the nearest ancestor still on the stack.
        self.push_left_spine(cur.right.as_deref());
        self.len -= 1;

        Some(&cur.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            stack: self.stack.clone(),
            len: self.len,
        }
    }
}
