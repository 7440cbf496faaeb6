use core::{borrow::Borrow, fmt};

use crate::{AvlTree, Iter};

/// An ordered set based on an [AVL tree].
///
/// Unlike [`AvlTree`], the set holds at most one element from each class of equal values.
///
/// [AVL tree]: https://en.wikipedia.org/wiki/AVL_tree
#[derive(Clone)]
pub struct AvlSet<T: Ord> {
    tree: AvlTree<T>,
}

impl<T: Ord> AvlSet<T> {
    /// Creates a new, empty `AvlSet`.
    pub const fn new() -> Self {
        Self {
            tree: AvlTree::new(),
        }
    }

    /// Returns `true` if the set contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the number of elements in the set.
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set contains an element equal to `value`.
    #[inline]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains(value)
    }

    /// Returns a reference to the element equal to `value`.
    #[inline]
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get(value)
    }

    /// Adds `value` to the set.
    ///
    /// Returns `false`, leaving the set unchanged, if an equal element was already present.
    pub fn insert(&mut self, value: T) -> bool {
        if self.tree.contains(&value) {
            return false;
        }

        self.tree.insert(value);
        true
    }

    /// Removes the element equal to `value`. Returns whether such an element was present.
    #[inline]
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(value).is_some()
    }

    /// Removes and returns the element equal to `value`.
    #[inline]
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(value)
    }

    /// Returns the minimum element of the set.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.tree.first()
    }

    /// Returns the maximum element of the set.
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.tree.last()
    }

    /// Returns an iterator over the elements of the set in ascending order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }

    /// Clears the set, removing all elements.
    #[inline]
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        self.tree.assert_invariants();
    }
}

impl<T: Ord> Default for AvlSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for AvlSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for AvlSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = AvlSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for AvlSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'set, T: Ord> IntoIterator for &'set AvlSet<T> {
    type Item = &'set T;
    type IntoIter = Iter<'set, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::{prelude::v1::*, vec};

    use super::*;

    #[test]
    fn insert_rejects_duplicates() {
        let mut set = AvlSet::new();

        assert!(set.insert(3));
        assert!(set.insert(1));
        assert!(!set.insert(3));
        assert!(set.insert(2));
        set.assert_invariants();

        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn remove_reports_presence() {
        let mut set: AvlSet<u32> = (0..10).collect();

        assert!(set.remove(&4));
        assert!(!set.remove(&4));
        assert!(!set.contains(&4));
        assert_eq!(set.take(&5), Some(5));
        set.assert_invariants();

        assert_eq!(set.len(), 8);
        assert_eq!(set.first(), Some(&0));
        assert_eq!(set.last(), Some(&9));
    }

    #[test]
    fn borrowed_lookup() {
        let set: AvlSet<String> = ["pear", "apple", "fig"].into_iter().map(String::from).collect();

        assert!(set.contains("fig"));
        assert_eq!(set.get("apple").map(String::as_str), Some("apple"));
        assert!(!set.contains("plum"));
    }
}
