//! An owned AVL tree.
#![no_std]

// Conventions used in comments:
// - The height of an empty subtree is 0 and the height of a leaf is 1.
// - The balance of a node is `height(left) - height(right)`.
// - A node is `x`-heavy if its `x` subtree is two levels taller than the other one.
//
// The invariants of the tree are:
// 1. An in-order walk visits values in non-decreasing order. Values less than a node are in its
//    left subtree and values greater than it are in its right subtree. Values equal to a node are
//    inserted to its right, but a later rotation may lift one of them above it.
// 2. Every node has a balance of -1, 0 or 1.
// 3. Every node caches its own height.
//
// Corollary:
// 4. The height of a tree with `n` nodes is less than `1.45 * log2(n + 2)`, so recursing from the
//    root is bounded by the height and never needs an explicit stack.
//
// Every subtree is exclusively owned by its parent and nodes carry no parent pointer. A mutation
// takes ownership of a subtree and hands back its (possibly different) root, which the caller links
// in place of the old one.

extern crate alloc;
#[cfg(any(test, feature = "model"))]
extern crate std;

use alloc::boxed::Box;
use core::{borrow::Borrow, cmp::Ordering, fmt, mem};

mod debug;
mod error;
mod iter;
pub mod map;
mod node;
pub mod set;

#[cfg(any(test, feature = "model"))]
pub mod model;


pub use error::InvariantError;
pub use iter::Iter;
pub use map::AvlMap;
pub use set::AvlSet;

use node::{Dir, Link, Node};

/// A height-balanced binary search tree.
///
/// Unlike a set, the tree keeps every inserted value: inserting a value that is already present
/// adds another node holding it.
///
/// All mutations and lookups complete in _O(log(n))_ time.
#[derive(Clone)]
pub struct AvlTree<T> {
    root: Link<T>,
    len: usize,
}

// How an insertion changed the height of the subtree it went into.
enum Growth {
    // The height is unchanged, so no ancestor needs to be rechecked.
    Settled,
    // The height grew by one. Holds the side of the subtree root that the new node went into, or
    // `None` if the subtree root is the new node.
    Grew(Option<Dir>),
}

impl<T> AvlTree<T> {
    /// Returns a new empty tree.
    pub const fn new() -> AvlTree<T> {
        AvlTree { root: None, len: 0 }
    }

    /// Returns `true` if the tree contains no elements.
    pub const fn is_empty(&self) -> bool {
        let empty = self.len() == 0;

        if cfg!(debug_assertions) {
            // Can't use assert_eq!() in const fn.
            assert!(empty == self.root.is_none());
        }

        empty
    }

    /// Returns the number of elements in the tree, counting duplicates individually.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the height of the tree, which is 0 for an empty tree and 1 for a single element.
    pub fn height(&self) -> usize {
        node::height(&self.root) as usize
    }

    /// Returns a reference to the value at the root of the tree.
    pub fn root(&self) -> Option<&T> {
        self.root.as_ref().map(|root| &root.value)
    }

    /// Returns the minimum element of the tree.
    pub fn first(&self) -> Option<&T> {
        let mut cur = self.root.as_deref()?;

        while let Some(left) = cur.left.as_deref() {
            cur = left;
        }

        Some(&cur.value)
    }

    /// Returns the maximum element of the tree.
    pub fn last(&self) -> Option<&T> {
        let mut cur = self.root.as_deref()?;

        while let Some(right) = cur.right.as_deref() {
            cur = right;
        }

        Some(&cur.value)
    }

    /// Calls `visit` on every element in ascending order.
    ///
    /// On an empty tree `visit` is never called.
    pub fn in_order<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        fn walk<T, F: FnMut(&T)>(link: &Link<T>, visit: &mut F) {
            let Some(node) = link else {
                return;
            };

            walk(&node.left, visit);
            visit(&node.value);
            walk(&node.right, visit);
        }

        walk(&self.root, &mut visit);
    }

    /// Returns an iterator over the elements of the tree in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Clears the tree, removing all elements.
    pub fn clear(&mut self) {
        tracing::trace!(len = self.len, "clearing tree");

        // Dropping recurses once per level, which the balance invariant keeps shallow.
        self.root = None;
        self.len = 0;
    }

    // Returns the element `cmp` reports as `Ordering::Equal`.
    //
    // `cmp` orders the target relative to the element it is given.
    pub(crate) fn find_by<F>(&self, mut cmp: F) -> Option<&T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut cur = self.root.as_deref();

        while let Some(node) = cur {
            match cmp(&node.value) {
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Equal => return Some(&node.value),
                Ordering::Greater => cur = node.right.as_deref(),
            }
        }

        None
    }

    // Like `find_by`, but returns a mutable reference.
    //
    // The caller must not change the element's position in the order.
    pub(crate) fn find_by_mut<F>(&mut self, mut cmp: F) -> Option<&mut T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut cur = self.root.as_deref_mut();

        while let Some(node) = cur {
            match cmp(&node.value) {
                Ordering::Less => cur = node.left.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
                Ordering::Greater => cur = node.right.as_deref_mut(),
            }
        }

        None
    }

    // Removes the first element `cmp` reports as `Ordering::Equal` on the way down from the root.
    pub(crate) fn remove_by<F>(&mut self, mut cmp: F) -> Option<T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let (root, removed) = Self::remove_at(self.root.take(), &mut cmp);
        self.root = root;

        if removed.is_some() {
            self.len -= 1;
        }

        removed
    }

    fn remove_at<F>(link: Link<T>, cmp: &mut F) -> (Link<T>, Option<T>)
    where
        F: FnMut(&T) -> Ordering,
    {
        let Some(mut node) = link else {
            return (None, None);
        };

        let removed = match cmp(&node.value) {
            Ordering::Less => {
                let (left, removed) = Self::remove_at(node.left.take(), cmp);
                node.left = left;
                removed
            }

            Ordering::Greater => {
                let (right, removed) = Self::remove_at(node.right.take(), cmp);
                node.right = right;
                removed
            }

            Ordering::Equal => match (node.left.take(), node.right.take()) {
                // At most one child: it takes the node's place, detaching the node.
                (None, only) | (only, None) => return (only, Some(node.value)),

                (Some(left), Some(right)) => {
                    // The in-order successor is the minimum of the right subtree. Its value moves
                    // into this node, which stays in place.
                    let (right, successor) = Self::remove_min(right);
                    node.left = Some(left);
                    node.right = right;

                    Some(mem::replace(&mut node.value, successor))
                }
            },
        };

        if removed.is_none() {
            // Nothing below changed.
            return (Some(node), None);
        }

        // Unlike insertion, a removal can unbalance every ancestor on the way up.
        node.update_height();
        (Some(node::rebalance_after_removal(node)), removed)
    }

    // Detaches the minimum node of the subtree rooted at `node`, returning the rebalanced remainder
    // and the minimum value.
    fn remove_min(mut node: Box<Node<T>>) -> (Link<T>, T) {
        match node.left.take() {
            None => {
                let Node { value, right, .. } = *node;
                (right, value)
            }

            Some(left) => {
                let (left, min) = Self::remove_min(left);
                node.left = left;
                node.update_height();

                (Some(node::rebalance_after_removal(node)), min)
            }
        }
    }
}

impl<T: Ord> AvlTree<T> {
    /// Inserts a value into the tree.
    ///
    /// The value is always added, even if an equal value is already present. Equal values are
    /// kept as separate elements.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn insert(&mut self, value: T) {
        let (root, _) = Self::insert_at(self.root.take(), value);
        self.root = Some(root);
        self.len += 1;
    }

    fn insert_at(link: Link<T>, value: T) -> (Box<Node<T>>, Growth) {
        let Some(mut node) = link else {
            return (Node::new(value), Growth::Grew(None));
        };

        // Ties go right.
        let dir = if value < node.value {
            Dir::Left
        } else {
            Dir::Right
        };

        let (child, growth) = Self::insert_at(node.child_mut(dir).take(), value);
        *node.child_mut(dir) = Some(child);

        let Growth::Grew(grew) = growth else {
            return (node, Growth::Settled);
        };

        let old_height = node.height;
        node.update_height();

        if let Some(heavy) = node.heavy_side() {
            debug_assert_eq!(heavy, dir);

            let Some(grew) = grew else {
                unreachable!("a new leaf cannot unbalance its parent");
            };

            // A single (or double) rotation restores the subtree's height from before the
            // insertion, so nothing above needs to be rechecked.
            return (node::rebalance_inserted(node, heavy, grew), Growth::Settled);
        }

        if node.height == old_height {
            (node, Growth::Settled)
        } else {
            (node, Growth::Grew(Some(dir)))
        }
    }

    /// Removes one element equal to `value` from the tree, if there is one.
    ///
    /// Removing a value that is not present leaves the tree unchanged.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn delete<Q>(&mut self, value: &Q)
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove(value);
    }

    /// Removes one element equal to `value` from the tree and returns it.
    ///
    /// If several elements are equal to `value`, the one closest to the root is removed.
    pub fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_by(|cur| value.cmp(cur.borrow()))
    }

    /// Returns `true` if the tree contains an element equal to `value`.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(value).is_some()
    }

    /// Returns a reference to an element equal to `value`.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_by(|cur| value.cmp(cur.borrow()))
    }

    /// Checks the ordering, balance and height invariants of every node.
    pub fn validate(&self) -> Result<(), InvariantError> {
        fn validate_at<'a, T: Ord>(
            link: &'a Link<T>,
            prev: &mut Option<&'a T>,
            counted: &mut usize,
        ) -> Result<i8, InvariantError> {
            let Some(node) = link else {
                return Ok(0);
            };

            let left = validate_at(&node.left, prev, counted)?;

            if matches!(*prev, Some(prev) if *prev > node.value) {
                return Err(InvariantError::OutOfOrder);
            }
            *prev = Some(&node.value);
            *counted += 1;

            let right = validate_at(&node.right, prev, counted)?;

            if (left - right).abs() > 1 {
                return Err(InvariantError::Unbalanced { left, right });
            }

            let computed = 1 + left.max(right);
            if node.height != computed {
                return Err(InvariantError::StaleHeight {
                    cached: node.height,
                    computed,
                });
            }

            Ok(computed)
        }

        let mut counted = 0;
        validate_at(&self.root, &mut None, &mut counted)?;

        if counted != self.len {
            return Err(InvariantError::LenMismatch {
                len: self.len,
                counted,
            });
        }

        Ok(())
    }

    #[doc(hidden)]
    #[track_caller]
    pub fn assert_invariants(&self) {
        if let Err(error) = self.validate() {
            panic!("tree invariant violated: {error}");
        }
    }
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        AvlTree::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'tree, T> IntoIterator for &'tree AvlTree<T> {
    type Item = &'tree T;
    type IntoIter = Iter<'tree, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
