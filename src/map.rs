use core::{borrow::Borrow, cmp::Ordering, fmt, mem};

use crate::AvlTree;

/// An ordered map based on an [AVL tree].
///
/// [AVL tree]: https://en.wikipedia.org/wiki/AVL_tree
#[derive(Clone)]
pub struct AvlMap<K: Ord, V> {
    tree: AvlTree<MapEntry<K, V>>,
}

// Entries compare by key alone.
#[derive(Clone)]
struct MapEntry<K, V> {
    key: K,
    value: V,
}

impl<K: Ord, V> PartialEq for MapEntry<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Ord, V> Eq for MapEntry<K, V> {}

impl<K: Ord, V> PartialOrd for MapEntry<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, V> Ord for MapEntry<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<K: Ord, V> AvlMap<K, V> {
    /// Creates a new, empty `AvlMap`.
    pub const fn new() -> Self {
        Self {
            tree: AvlTree::new(),
        }
    }

    /// Returns `true` if the map contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the number of elements in the map.
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map contains a value associated with `key`.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns a reference to the value associated with `key`.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree
            .find_by(|entry| key.cmp(entry.key.borrow()))
            .map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value associated with `key`.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        // Only the value is handed out, so the entry keeps its place in the order.
        self.tree
            .find_by_mut(|entry| key.cmp(entry.key.borrow()))
            .map(|entry| &mut entry.value)
    }

    /// Associates `value` with `key`.
    ///
    /// If the map already had a value for `key`, it is replaced and returned. The key itself is not
    /// updated.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(old) = self.get_mut(&key) {
            return Some(mem::replace(old, value));
        }

        self.tree.insert(MapEntry { key, value });
        None
    }

    /// Removes the value associated with `key` from the map.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree
            .remove_by(|entry| key.cmp(entry.key.borrow()))
            .map(|entry| entry.value)
    }

    /// Returns the first key-value pair in the map.
    ///
    /// The returned key is the minimum key in the map.
    #[inline]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|entry| (&entry.key, &entry.value))
    }

    /// Returns the last key-value pair in the map.
    ///
    /// The returned key is the maximum key in the map.
    #[inline]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.last().map(|entry| (&entry.key, &entry.value))
    }

    /// Returns an iterator over the key-value pairs of the map, sorted by key.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &V)> + '_ {
        self.tree.iter().map(|entry| (&entry.key, &entry.value))
    }

    /// Clears the map, removing all elements.
    #[inline]
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        self.tree.assert_invariants();
    }
}

impl<K: Ord, V> Default for AvlMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Debug for AvlMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = AvlMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for AvlMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::{prelude::v1::*, vec};

    use super::*;

    #[test]
    fn insert_replaces_value() {
        let mut map = AvlMap::new();

        assert_eq!(map.insert(2, "two"), None);
        assert_eq!(map.insert(1, "one"), None);
        assert_eq!(map.insert(2, "deux"), Some("two"));
        map.assert_invariants();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&2), Some(&"deux"));
        assert_eq!(
            map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
            vec![(1, "one"), (2, "deux")]
        );
    }

    #[test]
    fn get_mut_and_remove() {
        let mut map: AvlMap<u32, u32> = (0..32).map(|k| (k, k * 10)).collect();

        *map.get_mut(&7).unwrap() += 1;
        assert_eq!(map.get(&7), Some(&71));

        assert_eq!(map.remove(&7), Some(71));
        assert_eq!(map.remove(&7), None);
        assert!(!map.contains_key(&7));
        map.assert_invariants();

        assert_eq!(map.first_key_value(), Some((&0, &0)));
        assert_eq!(map.last_key_value(), Some((&31, &310)));
        assert_eq!(map.len(), 31);
    }

    #[test]
    fn borrowed_keys() {
        let mut map = AvlMap::new();
        map.insert(String::from("b"), 2);
        map.insert(String::from("a"), 1);

        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.remove("b"), Some(2));
        assert!(map.get("b").is_none());
    }
}
