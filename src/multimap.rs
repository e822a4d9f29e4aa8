//! An ordered multimap based on a height-balanced binary search tree.

use compare::{Compare, Natural};
use std::fmt::{self, Debug};

use crate::node::{self, Left, LinkExt, Node, Right};

/// An ordered multimap based on a height-balanced binary search tree.
///
/// Unlike [`Map`](crate::Map), inserting a key that is already present never replaces the
/// existing entry: all entries are kept, and entries with equal keys enumerate in the order
/// they were inserted.
///
/// The behavior of this multimap is undefined if a key's ordering relative to any other key
/// changes while the key is in the multimap.
#[derive(Clone)]
pub struct MultiMap<K, V, C = Natural<K>> where C: Compare<K> {
    root: node::Link<K, V>,
    len: usize,
    cmp: C,
}

impl<K, V> MultiMap<K, V> where K: Ord {
    /// Creates an empty multimap ordered according to the natural order of its keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::MultiMap;
    ///
    /// let mut map = MultiMap::new();
    ///
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    /// map.insert("a", 3);
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&"a", &1)));
    /// assert_eq!(it.next(), Some((&"a", &3)));
    /// assert_eq!(it.next(), Some((&"b", &2)));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> MultiMap<K, V> { MultiMap::with_cmp(compare::natural()) }
}

impl<K, V, C> MultiMap<K, V, C> where C: Compare<K> {
    /// Creates an empty multimap ordered according to the given comparator.
    pub fn with_cmp(cmp: C) -> MultiMap<K, V, C> {
        MultiMap { root: None, len: 0, cmp }
    }

    /// Checks if the multimap is empty.
    pub fn is_empty(&self) -> bool { self.root.is_none() }

    /// Returns the number of entries in the multimap, counting each duplicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::MultiMap;
    ///
    /// let mut map = MultiMap::new();
    ///
    /// map.insert(1, "a");
    /// map.insert(1, "b");
    ///
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn len(&self) -> usize { self.len }

    /// Returns the height of the tree. An empty multimap has height 0.
    pub fn height(&self) -> usize { self.root.height() }

    /// Returns a reference to the multimap's comparator.
    pub fn cmp(&self) -> &C { &self.cmp }

    /// Removes all entries from the multimap.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Inserts an entry into the multimap.
    ///
    /// Entries with equal keys are all kept; the new entry is ordered after the existing ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::MultiMap;
    ///
    /// let mut map = MultiMap::new();
    ///
    /// map.insert(1, "a");
    /// map.insert(1, "b");
    ///
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.iter().collect::<Vec<_>>(), [(&1, &"a"), (&1, &"b")]);
    /// ```
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    pub fn insert(&mut self, key: K, value: V) {
        node::insert_multi(&mut self.root, &self.cmp, key, value);
        self.len += 1;
    }

    /// Removes and returns an entry whose key is equal to the given key, returning `None` if
    /// the multimap does not contain the key.
    ///
    /// When several entries share the key, exactly one of them is removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::MultiMap;
    ///
    /// let mut map = MultiMap::new();
    ///
    /// map.insert(1, "a");
    /// map.insert(1, "b");
    ///
    /// assert!(map.remove(&1).is_some());
    /// assert_eq!(map.len(), 1);
    /// assert!(map.remove(&1).is_some());
    /// assert_eq!(map.remove(&1), None);
    /// ```
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)>
        where C: Compare<Q, K>
    {
        let removed = node::remove(&mut self.root, &self.cmp, key);
        if removed.is_some() { self.len -= 1; }
        removed
    }

    /// Checks if the multimap contains the given key.
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool where C: Compare<Q, K> {
        node::get(&self.root, &self.cmp, key).is_some()
    }

    /// Returns a reference to a value associated with the given key, or `None` if the multimap
    /// does not contain the key.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V> where C: Compare<Q, K> {
        node::get(&self.root, &self.cmp, key).key_value().map(|e| e.1)
    }

    /// Returns a mutable reference to a value associated with the given key, or `None` if the
    /// multimap does not contain the key.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V>
        where C: Compare<Q, K>
    {
        node::get_mut(&mut self.root, &self.cmp, key).key_value_mut().map(|e| e.1)
    }

    /// Returns the entry with the minimum key, or `None` if the multimap is empty.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    pub fn first(&self) -> Option<(&K, &V)> {
        node::extremum::<Left, _, _>(&self.root).key_value()
    }

    /// Returns the entry with the maximum key, or `None` if the multimap is empty.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    pub fn last(&self) -> Option<(&K, &V)> {
        node::extremum::<Right, _, _>(&self.root).key_value()
    }

    /// Returns the entry that follows the given key in ascending order (an entry with an
    /// equal key if `inclusive` is true), or `None` at the upper end.
    ///
    /// When several entries share the probe key, the returned entry may itself have an equal
    /// key: the walk resumes from the highest entry holding that key.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    pub fn succ<Q: ?Sized>(&self, key: &Q, inclusive: bool) -> Option<(&K, &V)>
        where C: Compare<Q, K>
    {
        node::closest::<Right, _, _, _, _>(&self.root, &self.cmp, key, inclusive).key_value()
    }

    /// Returns the entry that precedes the given key in ascending order (an entry with an
    /// equal key if `inclusive` is true), or `None` at the lower end.
    ///
    /// When several entries share the probe key, the returned entry may itself have an equal
    /// key: the walk resumes from the highest entry holding that key.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    pub fn pred<Q: ?Sized>(&self, key: &Q, inclusive: bool) -> Option<(&K, &V)>
        where C: Compare<Q, K>
    {
        node::closest::<Left, _, _, _, _>(&self.root, &self.cmp, key, inclusive).key_value()
    }

    /// Calls `visit` on each entry in ascending key order, stopping at the first call that
    /// returns `Some` and returning that result.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::MultiMap;
    ///
    /// let mut map = MultiMap::new();
    ///
    /// map.insert(1, "a");
    /// map.insert(1, "b");
    /// map.insert(2, "c");
    ///
    /// let mut values = Vec::new();
    /// let stopped = map.find_map(|&k, &v| {
    ///     if k > 1 { return Some(()); }
    ///     values.push(v);
    ///     None
    /// });
    ///
    /// assert_eq!(stopped, Some(()));
    /// assert_eq!(values, ["a", "b"]);
    /// ```
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    pub fn find_map<F, R>(&self, mut visit: F) -> Option<R>
        where F: FnMut(&K, &V) -> Option<R>
    {
        node::find_map::<Left, _, _, _, _>(&self.root, &mut visit)
    }

    /// Calls `visit` on each entry in descending key order, stopping at the first call that
    /// returns `Some` and returning that result.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    pub fn rfind_map<F, R>(&self, mut visit: F) -> Option<R>
        where F: FnMut(&K, &V) -> Option<R>
    {
        node::find_map::<Right, _, _, _, _>(&self.root, &mut visit)
    }

    /// Returns an iterator that consumes the multimap.
    pub fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter(node::Iter::new(self.root.take(), self.len))
    }

    /// Returns an iterator over the multimap's entries with immutable references to the values.
    pub fn iter(&self) -> Iter<K, V> {
        Iter(node::Iter::new(self.root.as_node_ref(), self.len))
    }
}

impl<K, V, C> Debug for MultiMap<K, V, C> where K: Debug, V: Debug, C: Compare<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> Default for MultiMap<K, V, C> where C: Compare<K> + Default {
    fn default() -> MultiMap<K, V, C> { MultiMap::with_cmp(C::default()) }
}

impl<K, V, C> Extend<(K, V)> for MultiMap<K, V, C> where C: Compare<K> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, it: I) {
        for (k, v) in it { self.insert(k, v); }
    }
}

impl<K, V, C> FromIterator<(K, V)> for MultiMap<K, V, C>
    where C: Compare<K> + Default
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(it: I) -> MultiMap<K, V, C> {
        let mut map: MultiMap<K, V, C> = Default::default();
        map.extend(it);
        map
    }
}

impl<'a, K, V, C> IntoIterator for &'a MultiMap<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> { self.iter() }
}

impl<K, V, C> IntoIterator for MultiMap<K, V, C> where C: Compare<K> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> IntoIter<K, V> { self.into_iter() }
}

/// An iterator that consumes the multimap.
///
/// Acquire through [`MultiMap::into_iter`] or the `IntoIterator` trait.
#[derive(Clone)]
pub struct IntoIter<K, V>(node::Iter<Box<Node<K, V>>>);

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    fn next(&mut self) -> Option<(K, V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> { self.0.next_back() }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

/// An iterator over the multimap's entries with immutable references to the values.
///
/// Acquire through [`MultiMap::iter`] or the `IntoIterator` trait.
pub struct Iter<'a, K, V>(node::Iter<&'a Node<K, V>>);

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Iter<'a, K, V> { Iter(self.0.clone()) }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<(&'a K, &'a V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> { self.0.next_back() }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}
