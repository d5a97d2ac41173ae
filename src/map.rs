//! An ordered map based on an AVL tree.

use compare::{Compare, Natural};
use std::fmt::{self, Debug};
use std::iter::FromIterator;
use std::ops;

use crate::node::{self, Rotations};

/// An ordered map based on an AVL tree.
///
/// The behavior of this map is undefined if a key's ordering relative to any other key changes
/// while the key is in the map. This is normally only possible through `Cell`, `RefCell`, or
/// unsafe code.
#[derive(Clone)]
pub struct Map<K, V, C = Natural<K>>
where
    C: Compare<K>,
{
    root: node::Link<K, V>,
    len: usize,
    cmp: C,
    insert_rotations: Rotations,
    remove_rotations: Rotations,
}

impl<K, V> Map<K, V>
where
    K: Ord,
{
    /// Creates an empty map ordered according to the natural order of its keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Map;
    ///
    /// let mut map = Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.keys(), [1, 2, 3]);
    /// ```
    pub fn new() -> Map<K, V> { Map::with_cmp(compare::natural()) }
}

impl<K, V, C> Map<K, V, C>
where
    C: Compare<K>,
{
    /// Creates an empty map ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{natural, Compare};
    /// use avl::Map;
    ///
    /// let mut map = Map::with_cmp(natural().rev());
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.keys(), [3, 2, 1]);
    /// ```
    pub fn with_cmp(cmp: C) -> Map<K, V, C> {
        Map {
            root: None,
            len: 0,
            cmp,
            insert_rotations: Rotations::default(),
            remove_rotations: Rotations::default(),
        }
    }

    /// Checks if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl::Map::new();
    /// assert!(map.is_empty());
    ///
    /// map.insert(2, "b");
    /// assert!(!map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool { self.root.is_none() }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl::Map::new();
    /// assert_eq!(map.len(), 0);
    ///
    /// map.insert(2, "b");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.len }

    /// Returns a reference to the map's comparator.
    pub fn cmp(&self) -> &C { &self.cmp }

    /// Removes all entries from the map.
    ///
    /// The rotation tallies are monotonic and are not reset.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.len(), 3);
    ///
    /// map.clear();
    ///
    /// assert_eq!(map.len(), 0);
    /// assert!(map.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Inserts an entry into the map, returning the previous value, if any, associated
    /// with the key.
    ///
    /// Replacing the value of a present key keeps the stored key and does not restructure
    /// the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl::Map::new();
    /// assert_eq!(map.insert(1, "a"), None);
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.insert(1, "b"), Some("a"));
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (old_value, _) =
            node::insert(&mut self.root, &self.cmp, key, value, &mut self.insert_rotations);
        if old_value.is_none() { self.len += 1; }
        old_value
    }

    /// Removes and returns the entry whose key is equal to the given key, returning
    /// `None` if the map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.remove(&1), Some((1, "a")));
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)>
    where
        C: Compare<Q, K>,
    {
        let (entry, _) = node::remove(&mut self.root, &self.cmp, key, &mut self.remove_rotations);
        if entry.is_some() { self.len -= 1; }
        entry
    }

    /// Checks if the map contains the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl::Map::new();
    /// assert!(!map.contains_key(&1));
    /// map.insert(1, "a");
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
    where
        C: Compare<Q, K>,
    {
        node::get(&self.root, &self.cmp, key).is_some()
    }

    /// Returns a reference to the value associated with the given key, or `None` if the
    /// map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl::Map::new();
    /// assert_eq!(map.get(&1), None);
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// ```
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V>
    where
        C: Compare<Q, K>,
    {
        node::get(&self.root, &self.cmp, key).map(|e| e.1)
    }

    /// Returns a mutable reference to the value associated with the given key, or `None`
    /// if the map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl::Map::new();
    /// map.insert(1, "a");
    ///
    /// {
    ///     let value = map.get_mut(&1).unwrap();
    ///     assert_eq!(*value, "a");
    ///     *value = "b";
    /// }
    ///
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V>
    where
        C: Compare<Q, K>,
    {
        node::get_mut(&mut self.root, &self.cmp, key).map(|e| e.1)
    }

    /// Returns the map's keys in ascending order.
    ///
    /// The returned vector holds exactly `len()` keys.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.keys(), [1, 2, 3]);
    /// ```
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        let mut keys = Vec::with_capacity(self.len);
        node::in_order(&self.root, &mut |key, _| keys.push(key.clone()));
        keys
    }

    /// Returns an adaptor that renders the tree shape when displayed: one key per line,
    /// right subtree first, children indented under their parent.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// println!("{}", map.dump_tree());
    /// ```
    pub fn dump_tree(&self) -> TreeDump<'_, K, V>
    where
        K: Debug,
    {
        TreeDump(&self.root)
    }

    /// Returns the rotation tallies recorded on the insertion path since the map was
    /// created.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl::Map::new();
    ///
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.insert_rotations().rr, 1);
    /// ```
    pub fn insert_rotations(&self) -> Rotations { self.insert_rotations }

    /// Returns the rotation tallies recorded on the removal path since the map was
    /// created.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl::Map::new();
    ///
    /// for key in 1..5 {
    ///     map.insert(key, ());
    /// }
    ///
    /// map.remove(&1);
    /// assert_eq!(map.remove_rotations().rr, 1);
    /// ```
    pub fn remove_rotations(&self) -> Rotations { self.remove_rotations }

    // Eager in-order visitation, for the facades' rendering impls.
    pub(crate) fn visit<F>(&self, visit: &mut F)
    where
        F: FnMut(&K, &V),
    {
        node::in_order(&self.root, visit);
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> &node::Link<K, V> { &self.root }
}

impl<K, V, C> Debug for Map<K, V, C>
where
    K: Debug,
    V: Debug,
    C: Compare<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = f.debug_map();
        node::in_order(&self.root, &mut |key, value| {
            entries.entry(key, value);
        });
        entries.finish()
    }
}

impl<K, V, C> Default for Map<K, V, C>
where
    C: Compare<K> + Default,
{
    fn default() -> Map<K, V, C> { Map::with_cmp(Default::default()) }
}

impl<K, V, C> Extend<(K, V)> for Map<K, V, C>
where
    C: Compare<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, it: I) {
        for (k, v) in it {
            self.insert(k, v);
        }
    }
}

impl<K, V, C> FromIterator<(K, V)> for Map<K, V, C>
where
    C: Compare<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(it: I) -> Map<K, V, C> {
        let mut map: Map<K, V, C> = Default::default();
        map.extend(it);
        map
    }
}

impl<K, V, C, Q: ?Sized> ops::Index<&Q> for Map<K, V, C>
where
    C: Compare<K> + Compare<Q, K>,
{
    type Output = V;
    fn index(&self, key: &Q) -> &V { self.get(key).expect("key not found") }
}

impl<K, V, C, Q: ?Sized> ops::IndexMut<&Q> for Map<K, V, C>
where
    C: Compare<K> + Compare<Q, K>,
{
    fn index_mut(&mut self, key: &Q) -> &mut V { self.get_mut(key).expect("key not found") }
}

/// Renders the tree shape of a map or set: one key per line, right subtree first,
/// children indented under their parent.
///
/// Acquire through [`Map::dump_tree`](struct.Map.html#method.dump_tree) or
/// [`Set::dump_tree`](../set/struct.Set.html#method.dump_tree).
pub struct TreeDump<'a, K, V>(&'a node::Link<K, V>);

impl<K, V> fmt::Display for TreeDump<'_, K, V>
where
    K: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        node::write_tree(f, self.0, 0)
    }
}
