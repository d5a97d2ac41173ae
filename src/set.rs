//! An ordered multiset based on an AVL tree.
//!
//! Repeated insertions of an item are counted in its node rather than stored
//! separately; an item must be removed as many times as it was inserted
//! before its node leaves the tree.

use compare::{Compare, Natural};
use std::fmt::{self, Debug};
use std::iter::FromIterator;

use crate::map::{Map, TreeDump};

/// An ordered multiset based on an AVL tree.
///
/// The behavior of this set is undefined if an item's ordering relative to any other item changes
/// while the item is in the set. This is normally only possible through `Cell`, `RefCell`, or
/// unsafe code.
#[derive(Clone)]
pub struct Set<T, C = Natural<T>>
where
    C: Compare<T>,
{
    map: Map<T, usize, C>,
}

impl<T> Set<T>
where
    T: Ord,
{
    /// Creates an empty set ordered according to the natural order of its items.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl::Set::new();
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// assert_eq!(set.keys(), [1, 2, 3]);
    /// ```
    pub fn new() -> Self { Set { map: Map::new() } }
}

impl<T, C> Set<T, C>
where
    C: Compare<T>,
{
    /// Creates an empty set ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{natural, Compare};
    ///
    /// let mut set = avl::Set::with_cmp(natural().rev());
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// assert_eq!(set.keys(), [3, 2, 1]);
    /// ```
    pub fn with_cmp(cmp: C) -> Self { Set { map: Map::with_cmp(cmp) } }

    /// Checks if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl::Set::new();
    /// assert!(set.is_empty());
    ///
    /// set.insert(2);
    /// assert!(!set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool { self.map.is_empty() }

    /// Returns the number of distinct items in the set.
    ///
    /// Repeated insertions of an item do not change the length.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl::Set::new();
    /// assert_eq!(set.len(), 0);
    ///
    /// set.insert(2);
    /// set.insert(2);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.map.len() }

    /// Returns a reference to the set's comparator.
    pub fn cmp(&self) -> &C { self.map.cmp() }

    /// Removes all items from the set.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl::Set::new();
    ///
    /// set.insert(2);
    /// set.insert(1);
    ///
    /// set.clear();
    ///
    /// assert_eq!(set.len(), 0);
    /// assert!(set.is_empty());
    /// ```
    pub fn clear(&mut self) { self.map.clear(); }

    /// Inserts an item into the set, returning `true` if the set did not already
    /// contain it.
    ///
    /// Inserting an item that is already present increments its count and leaves the
    /// tree structure untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl::Set::new();
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// assert_eq!(set.count(&1), 2);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, item: T) -> bool {
        if let Some(count) = self.map.get_mut(&item) {
            *count += 1;
            return false;
        }

        self.map.insert(item, 1);
        true
    }

    /// Removes one occurrence of the given item, returning `true` only if this removed
    /// the item's node from the tree.
    ///
    /// An item inserted `n` times must be removed `n` times before it leaves the set;
    /// the first `n - 1` calls decrement its count and return `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl::Set::new();
    ///
    /// set.insert(1);
    /// set.insert(1);
    ///
    /// assert!(!set.remove(&1));
    /// assert!(set.contains(&1));
    /// assert!(set.remove(&1));
    /// assert!(!set.contains(&1));
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, item: &Q) -> bool
    where
        C: Compare<Q, T>,
    {
        let count = match self.map.get_mut(item) {
            None => return false,
            Some(count) => count,
        };

        if *count > 1 {
            *count -= 1;
            false
        } else {
            self.map.remove(item).is_some()
        }
    }

    /// Checks if the set contains the given item.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl::Set::new();
    /// assert!(!set.contains(&1));
    /// set.insert(1);
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains<Q: ?Sized>(&self, item: &Q) -> bool
    where
        C: Compare<Q, T>,
    {
        self.map.contains_key(item)
    }

    /// Returns how many times the given item has been inserted, or zero if it is
    /// absent.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl::Set::new();
    /// assert_eq!(set.count(&1), 0);
    ///
    /// set.insert(1);
    /// set.insert(1);
    /// assert_eq!(set.count(&1), 2);
    /// ```
    pub fn count<Q: ?Sized>(&self, item: &Q) -> usize
    where
        C: Compare<Q, T>,
    {
        self.map.get(item).copied().unwrap_or(0)
    }

    /// Returns the set's distinct items in ascending order.
    ///
    /// The returned vector holds exactly `len()` items, regardless of their counts.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl::Set::new();
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(1);
    ///
    /// assert_eq!(set.keys(), [1, 2]);
    /// ```
    pub fn keys(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.map.keys()
    }

    /// Returns an adaptor that renders the tree shape when displayed: one item per
    /// line, right subtree first, children indented under their parent.
    pub fn dump_tree(&self) -> TreeDump<'_, T, usize>
    where
        T: Debug,
    {
        self.map.dump_tree()
    }

    #[cfg(test)]
    pub(crate) fn as_map(&self) -> &Map<T, usize, C> { &self.map }
}

impl<T, C> Debug for Set<T, C>
where
    T: Debug,
    C: Compare<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut items = f.debug_set();
        self.map.visit(&mut |item, count| {
            for _ in 0..*count {
                items.entry(item);
            }
        });
        items.finish()
    }
}

impl<T, C> Default for Set<T, C>
where
    C: Compare<T> + Default,
{
    fn default() -> Set<T, C> { Set { map: Default::default() } }
}

impl<T, C> Extend<T> for Set<T, C>
where
    C: Compare<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, it: I) {
        for item in it {
            self.insert(item);
        }
    }
}

impl<T, C> FromIterator<T> for Set<T, C>
where
    C: Compare<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(it: I) -> Set<T, C> {
        let mut set: Set<T, C> = Default::default();
        set.extend(it);
        set
    }
}
