//! Live key, value and entry views over a `RobinHoodHashMap`.
//!
//! A view borrows its map and never touches slots itself: reads go through
//! the map's iterators and lookups, and every mutation goes through the
//! map's own `remove`/`retain`/`clear`. Adding through a key or value view
//! is not possible because one half of the pair would be missing, so `add`
//! and `add_all` always return `false`.

use crate::map::{Iter, Keys, RobinHoodHashMap, Values};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};

/// Keys of a map. Removing a key removes its entry.
pub struct KeySet<'a, K, V, S> {
    map: &'a mut RobinHoodHashMap<K, V, S>,
}

impl<'a, K, V, S> KeySet<'a, K, V, S> {
    pub(crate) fn new(map: &'a mut RobinHoodHashMap<K, V, S>) -> Self {
        Self { map }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> Keys<'_, K, V> {
        self.map.keys()
    }

    /// Always `false`; insert through the map instead.
    pub fn add(&mut self, _key: K) -> bool {
        false
    }

    /// Always `false`; insert through the map instead.
    pub fn add_all<I>(&mut self, _keys: I) -> bool
    where
        I: IntoIterator<Item = K>,
    {
        false
    }

    /// Clears the whole map.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<'a, K, V, S> KeySet<'a, K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    pub fn contains_all<'q, Q, I>(&self, keys: I) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        keys.into_iter().all(|k| self.map.contains_key(k))
    }

    /// Removes the entry for `key`; true if one was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.remove(key).is_some()
    }

    /// Removes the entry for each key in turn; true if any was present.
    pub fn remove_all<'q, Q, I>(&mut self, keys: I) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        let mut changed = false;
        for k in keys {
            changed |= self.map.remove(k).is_some();
        }
        changed
    }

    /// Keeps only the entries whose key appears in `keep`; true if any
    /// entry was removed.
    pub fn retain_all<'q, Q, I>(&mut self, keep: I) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        let keep: Vec<&Q> = keep.into_iter().collect();
        let before = self.map.len();
        self.map
            .retain(|k, _| keep.iter().any(|q| Borrow::<Q>::borrow(k) == *q));
        self.map.len() != before
    }
}

impl<'a, 'b, K, V, S> IntoIterator for &'b KeySet<'a, K, V, S> {
    type Item = &'b K;
    type IntoIter = Keys<'b, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Values of a map. Values are not indexed, so membership is a scan.
pub struct ValueSet<'a, K, V, S> {
    map: &'a mut RobinHoodHashMap<K, V, S>,
}

impl<'a, K, V, S> ValueSet<'a, K, V, S> {
    pub(crate) fn new(map: &'a mut RobinHoodHashMap<K, V, S>) -> Self {
        Self { map }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> Values<'_, K, V> {
        self.map.values()
    }

    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.map.contains_value(value)
    }

    pub fn contains_all<'q, I>(&self, values: I) -> bool
    where
        V: PartialEq + 'q,
        I: IntoIterator<Item = &'q V>,
    {
        values.into_iter().all(|v| self.map.contains_value(v))
    }

    /// Always `false`; insert through the map instead.
    pub fn add(&mut self, _value: V) -> bool {
        false
    }

    /// Always `false`; insert through the map instead.
    pub fn add_all<I>(&mut self, _values: I) -> bool
    where
        I: IntoIterator<Item = V>,
    {
        false
    }

    /// Clears the whole map.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<'a, 'b, K, V, S> IntoIterator for &'b ValueSet<'a, K, V, S> {
    type Item = &'b V;
    type IntoIter = Values<'b, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Key/value pairs of a map.
pub struct EntrySet<'a, K, V, S> {
    map: &'a mut RobinHoodHashMap<K, V, S>,
}

impl<'a, K, V, S> EntrySet<'a, K, V, S> {
    pub(crate) fn new(map: &'a mut RobinHoodHashMap<K, V, S>) -> Self {
        Self { map }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.map.iter()
    }

    /// Clears the whole map.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<'a, K, V, S> EntrySet<'a, K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// True if `key` is present and mapped to `value`.
    pub fn contains<Q>(&self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: PartialEq,
    {
        self.map.get(key).map_or(false, |v| v == value)
    }
}

impl<'a, 'b, K, V, S> IntoIterator for &'b EntrySet<'a, K, V, S> {
    type Item = (&'b K, &'b V);
    type IntoIter = Iter<'b, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::map::RobinHoodHashMap;

    fn sample() -> RobinHoodHashMap<String, i32> {
        let mut m = RobinHoodHashMap::with_capacity(8).unwrap();
        for (i, k) in ["a", "b", "c", "d"].into_iter().enumerate() {
            m.insert(k.to_string(), i as i32).unwrap();
        }
        m
    }

    /// Invariant: key view reads mirror the map and removals forward to it.
    #[test]
    fn key_set_remove_forwards_to_map() {
        let mut m = sample();
        let mut keys = m.key_set();
        assert_eq!(keys.len(), 4);
        assert!(keys.contains("a"));
        assert!(keys.contains_all(["a", "d"]));
        assert!(!keys.contains_all(["a", "z"]));
        assert!(keys.remove("a"));
        assert!(!keys.remove("a"));
        assert_eq!(keys.len(), 3);
        assert!(!m.contains_key("a"));
        assert_eq!(m.len(), 3);
    }

    /// Invariant: `remove_all` reports whether anything changed; absent keys are ignored.
    #[test]
    fn key_set_remove_all() {
        let mut m = sample();
        assert!(m.key_set().remove_all(["a", "zz", "c"]));
        assert!(!m.key_set().remove_all(["zz"]));
        let mut left: Vec<&String> = m.keys().collect();
        left.sort();
        assert_eq!(left, ["b", "d"]);
    }

    /// Invariant: `retain_all` keeps only listed keys.
    #[test]
    fn key_set_retain_all() {
        let mut m = sample();
        assert!(m.key_set().retain_all(["b", "c", "nope"]));
        assert_eq!(m.len(), 2);
        assert!(m.contains_key("b") && m.contains_key("c"));
        assert!(!m.key_set().retain_all(["b", "c"]));
        m.table.assert_invariants();
    }

    /// Invariant: adding through key or value views always fails and changes nothing.
    #[test]
    fn views_refuse_additions() {
        let mut m = sample();
        assert!(!m.key_set().add("new".to_string()));
        assert!(!m.key_set().add_all(vec!["x".to_string()]));
        assert!(!m.value_set().add(99));
        assert!(!m.value_set().add_all([100, 101]));
        assert_eq!(m.len(), 4);
        assert!(!m.contains_key("new"));
    }

    /// Invariant: value membership compares values, not keys.
    #[test]
    fn value_set_membership() {
        let mut m = sample();
        let values = m.value_set();
        assert!(values.contains(&0));
        assert!(values.contains_all(&[1, 2, 3]));
        assert!(!values.contains_all(&[1, 42]));
        let mut seen: Vec<i32> = values.iter().copied().collect();
        seen.sort();
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    /// Invariant: entry membership requires both key and value to match.
    #[test]
    fn entry_set_membership() {
        let mut m = sample();
        let entries = m.entry_set();
        assert!(entries.contains("b", &1));
        assert!(!entries.contains("b", &2));
        assert!(!entries.contains("zz", &1));
        assert_eq!((&entries).into_iter().count(), 4);
    }

    /// Invariant: clearing any view clears the map.
    #[test]
    fn clearing_any_view_clears_map() {
        let mut m = sample();
        m.key_set().clear();
        assert!(m.is_empty());

        let mut m = sample();
        m.value_set().clear();
        assert!(m.is_empty());

        let mut m = sample();
        m.entry_set().clear();
        assert!(m.is_empty());
        assert_eq!(m.capacity(), 8);
    }
}
