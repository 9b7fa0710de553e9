//! RobinHoodHashMap: fixed-capacity key/value map over the Robin Hood engine.

use crate::error::{CapacityError, InsertError};
use crate::robin_hood::RobinHoodTable;
use crate::slot::MapEntry;
use crate::views::{EntrySet, KeySet, ValueSet};
use crate::{DefaultHashBuilder, DEFAULT_CAPACITY};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};

pub use crate::iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};

/// A map with a fixed number of slots. Inserting a new key into a full
/// map fails instead of growing the table.
#[derive(Clone)]
pub struct RobinHoodHashMap<K, V, S = DefaultHashBuilder> {
    pub(crate) table: RobinHoodTable<MapEntry<K, V>, S>,
}

impl<K, V> RobinHoodHashMap<K, V> {
    /// Empty map with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, CapacityError> {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K, V> Default for RobinHoodHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> RobinHoodHashMap<K, V, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hasher)
            .expect("default capacity is non-zero")
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self, CapacityError> {
        Ok(Self {
            table: RobinHoodTable::with_capacity_and_hasher(capacity, hasher)?,
        })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
    pub fn is_full(&self) -> bool {
        self.table.is_full()
    }
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }
    pub fn hasher(&self) -> &S {
        self.table.hasher()
    }

    /// Remove every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Linear scan over occupied slots; values are not indexed.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|v| v == value)
    }

    /// Keep only the entries for which `f` returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.table.retain(|e| f(&e.key, &mut e.value));
    }

    /// Entries in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.table.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            it: self.table.iter_mut(),
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            it: self.table.iter(),
        }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            it: self.table.iter(),
        }
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            it: self.table.iter_mut(),
        }
    }

    /// Live view of the keys; removals through it remove whole entries.
    pub fn key_set(&mut self) -> KeySet<'_, K, V, S> {
        KeySet::new(self)
    }

    /// Live view of the values.
    pub fn value_set(&mut self) -> ValueSet<'_, K, V, S> {
        ValueSet::new(self)
    }

    /// Live view of the entries.
    pub fn entry_set(&mut self) -> EntrySet<'_, K, V, S> {
        EntrySet::new(self)
    }
}

impl<K, V, S> RobinHoodHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.contains(key)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.get(key).map(|e| &e.value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.get_mut(key).map(|e| &mut e.value)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.get(key).map(|e| (&e.key, &e.value))
    }

    /// Insert or update. Returns the previous value when `key` was present.
    ///
    /// Updating an existing key always succeeds, even in a full map. A new
    /// key is rejected with [`InsertError::Full`] when every slot is taken.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, InsertError> {
        if let Some(entry) = self.table.get_mut(&key) {
            return Ok(Some(core::mem::replace(&mut entry.value, value)));
        }
        self.table
            .insert_new(MapEntry { key, value })
            .map(|()| None)
    }

    /// Insert each pair in turn, skipping the ones that do not fit. Returns
    /// how many new keys were added.
    pub fn insert_all<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut added = 0;
        for (key, value) in entries {
            if let Ok(None) = self.insert(key, value) {
                added += 1;
            }
        }
        added
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.remove(key).map(|e| e.value)
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.remove(key).map(|e| (e.key, e.value))
    }

    /// Probe steps between `key`'s origin slot and the slot it occupies.
    pub fn probe_distance<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.probe_distance(key)
    }
}

impl<K, V, S> Extend<(K, V)> for RobinHoodHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<'a, K, V, S> IntoIterator for &'a RobinHoodHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut RobinHoodHashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for RobinHoodHashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            it: self.table.into_occupants(),
        }
    }
}

/// `RobinHoodHashMap:[v1, v2, ...]`, values in slot order.
impl<K, V, S> fmt::Display for RobinHoodHashMap<K, V, S>
where
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RobinHoodHashMap:[")?;
        for (i, v) in self.values().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("]")
    }
}

impl<K, V, S> fmt::Debug for RobinHoodHashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
