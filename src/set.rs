//! RobinHoodHashSet: fixed-capacity set over the Robin Hood engine.

use crate::error::{CapacityError, InsertError};
use crate::iter::{IntoOccupants, Occupants};
use crate::robin_hood::RobinHoodTable;
use crate::slot::SetEntry;
use crate::{DefaultHashBuilder, DEFAULT_CAPACITY};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;

/// A set with a fixed number of slots. Inserting into a full set fails
/// instead of growing the table.
#[derive(Clone)]
pub struct RobinHoodHashSet<E, S = DefaultHashBuilder> {
    pub(crate) table: RobinHoodTable<SetEntry<E>, S>,
}

/// Iterator over set elements in slot order.
pub struct Iter<'a, E> {
    it: Occupants<'a, SetEntry<E>>,
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|e| &e.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}
impl<E> FusedIterator for Iter<'_, E> {}

/// Owning iterator over set elements in slot order.
pub struct IntoIter<E> {
    it: IntoOccupants<SetEntry<E>>,
}

impl<E> Iterator for IntoIter<E> {
    type Item = E;
    #[inline]
    fn next(&mut self) -> Option<E> {
        self.it.next().map(|e| e.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<E> ExactSizeIterator for IntoIter<E> {}
impl<E> FusedIterator for IntoIter<E> {}

impl<E> RobinHoodHashSet<E> {
    /// Empty set with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, CapacityError> {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<E> Default for RobinHoodHashSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, S> RobinHoodHashSet<E, S> {
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

    /// Remove every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Elements in slot order.
    pub fn iter(&self) -> Iter<'_, E> {
        Iter {
            it: self.table.iter(),
        }
    }

    /// Keep only the elements for which `f` returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&E) -> bool,
    {
        self.table.retain(|e| f(&e.0));
    }
}

impl<E, S> RobinHoodHashSet<E, S>
where
    E: Eq + Hash,
    S: BuildHasher,
{
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        E: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.contains(value)
    }

    pub fn get<Q>(&self, value: &Q) -> Option<&E>
    where
        E: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.get(value).map(|e| &e.0)
    }

    /// Add `value`. A value already present is left untouched and reported
    /// as [`InsertError::DuplicateKey`]; a full set reports
    /// [`InsertError::Full`].
    pub fn insert(&mut self, value: E) -> Result<(), InsertError> {
        if self.table.contains(&value) {
            return Err(InsertError::DuplicateKey);
        }
        self.table.insert_new(SetEntry(value))
    }

    /// Insert each value in turn, skipping duplicates and values that do not
    /// fit. Returns how many were added.
    pub fn insert_all<I>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = E>,
    {
        values
            .into_iter()
            .map(|v| self.insert(v))
            .filter(Result::is_ok)
            .count()
    }

    /// True if `value` was present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        E: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.remove(value).is_some()
    }

    /// Remove and return the stored element equal to `value`.
    pub fn take<Q>(&mut self, value: &Q) -> Option<E>
    where
        E: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.remove(value).map(|e| e.0)
    }

    pub fn contains_all<'q, Q, I>(&self, values: I) -> bool
    where
        E: Borrow<Q>,
        Q: ?Sized + Hash + Eq + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        values.into_iter().all(|v| self.contains(v))
    }

    /// Remove each value in turn; true if any was present.
    pub fn remove_all<'q, Q, I>(&mut self, values: I) -> bool
    where
        E: Borrow<Q>,
        Q: ?Sized + Hash + Eq + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        let mut changed = false;
        for v in values {
            changed |= self.remove(v);
        }
        changed
    }

    /// Keep only the elements that appear in `keep`; true if any was removed.
    pub fn retain_all<'q, Q, I>(&mut self, keep: I) -> bool
    where
        E: Borrow<Q>,
        Q: ?Sized + Eq + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        let keep: Vec<&Q> = keep.into_iter().collect();
        let before = self.len();
        self.retain(|e| keep.iter().any(|q| Borrow::<Q>::borrow(e) == *q));
        self.len() != before
    }

    /// Probe steps between `value`'s origin slot and the slot it occupies.
    pub fn probe_distance<Q>(&self, value: &Q) -> Option<usize>
    where
        E: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.probe_distance(value)
    }
}

impl<E, S> Extend<E> for RobinHoodHashSet<E, S>
where
    E: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<'a, E, S> IntoIterator for &'a RobinHoodHashSet<E, S> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E, S> IntoIterator for RobinHoodHashSet<E, S> {
    type Item = E;
    type IntoIter = IntoIter<E>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            it: self.table.into_occupants(),
        }
    }
}

/// `RobinHoodHashSet:[e1, e2, ...]`, elements in slot order.
impl<E, S> fmt::Display for RobinHoodHashSet<E, S>
where
    E: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RobinHoodHashSet:[")?;
        for (i, e) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{e}")?;
        }
        f.write_str("]")
    }
}

impl<E, S> fmt::Debug for RobinHoodHashSet<E, S>
where
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
