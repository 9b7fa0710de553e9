//! Slot: one cell of the probe table, plus the occupant shapes stored in it.

/// Something that can live in a slot. Equality and hashing of an occupant
/// are defined over its key only.
pub trait Occupant {
    type Key;

    fn key(&self) -> &Self::Key;
}

/// Map occupant: a key and its value.
#[derive(Debug, Clone)]
pub struct MapEntry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Occupant for MapEntry<K, V> {
    type Key = K;

    #[inline]
    fn key(&self) -> &K {
        &self.key
    }
}

/// Set occupant: the element is its own key.
#[derive(Debug, Clone)]
pub struct SetEntry<E>(pub E);

impl<E> Occupant for SetEntry<E> {
    type Key = E;

    #[inline]
    fn key(&self) -> &E {
        &self.0
    }
}

/// A slot is either empty or holds an occupant together with its probe
/// distance: how many steps past its origin index it sits.
#[derive(Debug, Clone)]
pub enum Slot<O> {
    Empty,
    Occupied { occupant: O, distance: usize },
}

impl<O> Slot<O> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    #[inline]
    pub fn occupant(&self) -> Option<&O> {
        match self {
            Slot::Occupied { occupant, .. } => Some(occupant),
            Slot::Empty => None,
        }
    }

    #[inline]
    pub fn occupant_mut(&mut self) -> Option<&mut O> {
        match self {
            Slot::Occupied { occupant, .. } => Some(occupant),
            Slot::Empty => None,
        }
    }

    #[inline]
    pub fn distance(&self) -> Option<usize> {
        match self {
            Slot::Occupied { distance, .. } => Some(*distance),
            Slot::Empty => None,
        }
    }

    /// Empty the slot, returning whatever occupied it.
    #[inline]
    pub fn take(&mut self) -> Option<O> {
        match core::mem::replace(self, Slot::Empty) {
            Slot::Occupied { occupant, .. } => Some(occupant),
            Slot::Empty => None,
        }
    }

    pub fn into_occupant(self) -> Option<O> {
        match self {
            Slot::Occupied { occupant, .. } => Some(occupant),
            Slot::Empty => None,
        }
    }
}

impl<O> Default for Slot<O> {
    fn default() -> Self {
        Slot::Empty
    }
}
