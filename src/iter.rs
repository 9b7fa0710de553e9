//! Iterators over occupied slots, in ascending slot order.

use crate::slot::{MapEntry, Slot};
use core::iter::FusedIterator;

/// Shared borrows of every occupant.
pub struct Occupants<'a, O> {
    it: core::slice::Iter<'a, Slot<O>>,
    remaining: usize,
}

impl<'a, O> Occupants<'a, O> {
    pub(crate) fn new(slots: &'a [Slot<O>], len: usize) -> Self {
        Self {
            it: slots.iter(),
            remaining: len,
        }
    }
}

impl<'a, O> Iterator for Occupants<'a, O> {
    type Item = &'a O;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let o = self.it.find_map(Slot::occupant)?;
        self.remaining -= 1;
        Some(o)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<O> ExactSizeIterator for Occupants<'_, O> {}
impl<O> FusedIterator for Occupants<'_, O> {}

impl<O> Clone for Occupants<'_, O> {
    fn clone(&self) -> Self {
        Self {
            it: self.it.clone(),
            remaining: self.remaining,
        }
    }
}

/// Mutable borrows of every occupant.
pub struct OccupantsMut<'a, O> {
    it: core::slice::IterMut<'a, Slot<O>>,
    remaining: usize,
}

impl<'a, O> OccupantsMut<'a, O> {
    pub(crate) fn new(slots: &'a mut [Slot<O>], len: usize) -> Self {
        Self {
            it: slots.iter_mut(),
            remaining: len,
        }
    }
}

impl<'a, O> Iterator for OccupantsMut<'a, O> {
    type Item = &'a mut O;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let o = self.it.find_map(Slot::occupant_mut)?;
        self.remaining -= 1;
        Some(o)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<O> ExactSizeIterator for OccupantsMut<'_, O> {}
impl<O> FusedIterator for OccupantsMut<'_, O> {}

/// Owning iterator; consumes the slot array.
pub struct IntoOccupants<O> {
    it: std::vec::IntoIter<Slot<O>>,
    remaining: usize,
}

impl<O> IntoOccupants<O> {
    pub(crate) fn new(slots: Box<[Slot<O>]>, len: usize) -> Self {
        Self {
            it: slots.into_vec().into_iter(),
            remaining: len,
        }
    }
}

impl<O> Iterator for IntoOccupants<O> {
    type Item = O;
    #[inline]
    fn next(&mut self) -> Option<O> {
        let o = self.it.find_map(Slot::into_occupant)?;
        self.remaining -= 1;
        Some(o)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<O> ExactSizeIterator for IntoOccupants<O> {}
impl<O> FusedIterator for IntoOccupants<O> {}

macro_rules! map_iterator {
    ($(#[$doc:meta])* $name:ident<$($lt:lifetime,)? $($p:ident),*>, $inner:ty, $item:ty, |$e:ident| $project:expr) => {
        $(#[$doc])*
        pub struct $name<$($lt,)? $($p),*> {
            pub(crate) it: $inner,
        }

        impl<$($lt,)? $($p),*> Iterator for $name<$($lt,)? $($p),*> {
            type Item = $item;
            #[inline]
            fn next(&mut self) -> Option<Self::Item> {
                self.it.next().map(|$e| $project)
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                self.it.size_hint()
            }
        }

        impl<$($lt,)? $($p),*> ExactSizeIterator for $name<$($lt,)? $($p),*> {}
        impl<$($lt,)? $($p),*> FusedIterator for $name<$($lt,)? $($p),*> {}
    };
}

map_iterator!(
    /// Iterator over `(&K, &V)` pairs of a map.
    Iter<'a, K, V>, Occupants<'a, MapEntry<K, V>>, (&'a K, &'a V), |e| (&e.key, &e.value)
);
map_iterator!(
    /// Iterator over `(&K, &mut V)` pairs of a map.
    IterMut<'a, K, V>, OccupantsMut<'a, MapEntry<K, V>>, (&'a K, &'a mut V), |e| (&e.key, &mut e.value)
);
map_iterator!(
    /// Iterator over the keys of a map.
    Keys<'a, K, V>, Occupants<'a, MapEntry<K, V>>, &'a K, |e| &e.key
);
map_iterator!(
    /// Iterator over the values of a map.
    Values<'a, K, V>, Occupants<'a, MapEntry<K, V>>, &'a V, |e| &e.value
);
map_iterator!(
    /// Iterator over mutable values of a map.
    ValuesMut<'a, K, V>, OccupantsMut<'a, MapEntry<K, V>>, &'a mut V, |e| &mut e.value
);
map_iterator!(
    /// Owning iterator over `(K, V)` pairs of a map.
    IntoIter<K, V>, IntoOccupants<MapEntry<K, V>>, (K, V), |e| (e.key, e.value)
);
