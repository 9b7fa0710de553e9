//! RobinHoodTable: the probing engine shared by the map and the set.
//!
//! Lookups walk the probe sequence from a key's origin and stop as soon as
//! they meet an empty slot or an occupant whose distance is smaller than
//! the number of steps already taken. Inserts displace occupants that sit
//! closer to their origin than the incoming entry would. Removals repair
//! the chain by shifting successors back one slot instead of leaving
//! tombstones.

use crate::error::{CapacityError, InsertError};
use crate::iter::{IntoOccupants, Occupants, OccupantsMut};
use crate::probe_table::ProbeTable;
use crate::slot::{Occupant, Slot};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use tracing::{debug, trace};

#[derive(Clone)]
pub struct RobinHoodTable<O, S> {
    table: ProbeTable<O>,
    len: usize,
    hasher: S,
}

impl<O, S> RobinHoodTable<O, S> {
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self, CapacityError> {
        let table = ProbeTable::new(capacity).map_err(|e| {
            debug!(capacity, "rejecting table construction");
            e
        })?;
        Ok(Self {
            table,
            len: 0,
            hasher,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.table.capacity()
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Drop every occupant by swapping in a fresh all-empty slot array.
    pub fn clear(&mut self) {
        debug!(len = self.len, capacity = self.capacity(), "clearing table");
        self.table.reset();
        self.len = 0;
    }

    /// Occupants in ascending slot order.
    pub fn iter(&self) -> Occupants<'_, O> {
        Occupants::new(self.table.slots(), self.len)
    }

    pub fn iter_mut(&mut self) -> OccupantsMut<'_, O> {
        let len = self.len;
        OccupantsMut::new(self.table.slots_mut(), len)
    }

    pub fn into_occupants(self) -> IntoOccupants<O> {
        IntoOccupants::new(self.table.into_slots(), self.len)
    }

    pub(crate) fn slots(&self) -> &[Slot<O>] {
        self.table.slots()
    }

    /// Remove the occupant at `i` and shift its successors back. Returns the
    /// removed occupant and the index left empty at the end of the chain.
    fn remove_at(&mut self, mut i: usize) -> (O, usize) {
        let removed = self
            .table
            .slot_mut(i)
            .take()
            .expect("remove_at must target an occupied slot");
        let mut j = self.table.next(i);
        let mut shifted = 0usize;
        loop {
            match self.table.slot_mut(j) {
                Slot::Occupied { distance, .. } if *distance > 0 => *distance -= 1,
                _ => break,
            }
            // Slot `i` is empty here, so the swap moves `j` back and empties `j`.
            self.table.swap(i, j);
            i = j;
            j = self.table.next(j);
            shifted += 1;
        }
        self.len -= 1;
        trace!(shifted, emptied = i, "backward shift after removal");
        (removed, i)
    }

    /// Keep only the occupants for which `keep` returns true. `keep` runs
    /// once per occupant, before any removal.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&mut O) -> bool,
    {
        let mut doomed: Vec<bool> = self
            .table
            .slots_mut()
            .iter_mut()
            .map(|s| s.occupant_mut().map_or(false, |o| !keep(o)))
            .collect();
        let mut i = 0;
        while i < doomed.len() {
            if !doomed[i] {
                i += 1;
                continue;
            }
            let (_, end) = self.remove_at(i);
            // Flags travel with their occupants along the shifted chain.
            let mut a = i;
            while a != end {
                let b = self.table.next(a);
                doomed[a] = doomed[b];
                a = b;
            }
            doomed[end] = false;
        }
    }
}

impl<O, S> RobinHoodTable<O, S>
where
    O: Occupant,
    O::Key: Hash + Eq,
    S: BuildHasher,
{
    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    /// Slot index holding `q`, if present.
    pub fn find_index<Q>(&self, q: &Q) -> Option<usize>
    where
        O::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if self.len == 0 {
            return None;
        }
        let origin = self.table.origin(self.make_hash(q));
        for offset in 0..self.table.capacity() {
            let i = self.table.index(origin, offset);
            match self.table.slot(i) {
                Slot::Empty => return None,
                Slot::Occupied { occupant, distance } => {
                    if Borrow::<Q>::borrow(occupant.key()) == q {
                        return Some(i);
                    }
                    // Anything hashed to `origin` would have displaced this occupant.
                    if *distance < offset {
                        return None;
                    }
                }
            }
        }
        None
    }

    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        O::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_index(q).is_some()
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&O>
    where
        O::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let i = self.find_index(q)?;
        self.table.slot(i).occupant()
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut O>
    where
        O::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let i = self.find_index(q)?;
        self.table.slot_mut(i).occupant_mut()
    }

    /// Stored probe distance of the occupant keyed by `q`.
    pub fn probe_distance<Q>(&self, q: &Q) -> Option<usize>
    where
        O::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let i = self.find_index(q)?;
        self.table.slot(i).distance()
    }

    /// Insert an occupant whose key is known to be absent.
    ///
    /// Walks the probe sequence from the key's origin, swapping the carried
    /// entry with any resident that sits closer to its own origin, until an
    /// empty slot takes whatever is being carried.
    pub fn insert_new(&mut self, occupant: O) -> Result<(), InsertError> {
        if self.is_full() {
            debug!(capacity = self.capacity(), "insert rejected: table is full");
            return Err(InsertError::Full);
        }
        let capacity = self.table.capacity();
        let mut i = self.table.origin(self.make_hash(occupant.key()));
        let mut carried = occupant;
        let mut distance = 0usize;
        for _ in 0..capacity {
            if self.table.slot(i).is_empty() {
                *self.table.slot_mut(i) = Slot::Occupied {
                    occupant: carried,
                    distance,
                };
                self.len += 1;
                return Ok(());
            }
            if let Slot::Occupied {
                occupant: resident,
                distance: resident_distance,
            } = self.table.slot_mut(i)
            {
                if *resident_distance < distance {
                    trace!(
                        index = i,
                        resident = *resident_distance,
                        incoming = distance,
                        "displacing resident closer to its origin"
                    );
                    core::mem::swap(resident, &mut carried);
                    core::mem::swap(resident_distance, &mut distance);
                }
            }
            i = self.table.next(i);
            distance += 1;
        }
        unreachable!(
            "probe sequence exhausted with {} of {} slots occupied",
            self.len, capacity
        );
    }

    pub fn remove<Q>(&mut self, q: &Q) -> Option<O>
    where
        O::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let i = self.find_index(q)?;
        Some(self.remove_at(i).0)
    }

    /// Panic unless every structural invariant holds.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let capacity = self.table.capacity();
        let mut occupied = 0;
        for (i, slot) in self.table.slots().iter().enumerate() {
            let Slot::Occupied { occupant, distance } = slot else {
                continue;
            };
            occupied += 1;
            let origin = self.table.origin(self.make_hash(occupant.key()));
            let offset = (i + capacity - origin) % capacity;
            assert_eq!(*distance, offset, "slot {i} records a stale distance");
            assert_eq!(
                self.find_index(occupant.key()),
                Some(i),
                "slot {i} is unreachable from its origin"
            );
            if let Some(next) = self.table.slot(self.table.next(i)).distance() {
                assert!(
                    next <= distance + 1,
                    "slot {i} is followed by an entry displaced too far"
                );
            }
        }
        assert_eq!(occupied, self.len, "len disagrees with occupied slots");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::{MapEntry, SetEntry};
    use core::hash::Hasher;

    /// Hashes a `u64` to itself so tests can pick origins directly.
    #[derive(Clone, Default)]
    struct IdentityBuildHasher;
    #[derive(Default)]
    struct IdentityHasher(u64);
    impl BuildHasher for IdentityBuildHasher {
        type Hasher = IdentityHasher;
        fn build_hasher(&self) -> Self::Hasher {
            IdentityHasher(0)
        }
    }
    impl Hasher for IdentityHasher {
        fn write(&mut self, bytes: &[u8]) {
            for b in bytes {
                self.0 = (self.0 << 8) | u64::from(*b);
            }
        }
        fn write_u64(&mut self, n: u64) {
            self.0 = n;
        }
        fn finish(&self) -> u64 {
            self.0
        }
    }

    type Table = RobinHoodTable<SetEntry<u64>, IdentityBuildHasher>;

    fn table(capacity: usize) -> Table {
        RobinHoodTable::with_capacity_and_hasher(capacity, IdentityBuildHasher).unwrap()
    }

    fn keys_in_slot_order(t: &Table) -> Vec<Option<u64>> {
        t.slots().iter().map(|s| s.occupant().map(|e| e.0)).collect()
    }

    /// Invariant: zero capacity is a configuration error.
    #[test]
    fn zero_capacity_rejected() {
        let r: Result<Table, _> = RobinHoodTable::with_capacity_and_hasher(0, IdentityBuildHasher);
        assert_eq!(r.err(), Some(CapacityError::Zero));
    }

    /// Invariant: colliding keys occupy consecutive slots with increasing distances.
    #[test]
    fn collisions_probe_linearly() {
        let mut t = table(8);
        for k in [0, 8, 16] {
            t.insert_new(SetEntry(k)).unwrap();
        }
        assert_eq!(t.probe_distance(&0), Some(0));
        assert_eq!(t.probe_distance(&8), Some(1));
        assert_eq!(t.probe_distance(&16), Some(2));
        t.assert_invariants();
    }

    /// Invariant: an incoming entry further from home displaces a resident closer
    /// to home; both remain reachable.
    #[test]
    fn insert_displaces_richer_resident() {
        let mut t = table(8);
        t.insert_new(SetEntry(1)).unwrap();
        t.insert_new(SetEntry(0)).unwrap();
        t.insert_new(SetEntry(8)).unwrap();
        assert_eq!(
            keys_in_slot_order(&t)[..3],
            [Some(0), Some(8), Some(1)],
            "8 takes slot 1 from 1, which moves on to slot 2"
        );
        assert_eq!(t.probe_distance(&8), Some(1));
        assert_eq!(t.probe_distance(&1), Some(1));
        assert!(t.contains(&0) && t.contains(&8) && t.contains(&1));
        t.assert_invariants();
    }

    /// Invariant: lookups for absent keys stop at the first poorer resident
    /// and never report a false hit.
    #[test]
    fn absent_lookup_terminates_early() {
        let mut t = table(8);
        for k in [0, 8, 1, 2] {
            t.insert_new(SetEntry(k)).unwrap();
        }
        assert!(!t.contains(&16));
        assert!(!t.contains(&9));
        assert!(!t.contains(&5));
        assert_eq!(t.find_index(&16), None);
    }

    /// Invariant: removing the head of a chain shifts the followers back and
    /// lowers each of their distances by exactly one.
    #[test]
    fn removal_shifts_chain_back() {
        let mut t = table(8);
        for k in [0, 8, 16] {
            t.insert_new(SetEntry(k)).unwrap();
        }
        assert_eq!(t.remove(&0).map(|e| e.0), Some(0));
        assert_eq!(t.len(), 2);
        assert_eq!(t.probe_distance(&8), Some(0));
        assert_eq!(t.probe_distance(&16), Some(1));
        assert_eq!(
            keys_in_slot_order(&t)[..3],
            [Some(8), Some(16), None]
        );
        t.assert_invariants();
    }

    /// Invariant: the shift stops at an entry sitting in its home slot.
    #[test]
    fn removal_stops_at_home_entry() {
        let mut t = table(8);
        for k in [0, 8, 2] {
            t.insert_new(SetEntry(k)).unwrap();
        }
        t.remove(&0).unwrap();
        assert_eq!(keys_in_slot_order(&t)[..3], [Some(8), None, Some(2)]);
        t.assert_invariants();
    }

    /// Invariant: probing and shifting wrap around the end of the slot array.
    #[test]
    fn wrap_around_insert_and_remove() {
        let mut t = table(4);
        t.insert_new(SetEntry(3)).unwrap();
        t.insert_new(SetEntry(7)).unwrap();
        assert_eq!(keys_in_slot_order(&t), [Some(7), None, None, Some(3)]);
        assert_eq!(t.probe_distance(&7), Some(1));

        t.remove(&3).unwrap();
        assert_eq!(keys_in_slot_order(&t), [None, None, None, Some(7)]);
        assert_eq!(t.probe_distance(&7), Some(0));
        t.assert_invariants();
    }

    /// Invariant: a full table rejects new entries without touching any slot.
    #[test]
    fn full_table_rejects_insert() {
        let mut t = table(1);
        t.insert_new(SetEntry(5)).unwrap();
        assert!(t.is_full());
        assert_eq!(t.insert_new(SetEntry(6)), Err(InsertError::Full));
        assert_eq!(t.len(), 1);
        assert!(t.contains(&5));
        assert!(!t.contains(&6));
    }

    /// Invariant: every key stays reachable when the table is filled to the last slot.
    #[test]
    fn fill_to_capacity_keeps_all_reachable() {
        let mut t = table(7);
        for k in [0, 7, 14, 3, 10, 6, 1] {
            t.insert_new(SetEntry(k)).unwrap();
        }
        assert!(t.is_full());
        for k in [0, 7, 14, 3, 10, 6, 1] {
            assert!(t.contains(&k), "{k} must be found");
        }
        t.assert_invariants();
        for k in [7, 3, 0] {
            assert!(t.remove(&k).is_some());
            t.assert_invariants();
        }
        for k in [14, 10, 6, 1] {
            assert!(t.contains(&k));
        }
    }

    /// Invariant: removal from an empty table or of an absent key is a no-op.
    #[test]
    fn remove_absent_is_noop() {
        let mut t = table(4);
        assert!(t.remove(&1).is_none());
        t.insert_new(SetEntry(1)).unwrap();
        assert!(t.remove(&5).is_none());
        assert!(t.remove(&5).is_none());
        assert_eq!(t.len(), 1);
    }

    /// Invariant: `retain` calls the predicate once per occupant and keeps the
    /// survivors reachable after the shifts it causes.
    #[test]
    fn retain_removes_chain_members() {
        let mut t = table(8);
        for k in [0, 8, 16, 1, 7, 15] {
            t.insert_new(SetEntry(k)).unwrap();
        }
        let mut calls = 0;
        t.retain(|e| {
            calls += 1;
            e.0 % 2 == 1 || e.0 == 16
        });
        assert_eq!(calls, 6);
        assert_eq!(t.len(), 4);
        for k in [16, 1, 7, 15] {
            assert!(t.contains(&k));
        }
        for k in [0, 8] {
            assert!(!t.contains(&k));
        }
        t.assert_invariants();
    }

    /// Invariant: `clear` empties every slot but keeps the capacity.
    #[test]
    fn clear_resets_len_and_slots() {
        let mut t = table(3);
        t.insert_new(SetEntry(0)).unwrap();
        t.insert_new(SetEntry(1)).unwrap();
        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.capacity(), 3);
        assert!(keys_in_slot_order(&t).iter().all(Option::is_none));
        t.insert_new(SetEntry(2)).unwrap();
        assert!(t.contains(&2));
    }

    /// Invariant: map occupants are found by key regardless of value.
    #[test]
    fn map_entries_keyed_by_key_only() {
        let mut t: RobinHoodTable<MapEntry<u64, &str>, IdentityBuildHasher> =
            RobinHoodTable::with_capacity_and_hasher(4, IdentityBuildHasher).unwrap();
        t.insert_new(MapEntry { key: 2, value: "two" }).unwrap();
        assert_eq!(t.get(&2).map(|e| e.value), Some("two"));
        if let Some(e) = t.get_mut(&2) {
            e.value = "deux";
        }
        assert_eq!(t.get(&2).map(|e| e.value), Some("deux"));
    }

    /// Invariant: iteration visits occupants in slot order.
    #[test]
    fn iteration_in_slot_order() {
        let mut t = table(5);
        for k in [4, 2, 0] {
            t.insert_new(SetEntry(k)).unwrap();
        }
        let seen: Vec<u64> = t.iter().map(|e| e.0).collect();
        assert_eq!(seen, vec![0, 2, 4]);
        assert_eq!(t.iter().len(), 3);
    }
}
