//! ProbeTable: fixed-length slot array with circular index arithmetic.

use crate::error::CapacityError;
use crate::slot::Slot;

/// Exactly `capacity` slots, allocated once. The table owns every occupant.
#[derive(Clone)]
pub struct ProbeTable<O> {
    slots: Box<[Slot<O>]>,
}

impl<O> ProbeTable<O> {
    /// Allocate `capacity` empty slots.
    pub fn new(capacity: usize) -> Result<Self, CapacityError> {
        if capacity == 0 {
            return Err(CapacityError::Zero);
        }
        let slots = core::iter::repeat_with(Slot::default)
            .take(capacity)
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Ok(Self { slots })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Origin index for a hash value.
    #[inline]
    pub fn origin(&self, hash: u64) -> usize {
        (hash % self.slots.len() as u64) as usize
    }

    /// Index visited `offset` steps into the probe sequence starting at `origin`.
    #[inline]
    pub fn index(&self, origin: usize, offset: usize) -> usize {
        (origin + offset) % self.slots.len()
    }

    #[inline]
    pub fn next(&self, i: usize) -> usize {
        self.index(i, 1)
    }

    #[inline]
    pub fn slot(&self, i: usize) -> &Slot<O> {
        &self.slots[i]
    }

    #[inline]
    pub fn slot_mut(&mut self, i: usize) -> &mut Slot<O> {
        &mut self.slots[i]
    }

    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }

    pub fn slots(&self) -> &[Slot<O>] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [Slot<O>] {
        &mut self.slots
    }

    pub fn into_slots(self) -> Box<[Slot<O>]> {
        self.slots
    }

    /// Replace every slot with a freshly allocated empty one.
    pub fn reset(&mut self) {
        let capacity = self.capacity();
        self.slots = core::iter::repeat_with(Slot::default)
            .take(capacity)
            .collect::<Vec<_>>()
            .into_boxed_slice();
    }
}
