//! robin-hood-hash: fixed-capacity hash set and map built on Robin Hood
//! open addressing with backward-shift deletion.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: O(1) average membership, lookup, insert and remove over one
//!   preallocated slot array whose size never changes.
//! - Layers:
//!   - ProbeTable<O>: exactly `capacity` slots; hash-to-origin mapping and
//!     circular stride-1 index arithmetic.
//!   - RobinHoodTable<O, S>: the engine. Generic over the occupant shape
//!     so the map and the set share one implementation of lookup, insert,
//!     removal and retain.
//!   - RobinHoodHashMap<K, V, S> / RobinHoodHashSet<E, S>: public facades
//!     that instantiate the engine with `MapEntry<K, V>` or `SetEntry<E>`.
//!   - KeySet / ValueSet / EntrySet: live views that borrow a map and
//!     forward every mutation to it.
//!
//! Slots
//! - A slot is `Empty` or `Occupied { occupant, distance }`; an occupied
//!   slot can never be missing its data.
//! - `distance` is how many probe steps past its origin the occupant sits.
//!
//! Probing
//! - `origin = hash(key) % capacity`; step `k` visits `(origin + k) % capacity`.
//! - Lookup stops at the first empty slot, or at the first occupant whose
//!   distance is smaller than the current step: a key with that origin
//!   would have displaced it on insert.
//! - Insert swaps the carried entry with any resident whose distance is
//!   smaller than the carried one, then keeps probing with the displaced
//!   resident until an empty slot takes it.
//! - Remove empties the slot and shifts each following occupant with a
//!   non-zero distance back by one, stopping at an empty slot or at an
//!   occupant already in its origin slot. No tombstones.
//!
//! Capacity
//! - Inserting a new key into a full container fails with
//!   `InsertError::Full`; there is no resize. Updating a map value in place
//!   still succeeds when full.
//! - `clear()` swaps in a freshly allocated empty slot array of the same
//!   capacity.
//! - Capacity zero is a configuration error (`CapacityError::Zero`).
//!
//! Absent results
//! - Missing keys, removals from an empty container and similar misses
//!   return `None`/`false`; only construction and insertion return errors.
//!
//! Constraints
//! - Single-threaded: no interior mutability and no locking. Views and
//!   iterators borrow the container, so it cannot change underneath them.
//! - Iteration order is slot order, not insertion order.
//!
//! Diagnostics
//! - Displacements and backward shifts are reported at `trace` level and
//!   rejected inserts, failed construction and clears at `debug` level
//!   through `tracing`.

mod error;
mod iter;
pub mod map;
mod probe_table;
mod robin_hood;
mod robin_hood_proptest;
pub mod set;
mod slot;
pub mod views;

/// Slot count used by `new()` and `default()`.
pub const DEFAULT_CAPACITY: usize = 20;

/// Hasher used when none is supplied.
pub type DefaultHashBuilder = hashbrown::hash_map::DefaultHashBuilder;

// Public surface
pub use error::{CapacityError, InsertError};
pub use map::RobinHoodHashMap;
pub use set::RobinHoodHashSet;
pub use views::{EntrySet, KeySet, ValueSet};
