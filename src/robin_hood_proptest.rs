#![cfg(test)]

// Property tests for the map and set facades kept inside the crate so they
// can check the engine's structural invariants after every operation.

use crate::error::InsertError;
use crate::map::RobinHoodHashMap;
use crate::set::RobinHoodHashSet;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations: indices shrink to earlier keys, the pool shrinks,
// and op lists shrink in length.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    RetainEven,
    Clear,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<Op>)> {
    (1usize..=8, proptest::collection::vec("[a-d]{0,3}", 1..=12)).prop_flat_map(
        |(capacity, pool)| {
            let idx = proptest::sample::select((0..pool.len()).collect::<Vec<_>>());
            let contains_pool = proptest::sample::select(pool.clone());
            let op = prop_oneof![
                6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
                4 => idx.clone().prop_map(Op::Remove),
                2 => idx.clone().prop_map(Op::Get),
                2 => prop_oneof![contains_pool, "[a-d]{0,3}"].prop_map(Op::Contains),
                2 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| Op::Mutate(i, d)),
                1 => Just(Op::RetainEven),
                1 => Just(Op::Clear),
                1 => Just(Op::Iterate),
            ];
            proptest::collection::vec(op, 1..80)
                .prop_map(move |ops| (capacity, pool.clone(), ops))
        },
    )
}

// Every key collides: probing degenerates to one long chain.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Few distinct origins: hashes only the length of the written bytes, so
// chains from neighbouring origins interleave.
#[derive(Clone, Default)]
struct LengthBuildHasher;
struct LengthHasher(u64);
impl BuildHasher for LengthBuildHasher {
    type Hasher = LengthHasher;
    fn build_hasher(&self) -> Self::Hasher {
        LengthHasher(0)
    }
}
impl Hasher for LengthHasher {
    fn write(&mut self, bytes: &[u8]) {
        self.0 = self.0.wrapping_add(bytes.len() as u64);
    }
    fn finish(&self) -> u64 {
        self.0
    }
}

// State-machine equivalence against std::collections::HashMap with the
// capacity rule layered on top:
// - a new key is rejected with `Full` exactly when the model holds
//   `capacity` keys; an existing key is always updated and its old value
//   returned.
// - `get`/`contains_key`/`remove` agree with the model.
// - iteration yields each live key exactly once.
// - after every op: `len` parity, `is_full` parity, and the engine's
//   structural invariants (distance bound, reachability, Robin Hood
//   ordering, len equals occupied slots).
fn run_map_scenario<S: BuildHasher>(
    mut sut: RobinHoodHashMap<String, i32, S>,
    pool: &[String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let capacity = sut.capacity();
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            Op::Insert(i, v) => {
                let k = pool[i].clone();
                let res = sut.insert(k.clone(), v);
                match model.get(&k).copied() {
                    Some(old) => {
                        prop_assert_eq!(res, Ok(Some(old)), "update returns old value");
                        model.insert(k, v);
                    }
                    None if model.len() == capacity => {
                        prop_assert_eq!(res, Err(InsertError::Full));
                    }
                    None => {
                        prop_assert_eq!(res, Ok(None));
                        model.insert(k, v);
                    }
                }
            }
            Op::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(k));
                prop_assert!(sut.remove(k).is_none(), "second removal is a no-op");
            }
            Op::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            Op::Contains(s) => {
                prop_assert_eq!(sut.contains_key(s.as_str()), model.contains_key(&s));
            }
            Op::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(v) = sut.get_mut(k) {
                    *v = v.wrapping_add(d);
                }
                if let Some(v) = model.get_mut(k) {
                    *v = v.wrapping_add(d);
                }
            }
            Op::RetainEven => {
                sut.retain(|_, v| *v % 2 == 0);
                model.retain(|_, v| *v % 2 == 0);
            }
            Op::Clear => {
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), capacity);
            }
            Op::Iterate => {
                let s_keys: BTreeSet<_> = sut.keys().cloned().collect();
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
                prop_assert_eq!(sut.iter().count(), sut.len());
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_full(), model.len() == capacity);
        sut.table.assert_invariants();
    }

    for (k, v) in &model {
        prop_assert_eq!(sut.get(k), Some(v));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_map_state_machine((capacity, pool, ops) in arb_scenario()) {
        let sut = RobinHoodHashMap::with_capacity(capacity).unwrap();
        run_map_scenario(sut, &pool, ops)?;
    }

    #[test]
    fn prop_map_state_machine_all_collide((capacity, pool, ops) in arb_scenario()) {
        let sut = RobinHoodHashMap::with_capacity_and_hasher(capacity, ConstBuildHasher).unwrap();
        run_map_scenario(sut, &pool, ops)?;
    }

    #[test]
    fn prop_map_state_machine_clustered((capacity, pool, ops) in arb_scenario()) {
        let sut = RobinHoodHashMap::with_capacity_and_hasher(capacity, LengthBuildHasher).unwrap();
        run_map_scenario(sut, &pool, ops)?;
    }
}

// Set variant: the same model check with element semantics. Inserting a
// present element reports `DuplicateKey`; a new one into a full set
// reports `Full`.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_set_state_machine(
        capacity in 1usize..=10,
        ops in proptest::collection::vec((0u8..=2u8, 0u16..24u16), 1..120),
    ) {
        let mut sut = RobinHoodHashSet::with_capacity(capacity).unwrap();
        let mut model: HashSet<u16> = HashSet::new();

        for (op, e) in ops {
            match op {
                0 => {
                    let res = sut.insert(e);
                    if model.contains(&e) {
                        prop_assert_eq!(res, Err(InsertError::DuplicateKey));
                    } else if model.len() == capacity {
                        prop_assert_eq!(res, Err(InsertError::Full));
                    } else {
                        prop_assert_eq!(res, Ok(()));
                        model.insert(e);
                    }
                }
                1 => prop_assert_eq!(sut.remove(&e), model.remove(&e)),
                2 => prop_assert_eq!(sut.contains(&e), model.contains(&e)),
                _ => unreachable!(),
            }
            prop_assert_eq!(sut.len(), model.len());
            sut.table.assert_invariants();
        }

        let seen: HashSet<u16> = sut.iter().copied().collect();
        prop_assert_eq!(seen, model);
    }
}
