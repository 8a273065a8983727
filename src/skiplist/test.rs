// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

#[cfg(test)]
mod model_tests {
    use std::{
        collections::BTreeMap,
        sync::Arc,
        thread,
    };

    use parking_lot::Mutex;
    use proptest::{
        collection::vec,
        prelude::*,
    };
    use rand::{
        thread_rng,
        Rng,
    };

    use crate::{
        config::Config,
        skiplist::skiplist::SkipList,
    };

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u16, u32),
        Delete(u16),
        Get(u16),
    }

    fn op() -> impl Strategy<Value = Op> {
        // a narrow key space so deletes and overwrites actually land
        prop_oneof![
            3 => (0u16..256, any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
            2 => (0u16..256).prop_map(Op::Delete),
            1 => (0u16..256).prop_map(Op::Get),
        ]
    }

    proptest! {
        #[test]
        fn test_matches_btreemap(
            ops in vec(op(), 1..400),
            max_level in -2isize..8,
            seed in any::<u64>(),
        ) {
            let config = Config::new().with_max_level(max_level).with_seed(seed);
            let mut list = SkipList::with_config(config);
            let mut model = BTreeMap::new();

            for op in ops {
                match op {
                    | Op::Insert(k, v) => {
                        prop_assert_eq!(list.insert(k, v), model.insert(k, v));
                    },
                    | Op::Delete(k) => {
                        prop_assert_eq!(list.delete(&k), model.remove(&k).is_some());
                    },
                    | Op::Get(k) => {
                        prop_assert_eq!(list.get(&k), model.get(&k));
                    },
                }

                prop_assert_eq!(list.len(), model.len());
                prop_assert!(list.level() <= list.max_level());
                if let Err(e) = list.check_invariants() {
                    return Err(TestCaseError::fail(e.to_string()));
                }
            }

            let entries = list.entries().map(|(k, v)| (*k, *v)).collect::<Vec<_>>();
            let expected = model.into_iter().collect::<Vec<_>>();
            prop_assert_eq!(entries, expected);
        }

        #[test]
        fn test_delete_absent_is_noop(
            keys in vec(0u32..1_000, 0..200),
            probe in 1_000u32..2_000,
        ) {
            let mut list = SkipList::new();
            for k in &keys {
                list.insert(*k, ());
            }
            let before = list.entries().map(|(k, _)| *k).collect::<Vec<_>>();
            let len = list.len();

            prop_assert!(!list.delete(&probe));
            prop_assert_eq!(list.len(), len);
            prop_assert_eq!(list.entries().map(|(k, _)| *k).collect::<Vec<_>>(), before);
        }
    }

    #[test]
    fn test_shuffled_workload() {
        let mut rng = thread_rng();
        let mut list = SkipList::new();
        let mut model = BTreeMap::new();

        for _ in 0..10_000 {
            let key = rng.gen_range(0..2_000u32);
            if rng.gen_bool(0.6) {
                let val = rng.gen::<u64>();
                list.insert(key, val);
                model.insert(key, val);
            } else {
                assert_eq!(list.delete(&key), model.remove(&key).is_some());
            }
        }

        assert_eq!(list.len(), model.len());
        for (k, v) in &model {
            assert_eq!(list.get(k), Some(v));
        }
        assert!(list.check_invariants().is_ok());
    }

    #[test]
    fn test_shared_behind_lock() {
        const THREADS: u32 = 4;
        const PER_THREAD: u32 = 250;

        let list = Arc::new(Mutex::new(SkipList::new()));

        let handles = (0..THREADS)
            .map(|t| {
                let list = list.clone();
                thread::spawn(move || {
                    for i in 0..PER_THREAD {
                        let key = t * PER_THREAD + i;
                        list.lock().insert(key, t);
                    }
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            handle.join().unwrap();
        }

        let list = list.lock();
        assert_eq!(list.len(), (THREADS * PER_THREAD) as usize);
        for key in 0..THREADS * PER_THREAD {
            assert_eq!(list.get(&key), Some(&(key / PER_THREAD)));
        }
        assert!(list.check_invariants().is_ok());
    }
}
