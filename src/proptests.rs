use crate::key::label_has_prefix;
use crate::{binary_label, ExtHash};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

fn validate_table(t: &ExtHash) {
    assert_eq!(
        t.slots.len(),
        1usize << t.global_depth(),
        "directory must have 2^global_depth slots"
    );

    let mut refs: HashMap<usize, usize> = HashMap::new();
    for (i, id) in t.slots.iter().enumerate() {
        let bucket = &t.buckets[id.idx()];
        assert!(
            label_has_prefix(i, t.global_depth(), bucket.address()),
            "slot {} must start with its bucket's address {:?}",
            binary_label(i, t.global_depth()),
            bucket.address()
        );
        *refs.entry(id.idx()).or_default() += 1;
    }

    assert_eq!(
        refs.len(),
        t.buckets.len(),
        "every arena bucket must be reachable"
    );

    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut total = 0usize;
    for (idx, bucket) in t.buckets.iter().enumerate() {
        assert!(bucket.local_depth() <= t.global_depth());
        assert!(bucket.local_depth() <= t.key_length());
        assert_eq!(bucket.capacity(), t.bucket_capacity());
        assert!(bucket.len() <= bucket.capacity(), "bucket over capacity");
        assert_eq!(
            refs[&idx],
            1usize << (t.global_depth() - bucket.local_depth()),
            "bucket {:?} must be aliased 2^(global - local) times",
            bucket.address()
        );
        for key in bucket.keys() {
            assert!(
                key.starts_with(bucket.address()),
                "key {key} outside bucket {:?}",
                bucket.address()
            );
            assert!(seen.insert(key.as_str()), "duplicate key {key}");
            total += 1;
        }
    }

    assert_eq!(total, t.len(), "stored key count must match ExtHash::len");
}

#[derive(Clone, Debug)]
enum Op {
    Insert(String),
    Search(String),
}

fn key_strategy(key_length: usize) -> impl Strategy<Value = String> + Clone {
    prop::collection::vec(prop::bool::ANY, key_length)
        .prop_map(|bits| bits.into_iter().map(|b| if b { '1' } else { '0' }).collect::<String>())
}

fn ops_strategy(key_length: usize) -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy(key_length);
    let op = prop_oneof![
        70 => key.clone().prop_map(Op::Insert),
        30 => key.prop_map(Op::Search),
    ];
    prop::collection::vec(op, 0..=400)
}

fn config_and_ops() -> impl Strategy<Value = (usize, usize, Vec<Op>)> {
    (1usize..=4, 1usize..=10)
        .prop_flat_map(|(capacity, key_length)| (Just(capacity), Just(key_length), ops_strategy(key_length)))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence((capacity, key_length, ops) in config_and_ops()) {
        let mut t = ExtHash::new(capacity, key_length);
        let mut m: BTreeSet<String> = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(key) => {
                    let inserted = t.insert(&key);
                    prop_assert_eq!(inserted, Ok(m.insert(key.clone())));
                    prop_assert!(t.search(&key));
                }
                Op::Search(key) => {
                    prop_assert_eq!(t.search(&key), m.contains(&key));
                }
            }

            prop_assert_eq!(t.len(), m.len());
        }

        validate_table(&t);
        let mut got: Vec<&str> = t.keys().collect();
        got.sort_unstable();
        let expected: Vec<&str> = m.iter().map(String::as_str).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_duplicate_insert_is_noop(
        (capacity, key_length, ops) in config_and_ops(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut t = ExtHash::new(capacity, key_length);
        let keys: Vec<String> = ops
            .into_iter()
            .map(|op| match op {
                Op::Insert(k) | Op::Search(k) => k,
            })
            .collect();
        prop_assume!(!keys.is_empty());
        for key in &keys {
            t.insert(key).unwrap();
        }

        let before = t.describe();
        let stats = t.stats();
        let key = pick.get(&keys);
        prop_assert_eq!(t.insert(key), Ok(false));
        prop_assert_eq!(t.describe(), before);
        prop_assert_eq!(t.stats(), stats);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys: Vec<String> = ["000", "001", "010", "100", "110", "111"]
        .iter()
        .map(|k| k.to_string())
        .collect();

    for capacity in 1..=2 {
        for_each_permutation(&keys, |perm| {
            let mut t = ExtHash::new(capacity, 3);
            for k in &perm {
                assert_eq!(t.insert(k), Ok(true), "capacity={capacity} order={perm:?}");
                validate_table(&t);
            }
            for k in &keys {
                assert!(t.search(k), "lost {k} for order {perm:?}");
            }
            assert!(!t.search("011"));
            assert!(!t.search("101"));
        });
    }
}

#[test]
fn exhaustive_full_keyspace() {
    for key_length in 1..=8 {
        for capacity in 1..=3 {
            let mut t = ExtHash::new(capacity, key_length);
            for i in (0..(1usize << key_length)).rev() {
                assert_eq!(t.insert(&binary_label(i, key_length)), Ok(true));
            }
            validate_table(&t);
            if capacity == 1 {
                assert_eq!(t.global_depth(), key_length);
            }
            for i in 0..(1usize << key_length) {
                let key = binary_label(i, key_length);
                assert!(t.search(&key));
                assert_eq!(t.insert(&key), Ok(false));
            }
        }
    }
}
