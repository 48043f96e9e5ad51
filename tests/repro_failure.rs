use gallopsort::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

/// A value that counts how many times it has been dropped.
#[derive(Debug)]
struct Tracked {
    key: u32,
    drops: Rc<Cell<usize>>,
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

fn tracked_input(rng: &mut StdRng, len: usize, drops: &Rc<Cell<usize>>) -> Vec<Tracked> {
    // Sorted stretches make merges and galloping happen before the panic.
    let mut keys: Vec<u32> = (0..len).map(|_| rng.random_range(0..1_000)).collect();
    for chunk in keys.chunks_mut(64) {
        chunk.sort();
    }
    keys.into_iter()
        .map(|key| Tracked {
            key,
            drops: Rc::clone(drops),
        })
        .collect()
}

#[test]
fn test_panicking_comparator_keeps_permutation() {
    let mut rng = StdRng::seed_from_u64(42);

    for iter in 0..40 {
        let drops = Rc::new(Cell::new(0));
        let len = rng.random_range(100..2_000);
        let mut input = tracked_input(&mut rng, len, &drops);

        let mut expected: Vec<u32> = input.iter().map(|t| t.key).collect();
        expected.sort();

        let panic_after = rng.random_range(0..len * 4);
        let calls = Cell::new(0);
        let options = SortOptions::new()
            .with_min_gallop(1 + iter % 8)
            .unwrap();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            sort_by_with_options(
                &mut input,
                |a, b| {
                    calls.set(calls.get() + 1);
                    if calls.get() > panic_after {
                        panic!("comparator gave up");
                    }
                    a.key.cmp(&b.key)
                },
                &options,
            );
        }));

        // A sort that finished before the limit is fine too.
        if result.is_err() {
            assert!(calls.get() > panic_after);
        }
        assert_eq!(drops.get(), 0, "element dropped during the sort");

        let mut actual: Vec<u32> = input.iter().map(|t| t.key).collect();
        actual.sort();
        assert_eq!(actual, expected, "not a permutation after panic at {}", panic_after);

        drop(input);
        assert_eq!(drops.get(), len, "elements dropped more or less than once");
    }
}

#[test]
fn test_inconsistent_comparator_keeps_permutation() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..20 {
        let len = rng.random_range(50..3_000);
        let mut input: Vec<String> = (0..len).map(|i| format!("{:05}", i)).collect();
        let expected = input.clone();

        let mut coin = StdRng::seed_from_u64(len as u64);
        sort_by(&mut input, |_, _| match coin.random_range(0..3) {
            0 => std::cmp::Ordering::Less,
            1 => std::cmp::Ordering::Equal,
            _ => std::cmp::Ordering::Greater,
        });

        input.sort();
        assert_eq!(input, expected);
    }
}
