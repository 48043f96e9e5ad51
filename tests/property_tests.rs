use gallopsort::prelude::*;
use proptest::prelude::*;

fn stably_sorted(v: &[(u8, usize)]) -> Vec<(u8, usize)> {
    let mut expected = v.to_vec();
    expected.sort_by_key(|p| p.0);
    expected
}

fn tagged(keys: Vec<u8>) -> Vec<(u8, usize)> {
    keys.into_iter().enumerate().map(|(i, k)| (k, i)).collect()
}

proptest! {
    #[test]
    fn sort_matches_stable_std_sort(keys in proptest::collection::vec(0u8..20, 0..2_000)) {
        let mut input = tagged(keys);
        let expected = stably_sorted(&input);

        sort_by(&mut input, |a, b| a.0.cmp(&b.0));

        prop_assert!(is_sorted_by(&input, |a, b| a.0.cmp(&b.0)));
        prop_assert_eq!(input, expected);
    }

    #[test]
    fn any_min_run_sorts(
        keys in proptest::collection::vec(any::<u8>(), 0..600),
        min_run in 1usize..80,
        min_gallop in 1usize..40,
    ) {
        let options = SortOptions::new()
            .with_min_run(min_run)
            .and_then(|o| o.with_min_gallop(min_gallop))
            .unwrap();
        let mut input = tagged(keys);
        let expected = stably_sorted(&input);

        sort_by_with_options(&mut input, |a, b| a.0.cmp(&b.0), &options);

        prop_assert_eq!(input, expected);
    }

    #[test]
    fn sorted_blocks_merge_correctly(
        blocks in proptest::collection::vec(proptest::collection::vec(0u8..50, 1..120), 1..30),
    ) {
        let mut blocks = blocks;
        // Concatenated sorted or reversed blocks exercise run detection and galloping.
        let mut keys = Vec::new();
        for (i, block) in blocks.iter_mut().enumerate() {
            block.sort();
            if i % 3 == 1 {
                block.reverse();
            }
            keys.extend_from_slice(block);
        }
        let mut input = tagged(keys);
        let expected = stably_sorted(&input);

        sort_by(&mut input, |a, b| a.0.cmp(&b.0));

        prop_assert_eq!(input, expected);
    }

    #[test]
    fn sort_indices_is_a_stable_argsort(values in proptest::collection::vec(0i32..30, 0..500)) {
        let mut indices: Vec<usize> = (0..values.len()).collect();
        sort_indices(&mut indices, |i| values[i], |a, b| a.cmp(b));

        let mut expected: Vec<usize> = (0..values.len()).collect();
        expected.sort_by_key(|&i| values[i]);

        prop_assert_eq!(&indices, &expected);
        prop_assert_eq!(argsort(&values), expected);
    }

    #[test]
    fn is_sorted_agrees_with_windows(values in proptest::collection::vec(0u16..10, 0..50)) {
        let expected = values.windows(2).all(|w| w[0] <= w[1]);
        prop_assert_eq!(is_sorted(&values), expected);
    }
}
