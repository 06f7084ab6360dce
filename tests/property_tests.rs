//! Property-based tests for the sort library using proptest

use parallel_sort_bench::prelude::*;
use proptest::prelude::*;

fn sorted_by(algorithm: SortAlgorithm, mut data: TypedDataset) -> TypedDataset {
    algorithm
        .sort_dataset(&mut data, &CancellationToken::new())
        .expect("Sort failed");
    data
}

fn algorithm_strategy() -> impl Strategy<Value = SortAlgorithm> {
    (0..SortAlgorithm::COUNT).prop_map(|i| SortAlgorithm::from_index(i).unwrap())
}

// ============================================================================
// Sortedness and multiset preservation
// ============================================================================

proptest! {
    /// Every algorithm sorts integers and keeps the same multiset
    #[test]
    fn test_ints_sorted_permutation(
        algorithm in algorithm_strategy(),
        values in prop::collection::vec(any::<i64>(), 0..200)
    ) {
        let result = sorted_by(algorithm, TypedDataset::Int64(values.clone()));
        prop_assert!(result.is_sorted());

        let mut expected = values;
        expected.sort_unstable();
        prop_assert_eq!(result, TypedDataset::Int64(expected));
    }

    /// Finite reals are sorted numerically, negatives and zero included
    #[test]
    fn test_floats_sorted_permutation(
        algorithm in algorithm_strategy(),
        values in prop::collection::vec(-1.0e9f64..1.0e9, 0..200)
    ) {
        let result = sorted_by(algorithm, TypedDataset::Float64(values.clone()));
        prop_assert!(result.is_sorted());

        let mut expected = values;
        expected.sort_by(|a, b| a.total_cmp(b));
        prop_assert_eq!(result, TypedDataset::Float64(expected));
    }

    /// Characters are ordered by code point
    #[test]
    fn test_chars_sorted_permutation(
        algorithm in algorithm_strategy(),
        values in prop::collection::vec(any::<char>(), 0..200)
    ) {
        let result = sorted_by(algorithm, TypedDataset::Char(values.clone()));
        prop_assert!(result.is_sorted());

        let mut expected = values;
        expected.sort_unstable();
        prop_assert_eq!(result, TypedDataset::Char(expected));
    }

    /// Strings are ordered byte-wise, duplicates kept
    #[test]
    fn test_strings_sorted_permutation(
        algorithm in algorithm_strategy(),
        values in prop::collection::vec("[a-zA-Z0-9 ]{0,12}", 0..100)
    ) {
        let result = sorted_by(algorithm, TypedDataset::String(values.clone()));
        prop_assert!(result.is_sorted());

        let mut expected = values;
        expected.sort_unstable();
        prop_assert_eq!(result, TypedDataset::String(expected));
    }
}

// ============================================================================
// Idempotence and agreement
// ============================================================================

proptest! {
    /// Sorting sorted data changes nothing
    #[test]
    fn test_sorting_is_idempotent(
        algorithm in algorithm_strategy(),
        values in prop::collection::vec(any::<i32>(), 0..200)
    ) {
        let once = sorted_by(algorithm, TypedDataset::Int64(values.into_iter().map(i64::from).collect()));
        let twice = sorted_by(algorithm, once.clone());
        prop_assert_eq!(once, twice);
    }

    /// All four algorithms agree on the same input
    #[test]
    fn test_algorithms_agree(values in prop::collection::vec("[a-z]{1,6}", 0..80)) {
        let input = TypedDataset::String(values);
        let results: Vec<_> = SortAlgorithm::ALL
            .into_iter()
            .map(|algorithm| sorted_by(algorithm, input.clone()))
            .collect();

        for result in &results[1..] {
            prop_assert_eq!(result, &results[0]);
        }
    }

    /// Deep copies are equal but independent
    #[test]
    fn test_deep_copy_is_independent(values in prop::collection::vec("[a-z]{0,8}", 1..50)) {
        let original = TypedDataset::String(values);
        let mut copy = original.deep_copy().unwrap();
        prop_assert_eq!(&copy, &original);

        if let TypedDataset::String(v) = &mut copy {
            v[0].push('!');
        }
        prop_assert_ne!(&copy, &original);
    }
}

// ============================================================================
// Generation and formatting
// ============================================================================

proptest! {
    /// Generated datasets have the requested size and kind
    #[test]
    fn test_generate_size_and_kind(size in 1usize..500, kind_index in 0usize..4, seed in any::<u64>()) {
        let kind = DataKind::ALL[kind_index];
        let config = GeneratorConfig::new().with_seed(seed);
        let data = DatasetGenerator::with_config(config).unwrap().generate(size, kind).unwrap();
        prop_assert_eq!(data.len(), size);
        prop_assert_eq!(data.kind(), kind);
    }

    /// Non-negative durations always format with a unit
    #[test]
    fn test_format_duration_has_unit(seconds in 0.0f64..100_000.0) {
        let text = format_duration(seconds);
        prop_assert!(
            text.ends_with(" h") || text.ends_with(" s") || text.ends_with(" ms")
                || text.ends_with(" µs") || text.ends_with(" ns"),
            "unexpected format: {}", text
        );
    }

    /// Negative durations format as the placeholder
    #[test]
    fn test_format_negative_duration(seconds in -1.0e6f64..-1.0e-12) {
        prop_assert_eq!(format_duration(seconds), "-");
    }
}
