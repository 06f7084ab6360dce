//! Partition-exchange sort (Lomuto scheme)

use crate::core::{CancellationToken, Result};

/// Quicksort with the last element as pivot
///
/// Average O(n log n). Sorted or constant input degrades to O(n²) time;
/// that is accepted. Recursion always goes into the smaller partition and
/// the larger one is handled by the loop, so stack depth stays O(log n)
/// even in the degenerate case. The token is checked once per partition.
pub fn quick_sort<T: PartialOrd>(data: &mut [T], token: &CancellationToken) -> Result<()> {
    let mut slice = data;

    while slice.len() > 1 {
        token.check()?;

        let pivot = partition(slice);
        let (left, right) = std::mem::take(&mut slice).split_at_mut(pivot);
        let right = &mut right[1..];

        if left.len() < right.len() {
            quick_sort(left, token)?;
            slice = right;
        } else {
            quick_sort(right, token)?;
            slice = left;
        }
    }
    Ok(())
}

/// Lomuto partition around the last element; returns the pivot's final index
fn partition<T: PartialOrd>(data: &mut [T]) -> usize {
    let high = data.len() - 1;
    let mut store = 0;

    for j in 0..high {
        if data[j] <= data[high] {
            data.swap(store, j);
            store += 1;
        }
    }
    data.swap(store, high);
    store
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_places_pivot() {
        let mut data = vec![7, 2, 9, 1, 5];
        let p = partition(&mut data);
        assert_eq!(data[p], 5);
        assert!(data[..p].iter().all(|&x| x <= 5));
        assert!(data[p + 1..].iter().all(|&x| x > 5));
    }

    #[test]
    fn test_quick_sort_duplicates() {
        let mut data = vec![5i64, 3, 3, 1];
        quick_sort(&mut data, &CancellationToken::new()).unwrap();
        assert_eq!(data, [1, 3, 3, 5]);
    }

    #[test]
    fn test_quick_sort_sorted_input_is_shallow() {
        // Degenerate pivots on sorted input; must not exhaust the stack.
        let mut data: Vec<i64> = (0..5_000).collect();
        quick_sort(&mut data, &CancellationToken::new()).unwrap();
        assert!(data.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_quick_sort_cancelled() {
        let token = CancellationToken::new();
        token.cancel();

        let mut data = vec!['c', 'b', 'a'];
        assert!(quick_sort(&mut data, &token).unwrap_err().is_cancelled());
    }
}
