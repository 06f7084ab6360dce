//! Bubble sort with early exit

use crate::core::{CancellationToken, Result};

/// Sort `data` by repeated adjacent swaps, stopping after a pass with no swap
///
/// O(n²) worst case, O(n) on already sorted input. The token is checked
/// once per pass.
pub fn bubble_sort<T: PartialOrd>(data: &mut [T], token: &CancellationToken) -> Result<()> {
    let n = data.len();
    if n < 2 {
        return Ok(());
    }

    for pass in 0..n - 1 {
        token.check()?;

        let mut swapped = false;
        for j in 0..n - pass - 1 {
            if data[j] > data[j + 1] {
                data.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bubble_sort_ints() {
        let mut data = vec![5i64, 3, 3, 1];
        bubble_sort(&mut data, &CancellationToken::new()).unwrap();
        assert_eq!(data, [1, 3, 3, 5]);
    }

    #[test]
    fn test_bubble_sort_strings() {
        let mut data = vec!["pear".to_string(), "apple".to_string(), "fig".to_string()];
        bubble_sort(&mut data, &CancellationToken::new()).unwrap();
        assert_eq!(data, ["apple", "fig", "pear"]);
    }

    #[test]
    fn test_bubble_sort_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();

        let mut data = vec![3, 2, 1];
        let err = bubble_sort(&mut data, &token).unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(data, [3, 2, 1]);
    }

    #[test]
    fn test_bubble_sort_trivial_sizes_ignore_token() {
        let token = CancellationToken::new();
        token.cancel();

        let mut empty: Vec<char> = vec![];
        assert!(bubble_sort(&mut empty, &token).is_ok());
        let mut single = vec!['x'];
        assert!(bubble_sort(&mut single, &token).is_ok());
    }
}
