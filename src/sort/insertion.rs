//! Insertion sort

use super::CANCEL_CHECK_INTERVAL;
use crate::core::{CancellationToken, Result};

/// Grow a sorted prefix, moving each new element left into place
///
/// Elements move by swaps, so owned values such as `String` are never
/// cloned.
pub fn insertion_sort<T: PartialOrd>(data: &mut [T], token: &CancellationToken) -> Result<()> {
    for i in 1..data.len() {
        if i % CANCEL_CHECK_INTERVAL == 1 {
            token.check()?;
        }

        let mut j = i;
        while j > 0 && data[j - 1] > data[j] {
            data.swap(j - 1, j);
            j -= 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_sort_floats() {
        let mut data = vec![2.5, -1.0, 0.0, 2.5, 1e9];
        insertion_sort(&mut data, &CancellationToken::new()).unwrap();
        assert_eq!(data, [-1.0, 0.0, 2.5, 2.5, 1e9]);
    }

    #[test]
    fn test_insertion_sort_chars() {
        let mut data: Vec<char> = "ZEBRA".chars().collect();
        insertion_sort(&mut data, &CancellationToken::new()).unwrap();
        assert_eq!(data.iter().collect::<String>(), "ABERZ");
    }

    #[test]
    fn test_insertion_sort_cancelled() {
        let token = CancellationToken::new();
        token.cancel();

        let mut data: Vec<i64> = (0..100).rev().collect();
        assert!(insertion_sort(&mut data, &token).unwrap_err().is_cancelled());
    }
}
