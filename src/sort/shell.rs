//! Shell sort with the halving gap sequence

use super::CANCEL_CHECK_INTERVAL;
use crate::core::{CancellationToken, Result};

/// Gapped insertion sort over gaps n/2, n/4, ..., 1
pub fn shell_sort<T: PartialOrd>(data: &mut [T], token: &CancellationToken) -> Result<()> {
    let n = data.len();
    let mut gap = n / 2;

    while gap > 0 {
        token.check()?;

        for i in gap..n {
            if (i - gap) % CANCEL_CHECK_INTERVAL == CANCEL_CHECK_INTERVAL - 1 {
                token.check()?;
            }

            let mut j = i;
            while j >= gap && data[j - gap] > data[j] {
                data.swap(j - gap, j);
                j -= gap;
            }
        }
        gap /= 2;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_sort_ints() {
        let mut data = vec![9i64, -4, 7, 7, 0, 12, -30, 5];
        shell_sort(&mut data, &CancellationToken::new()).unwrap();
        assert_eq!(data, [-30, -4, 0, 5, 7, 7, 9, 12]);
    }

    #[test]
    fn test_shell_sort_strings_bytewise() {
        let mut data = vec!["b".to_string(), "B".to_string(), "ab".to_string(), "a".to_string()];
        shell_sort(&mut data, &CancellationToken::new()).unwrap();
        assert_eq!(data, ["B", "a", "ab", "b"]);
    }

    #[test]
    fn test_shell_sort_cancelled() {
        let token = CancellationToken::new();
        token.cancel();

        let mut data = vec![2, 1];
        assert!(shell_sort(&mut data, &token).unwrap_err().is_cancelled());
    }
}
